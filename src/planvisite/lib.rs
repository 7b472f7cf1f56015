//! # Planvisite Architecture
//!
//! Planvisite keeps a roster of prospective clients and a list of planned
//! visits (or orders) for them, with CSV and JSON import/export. It is a
//! **UI-agnostic library** with a small CLI client on top; nothing below the
//! CLI prints or exits.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the repositories, normalizes inputs                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns `CmdResult`            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repositories (repository/)                                 │
//! │  - ClientRepository, VisitRepository: validate, mutate,     │
//! │    persist the whole list                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Persistence adapter over a key-value StorageBackend      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//!
//! A visit stores full copies of its clients taken when it was planned.
//! Editing or adding clients afterwards never changes a saved visit.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`repository`]: Client and visit repositories
//! - [`store`]: Storage abstraction and implementations
//! - [`codec`]: Delimited text and currency formatting
//! - [`model`]: Core data types (`Client`, `Visit`)
//! - [`index`]: 1-based visit positions
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod repository;
pub mod store;
