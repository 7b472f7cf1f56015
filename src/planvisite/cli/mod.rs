//! # CLI Behavior
//!
//! This is **one possible UI client** for planvisite, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Conventions
//!
//! - Running `planvisite` with no command lists the planned visits.
//! - Visits are shown and addressed by 1-based position. Positions shift after
//!   a delete, so list again before editing or deleting more.
//! - `plan` without `--date` plans for today.
//! - Amounts are accepted and shown in the euro display form (`1.234,50`).
//! - `export` prints to stdout unless `--output` is given, so it composes with
//!   redirection.
//!
//! ## Data Directory
//!
//! `--data-dir`, then `$PLANVISITE_HOME`, then the platform data directory.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (tables, colors, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
