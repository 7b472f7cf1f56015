//! # Repositories
//!
//! The single source of truth for each entity list:
//!
//! - [`ClientRepository`]: the client roster, id assignment, CSV import, search.
//! - [`VisitRepository`]: planned visits addressed by position, CSV and JSON
//!   export, JSON import.
//!
//! Both follow the same cycle for every mutation: validate, change the
//! in-memory list, save the whole list. A validation failure leaves the list
//! untouched. A failed save does not roll back the change already made in
//! memory; call `persist()` to retry the save alone.

pub mod clients;
pub mod visits;

pub use clients::{ClientRepository, ImportReport};
pub use visits::{ExportFormat, VisitRepository};
