//! # Storage Layer
//!
//! Clients and visits are each persisted as one serialized list under a fixed
//! key. Two pieces cooperate:
//!
//! - [`StorageBackend`]: raw get/set of text by key. This is the only code that
//!   touches the storage medium.
//! - [`Persistence`]: the adapter the repositories talk to. It serializes whole
//!   lists on save and degrades a missing or corrupt value to an empty list on
//!   load, so a damaged file never prevents startup.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production storage, one JSON file per key.
//! - [`mem_backend::MemBackend`]: in-memory storage for tests, with write
//!   error simulation.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── planVisite_clients.json   # Client roster (JSON array)
//! ├── planVisite_visits.json    # Planned visits (JSON array)
//! └── config.json               # Configuration
//! ```
//!
//! `StorageBackend` is implemented for `Rc<B>`, so both repositories can share
//! a single backend instance.

use crate::error::{PlanError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

/// Storage key of the client roster.
pub const CLIENTS_KEY: &str = "planVisite_clients";

/// Storage key of the planned visits.
pub const VISITS_KEY: &str = "planVisite_visits";

/// Serializing adapter over a [`StorageBackend`].
pub struct Persistence<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Serialize `items` and store them under `key`.
    ///
    /// Any failure, serialization or backend, surfaces as
    /// [`PlanError::Persistence`].
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let text = serde_json::to_string(items)
            .map_err(|e| PlanError::Persistence(format!("cannot serialize {}: {}", key, e)))?;
        self.backend.set(key, &text).map_err(|e| match e {
            PlanError::Persistence(_) => e,
            other => PlanError::Persistence(format!("cannot write {}: {}", key, other)),
        })?;
        tracing::debug!(key, count = items.len(), "persisted list");
        Ok(())
    }

    /// Load the list stored under `key`. Never fails: a missing key, an
    /// unreadable medium or text that is not a valid list all yield `[]`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let text = match self.backend.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key, "no stored data");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "cannot read stored data, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&text) {
            Ok(items) => {
                tracing::debug!(key, count = items.len(), "loaded list");
                items
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "stored data is corrupt, starting empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use std::rc::Rc;

    #[test]
    fn load_of_missing_key_is_empty() {
        let persistence = Persistence::new(MemBackend::new());
        let items: Vec<u32> = persistence.load("absent");
        assert!(items.is_empty());
    }

    #[test]
    fn load_of_corrupt_text_is_empty() {
        let backend = MemBackend::new();
        backend.insert_raw("k", "{not json");
        let persistence = Persistence::new(backend);
        let items: Vec<u32> = persistence.load("k");
        assert!(items.is_empty());
    }

    #[test]
    fn load_of_non_list_is_empty() {
        let backend = MemBackend::new();
        backend.insert_raw("k", r#"{"id": 1}"#);
        let persistence = Persistence::new(backend);
        let items: Vec<u32> = persistence.load("k");
        assert!(items.is_empty());
    }

    #[test]
    fn save_then_load_through_shared_backend() {
        let backend = Rc::new(MemBackend::new());
        let writer = Persistence::new(Rc::clone(&backend));
        let reader = Persistence::new(Rc::clone(&backend));

        writer.save("k", &[1u32, 2, 3]).unwrap();
        let items: Vec<u32> = reader.load("k");
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn write_failure_is_a_persistence_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let persistence = Persistence::new(backend);
        let err = persistence.save("k", &[1u32]).unwrap_err();
        assert!(matches!(err, PlanError::Persistence(_)));
    }
}
