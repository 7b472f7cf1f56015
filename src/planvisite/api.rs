//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every operation, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the two repositories, wired to one shared storage backend
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (1-based visit positions, export format names)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal I/O and no presentation.
//!
//! ## Generic Over StorageBackend
//!
//! `PlanApi<B: StorageBackend>` works with any backend:
//! - Production: `PlanApi<FsBackend>`
//! - Testing: `PlanApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::index::VisitPosition;
use crate::model::{Client, NewClient, Visit};
use crate::repository::{ClientRepository, VisitRepository};
use crate::store::StorageBackend;
use std::path::Path;
use std::rc::Rc;

/// The main API facade.
///
/// All UI clients (CLI, web, etc.) should interact through this API.
pub struct PlanApi<B: StorageBackend> {
    clients: ClientRepository<Rc<B>>,
    visits: VisitRepository<Rc<B>>,
    paths: commands::PlanPaths,
}

impl<B: StorageBackend> PlanApi<B> {
    /// Hydrates both repositories from `backend`.
    pub fn open(backend: B, paths: commands::PlanPaths) -> Self {
        let backend = Rc::new(backend);
        Self {
            clients: ClientRepository::open(Rc::clone(&backend)),
            visits: VisitRepository::open(backend),
            paths,
        }
    }

    pub fn clients(&self) -> &[Client] {
        self.clients.clients()
    }

    pub fn visits(&self) -> &[Visit] {
        self.visits.visits()
    }

    pub fn add_client(&mut self, candidate: NewClient) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.clients, candidate)
    }

    pub fn search_clients(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.clients, query)
    }

    pub fn import_clients(&mut self, path: &Path, delimiter: u8) -> Result<commands::CmdResult> {
        commands::import::clients_from_path(&mut self.clients, path, delimiter)
    }

    pub fn import_clients_text(
        &mut self,
        text: &str,
        delimiter: u8,
    ) -> Result<commands::CmdResult> {
        commands::import::clients_from_text(&mut self.clients, text, delimiter)
    }

    pub fn plan_visit(&mut self, request: commands::PlanRequest) -> Result<commands::CmdResult> {
        commands::plan::run(&mut self.visits, &self.clients, request)
    }

    pub fn list_visits(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.visits)
    }

    pub fn update_visit(&mut self, update: commands::VisitUpdate) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.visits, &self.clients, update)
    }

    pub fn delete_visit<I: AsRef<str>>(&mut self, position: I) -> Result<commands::CmdResult> {
        let position: VisitPosition = position.as_ref().parse()?;
        commands::delete::run(&mut self.visits, position)
    }

    pub fn export_visits(
        &self,
        kind: &str,
        output: Option<&Path>,
    ) -> Result<commands::CmdResult> {
        let kind: commands::ExportKind = kind.parse()?;
        commands::export::run(&self.visits, kind, output)
    }

    pub fn import_visits(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::visits_from_path(&mut self.visits, path)
    }

    /// Retries saving both lists, e.g. after a failed write.
    pub fn persist(&self) -> Result<()> {
        self.clients.persist()?;
        self.visits.persist()
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportKind;
pub use crate::commands::plan::PlanRequest;
pub use crate::commands::update::VisitUpdate;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, PlanPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::store::fs_backend::FsBackend;
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn api() -> PlanApi<MemBackend> {
        PlanApi::open(
            MemBackend::new(),
            PlanPaths {
                data_dir: std::env::temp_dir(),
            },
        )
    }

    #[test]
    fn plan_uses_current_roster() {
        let mut api = api();
        api.add_client(NewClient::new("Rossi", "Via A", "Roma"))
            .unwrap();
        let result = api
            .plan_visit(PlanRequest {
                date: "2024-05-01".into(),
                client_ids: [0].into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.affected_visits[0].clients[0].name, "Rossi");
        assert_eq!(api.list_visits().unwrap().listed_visits.len(), 1);
    }

    #[test]
    fn import_text_then_search() {
        let mut api = api();
        let result = api
            .import_clients_text("nominativo;indirizzo;città\nRossi;Via A;Roma\nx\n", b';')
            .unwrap();
        assert_eq!(result.affected_clients.len(), 1);
        assert_eq!(
            result.import_report,
            Some(crate::repository::ImportReport {
                imported: 1,
                skipped: 1
            })
        );
        let found = api.search_clients("ROMA").unwrap();
        assert_eq!(found.listed_clients[0].name, "Rossi");
    }

    #[test]
    fn delete_parses_positions() {
        let mut api = api();
        assert!(matches!(
            api.delete_visit("x"),
            Err(PlanError::Validation(_))
        ));
        assert!(matches!(api.delete_visit("1"), Err(PlanError::Index { .. })));
    }

    #[test]
    fn export_rejects_unknown_kind() {
        let api = api();
        assert!(api.export_visits("xml", None).is_err());
        let empty = api.export_visits("json", None).unwrap();
        assert_eq!(empty.export.as_deref(), Some("[]"));
    }

    #[test]
    fn reopening_a_file_store_restores_state() {
        let dir = tempdir().unwrap();
        let paths = PlanPaths {
            data_dir: dir.path().to_path_buf(),
        };

        let mut api = PlanApi::open(FsBackend::new(dir.path()), paths.clone());
        api.add_client(NewClient::new("Rossi", "Via A", "Roma"))
            .unwrap();
        api.plan_visit(PlanRequest {
            date: "2024-05-01".into(),
            client_ids: [0].into(),
            ..Default::default()
        })
        .unwrap();

        let reopened = PlanApi::open(FsBackend::new(dir.path()), paths);
        assert_eq!(reopened.clients(), api.clients());
        assert_eq!(reopened.visits(), api.visits());

        let mut reopened = reopened;
        let added = reopened
            .add_client(NewClient::new("Bianchi", "Via B", "Milano"))
            .unwrap();
        assert_eq!(added.affected_clients[0].id, 1);
    }
}
