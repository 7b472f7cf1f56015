use crate::config::PlanConfig;
use crate::index::DisplayVisit;
use crate::model::{Client, Visit};
use crate::repository::ImportReport;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod plan;
pub mod search;
pub mod update;

pub use export::ExportKind;
pub use plan::PlanRequest;
pub use update::VisitUpdate;

#[derive(Debug, Clone)]
pub struct PlanPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_clients: Vec<Client>,
    pub listed_clients: Vec<Client>,
    pub affected_visits: Vec<Visit>,
    pub listed_visits: Vec<DisplayVisit>,
    pub import_report: Option<ImportReport>,
    /// Rendered export payload, if the command produced one
    pub export: Option<String>,
    pub config: Option<PlanConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_clients(mut self, clients: Vec<Client>) -> Self {
        self.affected_clients = clients;
        self
    }

    pub fn with_listed_clients(mut self, clients: Vec<Client>) -> Self {
        self.listed_clients = clients;
        self
    }

    pub fn with_affected_visits(mut self, visits: Vec<Visit>) -> Self {
        self.affected_visits = visits;
        self
    }

    pub fn with_listed_visits(mut self, visits: Vec<DisplayVisit>) -> Self {
        self.listed_visits = visits;
        self
    }

    pub fn with_export(mut self, payload: String) -> Self {
        self.export = Some(payload);
        self
    }

    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = Some(config);
        self
    }
}
