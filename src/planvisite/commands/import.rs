use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlanError, Result};
use crate::repository::{ClientRepository, VisitRepository};
use crate::store::StorageBackend;
use std::fs;
use std::path::Path;

/// Imports clients from a delimited file. The whole file is read before any
/// row is parsed.
pub fn clients_from_path<B: StorageBackend>(
    clients: &mut ClientRepository<B>,
    path: &Path,
    delimiter: u8,
) -> Result<CmdResult> {
    let text = fs::read_to_string(path).map_err(PlanError::Io)?;
    let mut result = clients_from_text(clients, &text, delimiter)?;
    result
        .messages
        .insert(0, CmdMessage::info(format!("Read: {}", path.display())));
    Ok(result)
}

pub fn clients_from_text<B: StorageBackend>(
    clients: &mut ClientRepository<B>,
    text: &str,
    delimiter: u8,
) -> Result<CmdResult> {
    let first_new = clients.len();
    let report = clients.import_delimited(text, delimiter)?;

    let mut result =
        CmdResult::default().with_affected_clients(clients.clients()[first_new..].to_vec());
    result.import_report = Some(report);
    if report.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {} malformed row(s)",
            report.skipped
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Total imported: {}",
        report.imported
    )));
    Ok(result)
}

/// Replaces the visit list with the contents of a JSON export file.
pub fn visits_from_path<B: StorageBackend>(
    visits: &mut VisitRepository<B>,
    path: &Path,
) -> Result<CmdResult> {
    let text = fs::read_to_string(path).map_err(PlanError::Io)?;
    let count = visits.import_json(&text)?;

    let mut result = CmdResult::default().with_affected_visits(visits.visits().to_vec());
    result.add_message(CmdMessage::info(format!("Read: {}", path.display())));
    result.add_message(CmdMessage::success(format!(
        "Visits imported: {}",
        count
    )));
    Ok(result)
}
