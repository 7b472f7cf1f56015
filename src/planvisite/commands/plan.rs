use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::VisitPosition;
use crate::model::{format_date_european, ClientId, VisitDetails};
use crate::repository::{ClientRepository, VisitRepository};
use crate::store::StorageBackend;
use std::collections::BTreeSet;

/// Everything needed to plan one visit.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub client_ids: BTreeSet<ClientId>,
    pub details: VisitDetails,
}

pub fn run<B: StorageBackend>(
    visits: &mut VisitRepository<B>,
    clients: &ClientRepository<B>,
    request: PlanRequest,
) -> Result<CmdResult> {
    let unknown: Vec<String> = request
        .client_ids
        .iter()
        .filter(|id| clients.get(**id).is_none())
        .map(|id| id.to_string())
        .collect();

    let visit = visits.plan(
        &request.date,
        &request.client_ids,
        clients.clients(),
        request.details,
    )?;

    let mut result = CmdResult::default();
    if !unknown.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Unknown client id(s) ignored: {}",
            unknown.join(", ")
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Visit planned ({}): {} {}",
        VisitPosition::from_index(visits.len() - 1),
        format_date_european(&visit.date),
        visit.client_names()
    )));
    Ok(result.with_affected_visits(vec![visit]))
}
