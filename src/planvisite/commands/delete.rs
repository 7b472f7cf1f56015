use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::VisitPosition;
use crate::model::format_date_european;
use crate::repository::VisitRepository;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(
    visits: &mut VisitRepository<B>,
    position: VisitPosition,
) -> Result<CmdResult> {
    let index = position.to_index(visits.len())?;
    let removed = visits.delete(index)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Visit deleted ({}): {} {}",
        position,
        format_date_european(&removed.date),
        removed.client_names()
    )));
    Ok(result.with_affected_visits(vec![removed]))
}
