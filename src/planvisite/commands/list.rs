use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::index_visits;
use crate::repository::VisitRepository;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(visits: &VisitRepository<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_visits(index_visits(visits.visits())))
}
