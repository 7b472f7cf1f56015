use crate::commands::CmdResult;
use crate::error::Result;
use crate::repository::ClientRepository;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(clients: &ClientRepository<B>, query: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_clients(clients.search(query)))
}
