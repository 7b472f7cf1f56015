use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewClient;
use crate::repository::ClientRepository;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(
    clients: &mut ClientRepository<B>,
    candidate: NewClient,
) -> Result<CmdResult> {
    let client = clients.add(candidate)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Client added (#{}): {}",
        client.id, client.name
    )));
    Ok(result.with_affected_clients(vec![client]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn reports_added_client() {
        let mut clients = ClientRepository::new(MemBackend::new());
        let result = run(&mut clients, NewClient::new("Rossi", "Via A", "Roma")).unwrap();

        assert_eq!(result.affected_clients.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("#0"));
    }

    #[test]
    fn propagates_validation_errors() {
        let mut clients = ClientRepository::new(MemBackend::new());
        assert!(run(&mut clients, NewClient::new("", "Via A", "Roma")).is_err());
        assert!(clients.is_empty());
    }
}
