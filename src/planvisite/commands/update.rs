use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlanError, Result};
use crate::index::VisitPosition;
use crate::model::{format_date_european, parse_date, snapshot_clients, ClientId};
use crate::repository::{ClientRepository, VisitRepository};
use crate::store::StorageBackend;
use std::collections::BTreeSet;

/// Changes to apply to a planned visit. `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct VisitUpdate {
    pub position: VisitPosition,
    pub date: Option<String>,
    /// Re-snapshots the clients from the current roster
    pub client_ids: Option<BTreeSet<ClientId>>,
    pub note: Option<String>,
    pub total: Option<f64>,
    pub quote_number: Option<String>,
    pub quote_validity: Option<String>,
}

impl VisitUpdate {
    pub fn new(position: VisitPosition) -> Self {
        Self {
            position,
            date: None,
            client_ids: None,
            note: None,
            total: None,
            quote_number: None,
            quote_validity: None,
        }
    }
}

pub fn run<B: StorageBackend>(
    visits: &mut VisitRepository<B>,
    clients: &ClientRepository<B>,
    update: VisitUpdate,
) -> Result<CmdResult> {
    let index = update.position.to_index(visits.len())?;
    let mut revised = visits
        .get(index)
        .cloned()
        .ok_or(PlanError::Index {
            index,
            len: visits.len(),
        })?;

    if let Some(date) = &update.date {
        revised.date = parse_date(date)?;
    }
    if let Some(ids) = &update.client_ids {
        let snapshots = snapshot_clients(clients.clients(), ids);
        if snapshots.is_empty() {
            return Err(PlanError::validation(
                "none of the selected clients exist in the roster",
            ));
        }
        revised.clients = snapshots;
    }
    if let Some(note) = update.note {
        revised.note = note.trim().to_string();
    }
    if let Some(total) = update.total {
        revised.total = total;
    }
    if let Some(quote_number) = update.quote_number {
        revised.quote_number = quote_number.trim().to_string();
    }
    if let Some(quote_validity) = update.quote_validity {
        revised.quote_validity = quote_validity.trim().to_string();
    }

    let visit = visits.update(index, revised)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Visit updated ({}): {} {}",
        update.position,
        format_date_european(&visit.date),
        visit.client_names()
    )));
    Ok(result.with_affected_visits(vec![visit]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewClient, VisitDetails};
    use crate::store::mem_backend::MemBackend;
    use std::rc::Rc;

    fn setup() -> (
        ClientRepository<Rc<MemBackend>>,
        VisitRepository<Rc<MemBackend>>,
    ) {
        let backend = Rc::new(MemBackend::new());
        let mut clients = ClientRepository::new(Rc::clone(&backend));
        clients.add(NewClient::new("Rossi", "Via A", "Roma")).unwrap();
        clients
            .add(NewClient::new("Bianchi", "Via B", "Milano"))
            .unwrap();
        let mut visits = VisitRepository::new(backend);
        for date in ["2024-05-01", "2024-05-02"] {
            visits
                .plan(date, &[0].into(), clients.clients(), VisitDetails::default())
                .unwrap();
        }
        (clients, visits)
    }

    #[test]
    fn changes_only_given_fields() {
        let (clients, mut visits) = setup();
        let mut update = VisitUpdate::new(VisitPosition(2));
        update.note = Some(" bring samples ".into());
        update.total = Some(50.0);
        run(&mut visits, &clients, update).unwrap();

        let visit = &visits.visits()[1];
        assert_eq!(visit.note, "bring samples");
        assert_eq!(visit.total, 50.0);
        assert_eq!(visit.date.to_string(), "2024-05-02");
        assert_eq!(visit.clients[0].name, "Rossi");
        assert_eq!(visits.visits()[0].note, "");
    }

    #[test]
    fn resnapshots_clients() {
        let (clients, mut visits) = setup();
        let mut update = VisitUpdate::new(VisitPosition(1));
        update.client_ids = Some([1].into());
        run(&mut visits, &clients, update).unwrap();
        assert_eq!(visits.visits()[0].client_names(), "Bianchi");
    }

    #[test]
    fn bad_date_leaves_visit_untouched() {
        let (clients, mut visits) = setup();
        let before = visits.visits()[0].clone();
        let mut update = VisitUpdate::new(VisitPosition(1));
        update.date = Some("tomorrow".into());
        update.note = Some("x".into());
        assert!(run(&mut visits, &clients, update).is_err());
        assert_eq!(visits.visits()[0], before);
    }

    #[test]
    fn out_of_range_positions_fail() {
        let (clients, mut visits) = setup();
        for position in [0, 3] {
            let err = run(&mut visits, &clients, VisitUpdate::new(VisitPosition(position)))
                .unwrap_err();
            assert!(matches!(err, PlanError::Index { .. }));
        }
    }
}
