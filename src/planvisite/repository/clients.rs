use crate::codec::parse_rows;
use crate::error::{PlanError, Result};
use crate::model::{Client, ClientId, NewClient};
use crate::store::{Persistence, StorageBackend, CLIENTS_KEY};

/// Minimum fields of an importable row: name, address, city.
const REQUIRED_FIELDS: usize = 3;

/// Outcome of a bulk client import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Owner of the client roster.
///
/// Ids are handed out sequentially and never reused while the repository
/// lives. Every mutation is followed by a save of the whole roster.
pub struct ClientRepository<B: StorageBackend> {
    clients: Vec<Client>,
    next_id: ClientId,
    persistence: Persistence<B>,
}

impl<B: StorageBackend> ClientRepository<B> {
    /// An empty roster that has not read anything from storage.
    pub fn new(backend: B) -> Self {
        Self {
            clients: Vec::new(),
            next_id: 0,
            persistence: Persistence::new(backend),
        }
    }

    /// A roster hydrated from whatever is stored under [`CLIENTS_KEY`].
    pub fn open(backend: B) -> Self {
        let mut repo = Self::new(backend);
        let stored = repo.persistence.load(CLIENTS_KEY);
        repo.restore(stored);
        repo
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// The id the next added client will receive.
    pub fn next_id(&self) -> ClientId {
        self.next_id
    }

    pub fn add(&mut self, candidate: NewClient) -> Result<Client> {
        let candidate = candidate.normalized()?;
        let client = self.push(candidate)?;
        tracing::debug!(id = client.id, name = %client.name, "client added");
        self.persist()?;
        Ok(client)
    }

    /// Bulk-adds clients from delimited text (`name;address;city[;region[;phone]]`).
    ///
    /// The first line is a header. Rows with fewer than three fields, or with
    /// a blank required field, are skipped and counted. The roster is saved
    /// once, after every row has been processed.
    pub fn import_delimited(&mut self, text: &str, delimiter: u8) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for row in parse_rows(text, delimiter) {
            if row.len() < REQUIRED_FIELDS {
                report.skipped += 1;
                continue;
            }
            let mut fields = row.into_iter();
            let mut next = || fields.next().unwrap_or_default();
            let candidate = NewClient {
                name: next(),
                address: next(),
                city: next(),
                region: next(),
                phone: next(),
            };
            match candidate.normalized() {
                Ok(candidate) => match self.push(candidate) {
                    Ok(_) => report.imported += 1,
                    Err(e) => {
                        tracing::warn!(error = %e, "cannot import row");
                        report.skipped += 1;
                    }
                },
                Err(e) => {
                    tracing::debug!(error = %e, "skipping import row");
                    report.skipped += 1;
                }
            }
        }

        tracing::info!(
            imported = report.imported,
            skipped = report.skipped,
            "client import finished"
        );
        if report.imported > 0 {
            self.persist()?;
        }
        Ok(report)
    }

    /// Clients with any field containing `query`, ignoring case.
    /// An empty query returns the whole roster.
    pub fn search(&self, query: &str) -> Vec<Client> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clients.clone();
        }
        self.clients
            .iter()
            .filter(|c| c.matches(&needle))
            .cloned()
            .collect()
    }

    /// Replaces the roster with previously persisted clients. Their ids are
    /// kept as stored and the counter moves past the highest one, stopping
    /// at `ClientId::MAX`.
    pub fn restore(&mut self, clients: Vec<Client>) {
        self.next_id = clients
            .iter()
            .map(|c| c.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        self.clients = clients;
    }

    /// Writes the current roster to storage. Safe to call again after a
    /// failed save.
    pub fn persist(&self) -> Result<()> {
        self.persistence.save(CLIENTS_KEY, &self.clients)
    }

    /// Fails once the id space is used up: the counter saturates, so the
    /// last id would otherwise be handed out twice.
    fn push(&mut self, candidate: NewClient) -> Result<Client> {
        if self.get(self.next_id).is_some() {
            return Err(PlanError::validation("no client ids left"));
        }
        let client = candidate.into_client(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.clients.push(client.clone());
        Ok(client)
    }
}
