use crate::codec::{format_euro, format_rows};
use crate::error::{PlanError, Result};
use crate::model::{
    format_date_european, parse_date, snapshot_clients, Client, ClientId, Visit, VisitDetails,
    DATE_FORMAT,
};
use crate::store::{Persistence, StorageBackend, VISITS_KEY};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const MYMAPS_HEADER: [&str; 8] = [
    "Nominativo",
    "Indirizzo",
    "Città",
    "Regione",
    "Telefono",
    "Data",
    "Nota",
    "Totale",
];

const SIMPLE_HEADER: [&str; 8] = [
    "name", "address", "city", "region", "phone", "date", "note", "total",
];

/// Layout of a delimited visit export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma separated, Italian headers, `DD/MM/YYYY` dates and euro totals.
    /// Loads straight into a map layer.
    MyMaps,
    /// Semicolon separated, ISO dates and plain totals. The leading columns
    /// follow the client import layout.
    Simple,
}

impl ExportFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            ExportFormat::MyMaps => b',',
            ExportFormat::Simple => b';',
        }
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            ExportFormat::MyMaps => &MYMAPS_HEADER,
            ExportFormat::Simple => &SIMPLE_HEADER,
        }
    }

    fn row(self, visit: &Visit, client: &Client) -> [String; 8] {
        let (date, total) = match self {
            ExportFormat::MyMaps => (format_date_european(&visit.date), format_euro(visit.total)),
            ExportFormat::Simple => (
                visit.date.format(DATE_FORMAT).to_string(),
                format!("{:.2}", visit.total),
            ),
        };
        [
            client.name.clone(),
            client.address.clone(),
            client.city.clone(),
            client.region.clone(),
            client.phone.clone(),
            date,
            visit.note.clone(),
            total,
        ]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::MyMaps => write!(f, "csv-mymaps"),
            ExportFormat::Simple => write!(f, "csv-simple"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv-mymaps" | "mymaps" => Ok(ExportFormat::MyMaps),
            "csv-simple" | "simple" => Ok(ExportFormat::Simple),
            other => Err(PlanError::validation(format!(
                "unknown export format '{}' (expected csv-mymaps or csv-simple)",
                other
            ))),
        }
    }
}

/// Owner of the planned visits.
///
/// Visits are addressed by position. Positions are only valid until the next
/// mutation: a delete shifts every later visit down by one.
pub struct VisitRepository<B: StorageBackend> {
    visits: Vec<Visit>,
    persistence: Persistence<B>,
}

impl<B: StorageBackend> VisitRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            visits: Vec::new(),
            persistence: Persistence::new(backend),
        }
    }

    /// Visits hydrated from whatever is stored under [`VISITS_KEY`].
    pub fn open(backend: B) -> Self {
        let mut repo = Self::new(backend);
        let stored = repo.persistence.load(VISITS_KEY);
        repo.restore(stored);
        repo
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn get(&self, index: usize) -> Option<&Visit> {
        self.visits.get(index)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Plans a visit on `date` for the selected clients.
    ///
    /// Each selected id is looked up in `roster` and the matching clients are
    /// copied into the visit in roster order. Ids missing from the roster are
    /// ignored, but at least one must resolve.
    pub fn plan(
        &mut self,
        date: &str,
        client_ids: &BTreeSet<ClientId>,
        roster: &[Client],
        details: VisitDetails,
    ) -> Result<Visit> {
        let date = parse_date(date)?;
        if client_ids.is_empty() {
            return Err(PlanError::validation("select at least one client"));
        }

        let snapshots = snapshot_clients(roster, client_ids);
        if snapshots.is_empty() {
            return Err(PlanError::validation(
                "none of the selected clients exist in the roster",
            ));
        }

        let visit = Visit::new(date, snapshots, details);
        self.visits.push(visit.clone());
        tracing::debug!(index = self.visits.len() - 1, date = %visit.date, "visit planned");
        self.persist()?;
        Ok(visit)
    }

    /// Replaces the visit at `index`, keeping its position.
    pub fn update(&mut self, index: usize, revised: Visit) -> Result<Visit> {
        self.check_index(index)?;
        if revised.clients.is_empty() {
            return Err(PlanError::validation("a visit needs at least one client"));
        }
        self.visits[index] = revised.clone();
        tracing::debug!(index, "visit updated");
        self.persist()?;
        Ok(revised)
    }

    /// Removes the visit at `index` and returns it.
    pub fn delete(&mut self, index: usize) -> Result<Visit> {
        self.check_index(index)?;
        let removed = self.visits.remove(index);
        tracing::debug!(index, "visit deleted");
        self.persist()?;
        Ok(removed)
    }

    /// One row per (visit, client) pair, header first.
    /// Returns `None` when there is nothing to export.
    pub fn export_delimited(&self, format: ExportFormat) -> Result<Option<String>> {
        if self.visits.is_empty() {
            return Ok(None);
        }
        let rows = self
            .visits
            .iter()
            .flat_map(|visit| visit.clients.iter().map(move |client| format.row(visit, client)));
        format_rows(format.header(), rows, format.delimiter()).map(Some)
    }

    /// The whole visit list as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.visits)?)
    }

    /// Replaces the visit list with the one encoded in `text`.
    ///
    /// The payload must be a JSON array of visits, each with at least one
    /// client. On any mismatch the current list is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let imported: Vec<Visit> = serde_json::from_str(text)
            .map_err(|e| PlanError::Format(format!("not a list of visits: {}", e)))?;

        if let Some(pos) = imported.iter().position(|v| v.clients.is_empty()) {
            return Err(PlanError::Format(format!(
                "visit {} has no clients",
                pos + 1
            )));
        }

        let count = imported.len();
        self.visits = imported;
        tracing::info!(count, "visits imported");
        self.persist()?;
        Ok(count)
    }

    /// Replaces the list with previously persisted visits, as stored.
    pub fn restore(&mut self, visits: Vec<Visit>) {
        self.visits = visits;
    }

    /// Writes the current list to storage. Safe to call again after a
    /// failed save.
    pub fn persist(&self) -> Result<()> {
        self.persistence.save(VISITS_KEY, &self.visits)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.visits.len() {
            return Err(PlanError::Index {
                index,
                len: self.visits.len(),
            });
        }
        Ok(())
    }
}
