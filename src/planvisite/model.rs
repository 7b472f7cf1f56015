use crate::error::{PlanError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type ClientId = u64;

/// ISO calendar date format used for storage and input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A prospective client in the roster.
///
/// Older payloads used Italian keys; they are still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(alias = "nominativo")]
    pub name: String,
    #[serde(alias = "indirizzo")]
    pub address: String,
    #[serde(alias = "città")]
    pub city: String,
    #[serde(default, alias = "Regione")]
    pub region: String,
    #[serde(default, alias = "telefono")]
    pub phone: String,
}

impl Client {
    /// Case-insensitive substring match on any text field.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.name,
            &self.address,
            &self.city,
            &self.region,
            &self.phone,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Input for a client that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub phone: String,
}

impl NewClient {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Trims every field and checks the required ones.
    pub fn normalized(self) -> Result<Self> {
        let candidate = Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            region: self.region.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };

        let missing: Vec<&str> = [
            ("name", &candidate.name),
            ("address", &candidate.address),
            ("city", &candidate.city),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();

        if !missing.is_empty() {
            return Err(PlanError::validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        Ok(candidate)
    }

    pub(crate) fn into_client(self, id: ClientId) -> Client {
        Client {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            region: self.region,
            phone: self.phone,
        }
    }
}

/// A planned visit (or order) for one or more clients.
///
/// `clients` holds copies taken at planning time, so later roster edits
/// never reach a saved visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "VisitRecord")]
pub struct Visit {
    pub date: NaiveDate,
    pub clients: Vec<Client>,
    pub note: String,
    pub total: f64,
    pub quote_number: String,
    pub quote_validity: String,
}

impl Visit {
    pub fn new(date: NaiveDate, clients: Vec<Client>, details: VisitDetails) -> Self {
        Self {
            date,
            clients,
            note: details.note,
            total: details.total,
            quote_number: details.quote_number,
            quote_validity: details.quote_validity,
        }
    }

    pub fn details(&self) -> VisitDetails {
        VisitDetails {
            note: self.note.clone(),
            total: self.total,
            quote_number: self.quote_number.clone(),
            quote_validity: self.quote_validity.clone(),
        }
    }

    /// Names of the snapshotted clients, comma separated.
    pub fn client_names(&self) -> String {
        self.clients
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Optional commercial fields attached to a visit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitDetails {
    pub note: String,
    pub total: f64,
    pub quote_number: String,
    pub quote_validity: String,
}

impl VisitDetails {
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }
}

// Wire shape accepted on read. Besides the current layout it takes the
// single `client` field and the Italian quote keys of older exports.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisitRecord {
    date: NaiveDate,
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    client: Option<Client>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    total: Option<f64>,
    #[serde(default, alias = "numeroPreventivo")]
    quote_number: Option<String>,
    #[serde(default, alias = "validitaPreventivo")]
    quote_validity: Option<String>,
}

impl From<VisitRecord> for Visit {
    fn from(record: VisitRecord) -> Self {
        let mut clients = record.clients;
        if clients.is_empty() {
            clients.extend(record.client);
        }
        Self {
            date: record.date,
            clients,
            note: record.note.unwrap_or_default(),
            total: record.total.unwrap_or_default(),
            quote_number: record.quote_number.unwrap_or_default(),
            quote_validity: record.quote_validity.unwrap_or_default(),
        }
    }
}

/// Copies of the roster clients whose id is in `ids`, in roster order.
pub fn snapshot_clients(roster: &[Client], ids: &BTreeSet<ClientId>) -> Vec<Client> {
    roster
        .iter()
        .filter(|c| ids.contains(&c.id))
        .cloned()
        .collect()
}

/// Parses an ISO `YYYY-MM-DD` date supplied by a caller.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PlanError::validation("visit date is required"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        PlanError::validation(format!("invalid date '{}', expected YYYY-MM-DD", trimmed))
    })
}

/// `DD/MM/YYYY`, the display form used in listings and map exports.
pub fn format_date_european(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rossi() -> Client {
        NewClient::new("Rossi", "Via A", "Roma").into_client(0)
    }

    #[test]
    fn normalized_trims_fields() {
        let candidate = NewClient::new("  Rossi ", " Via A", "Roma  ")
            .with_region(" Lazio ")
            .normalized()
            .unwrap();
        assert_eq!(candidate.name, "Rossi");
        assert_eq!(candidate.address, "Via A");
        assert_eq!(candidate.city, "Roma");
        assert_eq!(candidate.region, "Lazio");
        assert_eq!(candidate.phone, "");
    }

    #[test]
    fn normalized_rejects_blank_required_fields() {
        let err = NewClient::new("Rossi", "   ", "").normalized().unwrap_err();
        match err {
            PlanError::Validation(msg) => {
                assert!(msg.contains("address"));
                assert!(msg.contains("city"));
                assert!(!msg.contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let client = NewClient::new("Rossi", "Via Appia", "Roma")
            .with_region("Lazio")
            .with_phone("06 1234")
            .into_client(1);
        assert!(client.matches("rossi"));
        assert!(client.matches("appia"));
        assert!(client.matches("laz"));
        assert!(client.matches("1234"));
        assert!(!client.matches("milano"));
    }

    #[test]
    fn parse_date_rejects_empty_and_garbage() {
        assert!(matches!(parse_date(""), Err(PlanError::Validation(_))));
        assert!(matches!(parse_date("01/05/2024"), Err(PlanError::Validation(_))));
        assert_eq!(
            parse_date(" 2024-05-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn european_date_display() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_date_european(&date), "01/05/2024");
    }

    #[test]
    fn visit_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let visit = Visit::new(date, vec![rossi()], VisitDetails::default());
        let json = serde_json::to_value(&visit).unwrap();
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["clients"][0]["name"], "Rossi");
        assert!(json.get("quoteNumber").is_some());
    }

    #[test]
    fn reads_legacy_visit_shape() {
        let json = r#"{
            "date": "2024-05-01",
            "client": {"id": 3, "nominativo": "Rossi", "indirizzo": "Via A",
                       "città": "Roma", "Regione": "Lazio", "telefono": "06"},
            "total": 12.5,
            "note": "",
            "numeroPreventivo": "P-7",
            "validitaPreventivo": "2024-06-01"
        }"#;
        let visit: Visit = serde_json::from_str(json).unwrap();
        assert_eq!(visit.clients.len(), 1);
        assert_eq!(visit.clients[0].id, 3);
        assert_eq!(visit.clients[0].region, "Lazio");
        assert_eq!(visit.quote_number, "P-7");
        assert_eq!(visit.quote_validity, "2024-06-01");
        assert_eq!(visit.total, 12.5);
    }
}
