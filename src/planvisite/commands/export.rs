use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlanError, Result};
use crate::repository::{ExportFormat, VisitRepository};
use crate::store::StorageBackend;
use std::fs;
use std::path::Path;

/// What an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Delimited(ExportFormat),
    Json,
}

impl std::str::FromStr for ExportKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("json") {
            return Ok(ExportKind::Json);
        }
        s.parse().map(ExportKind::Delimited)
    }
}

/// Renders the visit list. With an `output` path the payload is written
/// there; otherwise it is returned in [`CmdResult::export`].
pub fn run<B: StorageBackend>(
    visits: &VisitRepository<B>,
    kind: ExportKind,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let payload = match kind {
        ExportKind::Delimited(format) => visits.export_delimited(format)?,
        ExportKind::Json => Some(visits.export_json()?),
    };

    let mut result = CmdResult::default();
    let Some(payload) = payload else {
        result.add_message(CmdMessage::info("No visits to export."));
        return Ok(result);
    };

    match output {
        Some(path) => {
            fs::write(path, &payload).map_err(PlanError::Io)?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} visit(s) to {}",
                visits.len(),
                path.display()
            )));
            Ok(result)
        }
        None => Ok(result.with_export(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewClient, VisitDetails};
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn visits() -> VisitRepository<MemBackend> {
        let roster = vec![
            NewClient::new("Rossi", "Via A", "Roma").into_client(0),
            NewClient::new("Bianchi", "Via B", "Milano").into_client(1),
        ];
        let mut visits = VisitRepository::new(MemBackend::new());
        visits
            .plan("2024-05-01", &[0, 1].into(), &roster, VisitDetails::default())
            .unwrap();
        visits
    }

    #[test]
    fn nothing_to_export_is_a_message_not_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let empty = VisitRepository::new(MemBackend::new());

        let result = run(
            &empty,
            ExportKind::Delimited(ExportFormat::MyMaps),
            Some(&path),
        )
        .unwrap();
        assert!(result.export.is_none());
        assert_eq!(result.messages[0].content, "No visits to export.");
        assert!(!path.exists());
    }

    #[test]
    fn returns_payload_without_output_path() {
        let result = run(&visits(), ExportKind::Delimited(ExportFormat::MyMaps), None).unwrap();
        let payload = result.export.unwrap();
        assert_eq!(payload.lines().count(), 3);
    }

    #[test]
    fn writes_json_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("visite.json");
        run(&visits(), ExportKind::Json, Some(&path)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let mut restored = VisitRepository::new(MemBackend::new());
        restored.import_json(&written).unwrap();
        assert_eq!(restored.visits(), visits().visits());
    }

    #[test]
    fn parses_kinds() {
        assert_eq!("json".parse::<ExportKind>().unwrap(), ExportKind::Json);
        assert_eq!(
            "csv-simple".parse::<ExportKind>().unwrap(),
            ExportKind::Delimited(ExportFormat::Simple)
        );
        assert!("yaml".parse::<ExportKind>().is_err());
    }
}
