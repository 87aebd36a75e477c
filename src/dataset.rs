use std::path::Path;

use tracing::{debug, warn};

use crate::aggregator::aggregate;
use crate::error::{CartirError, Result};
use crate::filter::{self, FilterState};
use crate::models::{Document, ParsedRecord, RawRecord, SectionAggregate};
use crate::parser::{parse_records, ParseIssue};

/// The loaded document, parsed once. Every derived view is recomputed from
/// `records` on request.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<ParsedRecord>,
    pub issues: Vec<ParseIssue>,
}

impl Dataset {
    pub fn from_raw(raws: &[RawRecord]) -> Self {
        let outcome = parse_records(raws);
        if !outcome.issues.is_empty() {
            warn!(
                "{} of {} records are malformed (run `cartir check` for details)",
                outcome.issues.len(),
                raws.len()
            );
        }
        Self {
            records: outcome.records,
            issues: outcome.issues,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sums(&self) -> Vec<SectionAggregate> {
        aggregate(&self.records)
    }

    pub fn view(&self, state: &FilterState) -> Vec<ParsedRecord> {
        filter::apply_filters(&self.records, state)
    }

    pub fn shifts(&self) -> Vec<String> {
        filter::available_shifts(&self.records)
    }

    pub fn sections(&self) -> Vec<String> {
        filter::available_sections(&self.records)
    }

    pub fn streets(&self, section: &str) -> Vec<String> {
        filter::available_streets(&self.records, section)
    }

    pub fn trenches(&self, section: &str, street: &str) -> Vec<String> {
        filter::available_trenches(&self.records, section, street)
    }
}

/// Parse a cartir JSON document (`{"Items": [{"Value": "..."}]}`).
pub fn parse_document(content: &str) -> Result<Vec<RawRecord>> {
    let doc: Document =
        serde_json::from_str(content).map_err(|e| CartirError::Load(e.to_string()))?;
    Ok(doc.items)
}

/// Read and parse the document at `path`. Every failure is a `Load` error.
pub fn load(path: &Path) -> Result<Dataset> {
    debug!("loading dataset from {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|e| CartirError::Load(format!("{}: {e}", path.display())))?;
    let raws = parse_document(&content)?;
    let dataset = Dataset::from_raw(&raws);
    debug!("loaded {} records", dataset.len());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "Items": [
            {"Value": "1/2024-01-01/Turno Dia/AB1_12/North/10.5/x"},
            {"Value": "2/2024-01-01/Turno Noche/AB1_13/North/5/x", "Extra": 1},
            {"Value": "3/2024-01-02/Turno Dia/CD201/South/N/A"}
        ]
    }"#;

    #[test]
    fn test_parse_document_reads_items() {
        let raws = parse_document(DOC).unwrap();
        assert_eq!(raws.len(), 3);
        assert_eq!(raws[0].value, "1/2024-01-01/Turno Dia/AB1_12/North/10.5/x");
    }

    #[test]
    fn test_parse_document_rejects_wrong_shape() {
        let err = parse_document(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, CartirError::Load(_)));
        assert!(err.to_string().starts_with("Error loading JSON: "));

        let err = parse_document("not json").unwrap_err();
        assert!(matches!(err, CartirError::Load(_)));
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.json")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Error loading JSON: "), "got: {msg}");
        assert!(msg.contains("missing.json"), "got: {msg}");
    }

    #[test]
    fn test_load_parses_records_and_issues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartir.json");
        std::fs::write(&path, DOC).unwrap();
        let ds = load(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.issues.len(), 1);
        assert_eq!(ds.issues[0].index, 2);
        assert_eq!(ds.records[2].value, 0.0);
    }

    #[test]
    fn test_dataset_views() {
        let ds = Dataset::from_raw(&parse_document(DOC).unwrap());
        let sums = ds.sums();
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[0].section, "North");
        assert_eq!(sums[0].total_value, 15.5);

        let mut state = FilterState::default();
        state.select_section("South");
        let view = ds.view(&state);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].street, "CD2");

        assert_eq!(ds.shifts(), vec!["Turno Dia", "Turno Noche"]);
        assert_eq!(ds.sections(), vec!["North", "South"]);
        assert_eq!(ds.streets("North"), vec!["AB1"]);
        assert_eq!(ds.trenches("North", "AB1"), vec!["12", "13"]);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert!(ds.sums().is_empty());
    }
}
