use std::collections::HashSet;

use crate::models::ParsedRecord;

/// Current filter selection. An empty field matches every record.
///
/// Street and trench only mean something inside the selected section and
/// street, so the `select_*` transitions clear the narrower fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub shift: String,
    pub section: String,
    pub street: String,
    pub trench: String,
}

impl FilterState {
    pub fn select_shift(&mut self, shift: impl Into<String>) {
        self.shift = shift.into();
    }

    pub fn select_section(&mut self, section: impl Into<String>) {
        self.section = section.into();
        self.street.clear();
        self.trench.clear();
    }

    pub fn select_street(&mut self, street: impl Into<String>) {
        self.street = street.into();
        self.trench.clear();
    }

    pub fn select_trench(&mut self, trench: impl Into<String>) {
        self.trench = trench.into();
    }

    pub fn is_empty(&self) -> bool {
        self.shift.is_empty()
            && self.section.is_empty()
            && self.street.is_empty()
            && self.trench.is_empty()
    }

    pub fn matches(&self, r: &ParsedRecord) -> bool {
        field_matches(&self.shift, &r.shift)
            && field_matches(&self.section, &r.section)
            && field_matches(&self.street, &r.street)
            && field_matches(&self.trench, &r.trench)
    }

    /// Human-readable summary of the active filters, e.g. `turno: Turno Dia, calle: AB1`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.shift.is_empty() {
            parts.push(format!("turno: {}", self.shift));
        }
        if !self.section.is_empty() {
            parts.push(format!("macro bloque: {}", self.section));
        }
        if !self.street.is_empty() {
            parts.push(format!("calle: {}", self.street));
        }
        if !self.trench.is_empty() {
            parts.push(format!("zanja: {}", self.trench));
        }
        parts.join(", ")
    }
}

fn field_matches(filter: &str, value: &str) -> bool {
    filter.is_empty() || filter == value
}

/// Unique values in first-seen order.
fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Option derivation
// ---------------------------------------------------------------------------

pub fn available_shifts(records: &[ParsedRecord]) -> Vec<String> {
    unique(records.iter().map(|r| r.shift.as_str()))
}

pub fn available_sections(records: &[ParsedRecord]) -> Vec<String> {
    unique(records.iter().map(|r| r.section.as_str()))
}

/// Streets present in `section`, or in every record when `section` is empty.
pub fn available_streets(records: &[ParsedRecord], section: &str) -> Vec<String> {
    unique(
        records
            .iter()
            .filter(|r| field_matches(section, &r.section))
            .map(|r| r.street.as_str()),
    )
}

/// Trenches present in `section` and `street`; empty arguments do not narrow.
pub fn available_trenches(records: &[ParsedRecord], section: &str, street: &str) -> Vec<String> {
    unique(
        records
            .iter()
            .filter(|r| field_matches(section, &r.section) && field_matches(street, &r.street))
            .map(|r| r.trench.as_str()),
    )
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

pub fn apply_filters(records: &[ParsedRecord], state: &FilterState) -> Vec<ParsedRecord> {
    records.iter().filter(|r| state.matches(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use crate::parser::parse_record;

    fn sample() -> Vec<ParsedRecord> {
        [
            "1/2024-01-01/Turno Dia/AB1_12/North/10/x",
            "2/2024-01-01/Turno Noche/AB1_13/North/5/x",
            "3/2024-01-02/Turno Dia/CD2_01/North/7/x",
            "4/2024-01-02/Turno Noche/EF301/South/2/x",
            "5/2024-01-03/Turno Dia/AB1_12/South/1/x",
        ]
        .iter()
        .map(|v| parse_record(&RawRecord::new(*v)))
        .collect()
    }

    fn ids(records: &[ParsedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_apply_filters_empty_state_returns_everything() {
        let recs = sample();
        assert_eq!(apply_filters(&recs, &FilterState::default()), recs);
    }

    #[test]
    fn test_apply_filters_single_field() {
        let recs = sample();
        let mut state = FilterState::default();
        state.select_shift("Turno Noche");
        assert_eq!(ids(&apply_filters(&recs, &state)), vec!["2", "4"]);

        let mut state = FilterState::default();
        state.select_section("South");
        assert_eq!(ids(&apply_filters(&recs, &state)), vec!["4", "5"]);
    }

    #[test]
    fn test_apply_filters_combines_fields() {
        let recs = sample();
        let mut state = FilterState::default();
        state.select_section("North");
        state.select_street("AB1");
        state.select_trench("12");
        assert_eq!(ids(&apply_filters(&recs, &state)), vec!["1"]);
    }

    #[test]
    fn test_apply_filters_is_case_sensitive() {
        let recs = sample();
        let mut state = FilterState::default();
        state.select_section("north");
        assert!(apply_filters(&recs, &state).is_empty());
    }

    #[test]
    fn test_select_section_resets_street_and_trench() {
        let mut state = FilterState::default();
        state.select_section("North");
        state.select_street("AB1");
        state.select_trench("12");
        state.select_section("South");
        assert_eq!(state.section, "South");
        assert!(state.street.is_empty());
        assert!(state.trench.is_empty());
    }

    #[test]
    fn test_select_street_resets_trench_only() {
        let mut state = FilterState::default();
        state.select_shift("Turno Dia");
        state.select_section("North");
        state.select_street("AB1");
        state.select_trench("12");
        state.select_street("CD2");
        assert_eq!(state.shift, "Turno Dia");
        assert_eq!(state.section, "North");
        assert!(state.trench.is_empty());
    }

    #[test]
    fn test_select_shift_keeps_other_fields() {
        let mut state = FilterState::default();
        state.select_section("North");
        state.select_street("AB1");
        state.select_shift("Turno Noche");
        assert_eq!(state.street, "AB1");
    }

    #[test]
    fn test_available_sections_first_seen_order() {
        assert_eq!(available_sections(&sample()), vec!["North", "South"]);
        assert_eq!(available_shifts(&sample()), vec!["Turno Dia", "Turno Noche"]);
    }

    #[test]
    fn test_available_streets_scoped_by_section() {
        let recs = sample();
        assert_eq!(available_streets(&recs, ""), vec!["AB1", "CD2", "EF3"]);
        assert_eq!(available_streets(&recs, "North"), vec!["AB1", "CD2"]);
        assert_eq!(available_streets(&recs, "South"), vec!["EF3", "AB1"]);
        assert!(available_streets(&recs, "West").is_empty());
    }

    #[test]
    fn test_available_trenches_scoped_by_section_and_street() {
        let recs = sample();
        assert_eq!(available_trenches(&recs, "North", "AB1"), vec!["12", "13"]);
        assert_eq!(available_trenches(&recs, "South", "AB1"), vec!["12"]);
        assert_eq!(available_trenches(&recs, "", "AB1"), vec!["12", "13"]);
        assert_eq!(available_trenches(&recs, "", ""), vec!["12", "13", "01"]);
    }

    #[test]
    fn test_describe_lists_active_filters() {
        let mut state = FilterState::default();
        assert!(state.is_empty());
        assert_eq!(state.describe(), "");
        state.select_shift("Turno Dia");
        state.select_section("North");
        assert_eq!(state.describe(), "turno: Turno Dia, macro bloque: North");
    }
}
