use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::export::{DATA_HEADER, SUMS_HEADER};
use crate::filter::FilterState;
use crate::fmt::total;
use crate::models::{ParsedRecord, SectionAggregate};
use crate::parser::ParseIssue;

// ---------------------------------------------------------------------------
// Pure formatting functions (view data → String)
// ---------------------------------------------------------------------------

pub fn format_sums(sums: &[SectionAggregate]) -> String {
    let mut table = Table::new();
    table.set_header(SUMS_HEADER.to_vec());

    for s in sums {
        table.add_row(vec![
            Cell::new(format!("{} - Total: {}", s.section, total(s.total_value)).bold()),
            Cell::new(""),
            Cell::new(""),
        ]);
        for st in &s.streets {
            table.add_row(vec![
                Cell::new(&s.section),
                Cell::new(&st.street),
                Cell::new(total(st.total_value)),
            ]);
        }
    }

    format!("Suma Total por Macro bloque y Calle\n{table}")
}

pub fn format_records(records: &[ParsedRecord], filters: &FilterState) -> String {
    let heading = if filters.is_empty() {
        format!("Cartir_total Data ({} records)", records.len())
    } else {
        format!(
            "Cartir_total Data ({} records | {})",
            records.len(),
            filters.describe()
        )
    };
    if records.is_empty() {
        return format!("{heading}\nNo records found.");
    }

    let mut table = Table::new();
    table.set_header(DATA_HEADER.to_vec());
    for r in records {
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(&r.date),
            Cell::new(&r.shift),
            Cell::new(&r.street),
            Cell::new(&r.trench),
            Cell::new(&r.section),
            Cell::new(total(r.value)),
        ]);
    }
    format!("{heading}\n{table}")
}

/// One titled list per filter level; empty option values are shown as `(empty)`.
pub fn format_options(groups: &[(&str, Vec<String>)]) -> String {
    let mut out = Vec::new();
    for (title, values) in groups {
        let mut block = format!("{}", title.bold());
        if values.is_empty() {
            block.push_str("\n  (none)");
        }
        for v in values {
            let shown = if v.is_empty() { "(empty)" } else { v.as_str() };
            block.push_str(&format!("\n  {shown}"));
        }
        out.push(block);
    }
    out.join("\n\n")
}

pub fn format_issues(issues: &[ParseIssue], record_count: usize) -> String {
    if issues.is_empty() {
        return format!("All {record_count} records are well-formed.");
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Value", "Problem"]);
    for i in issues {
        table.add_row(vec![
            Cell::new(i.index + 1),
            Cell::new(&i.raw),
            Cell::new(i.issue.to_string()),
        ]);
    }
    let note = "Malformed values count as 0 in every total.".yellow();
    format!(
        "Malformed Records ({} of {record_count})\n{table}\n{note}",
        issues.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{parse_document, Dataset};

    fn dataset() -> Dataset {
        Dataset::from_raw(
            &parse_document(
                r#"{"Items": [
                    {"Value": "1/2024-01-01/Turno Dia/AB1_12/North/10.5/x"},
                    {"Value": "2/2024-01-01/Turno Noche/AB1_13/North/5/x"},
                    {"Value": "3/2024-01-02/Turno Dia/CD2_01/South/bad/x"}
                ]}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_format_sums_shows_section_totals() {
        colored::control::set_override(false);
        let out = format_sums(&dataset().sums());
        assert!(out.contains("North - Total: 16"), "got: {out}");
        assert!(out.contains("South - Total: 0"), "got: {out}");
        assert!(out.contains("Macro bloque"));
    }

    #[test]
    fn test_format_records_lists_rows() {
        let ds = dataset();
        let out = format_records(&ds.records, &FilterState::default());
        assert!(out.starts_with("Cartir_total Data (3 records)"));
        assert!(out.contains("Turno Noche"));
        assert!(out.contains("CD2"));
    }

    #[test]
    fn test_format_records_empty_view() {
        let mut state = FilterState::default();
        state.select_section("West");
        let out = format_records(&[], &state);
        assert!(out.contains("macro bloque: West"));
        assert!(out.ends_with("No records found."));
    }

    #[test]
    fn test_format_options_marks_empty_values() {
        colored::control::set_override(false);
        let out = format_options(&[("Calle", vec!["AB1".into(), String::new()]), ("Zanja", vec![])]);
        assert!(out.contains("  AB1"));
        assert!(out.contains("  (empty)"));
        assert!(out.contains("Zanja\n  (none)"));
    }

    #[test]
    fn test_format_issues() {
        let ds = dataset();
        let out = format_issues(&ds.issues, ds.len());
        assert!(out.contains("Malformed Records (1 of 3)"));
        assert!(out.contains("\"bad\" is not a number"));
        assert_eq!(format_issues(&[], 2), "All 2 records are well-formed.");
    }
}
