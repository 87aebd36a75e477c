use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{ParsedRecord, SectionAggregate, StreetTotal};

/// Base letters only: lowercased, decomposed, combining marks removed.
fn fold(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Locale-style ordering in three passes: base letters (`Área < Bloque`),
/// then accents (`a < á`), then case with lowercase first (`ab < AB`).
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().nfd().cmp(b.to_lowercase().nfd()))
        .then_with(|| b.cmp(a))
}

/// Sum in ascending order so the result does not depend on record order.
fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[derive(Default)]
struct SectionAccumulator {
    values: Vec<f64>,
    streets: HashMap<String, Vec<f64>>,
}

/// Group records by section, then street, summing `value` at both levels.
/// Output is sorted by section, streets within a section by street.
pub fn aggregate(records: &[ParsedRecord]) -> Vec<SectionAggregate> {
    let mut sections: HashMap<&str, SectionAccumulator> = HashMap::new();
    for r in records {
        let acc = sections.entry(r.section.as_str()).or_default();
        acc.values.push(r.value);
        acc.streets.entry(r.street.clone()).or_default().push(r.value);
    }

    let mut out: Vec<SectionAggregate> = sections
        .into_iter()
        .map(|(section, acc)| {
            let mut streets: Vec<StreetTotal> = acc
                .streets
                .into_iter()
                .map(|(street, values)| StreetTotal {
                    street,
                    total_value: stable_sum(values),
                })
                .collect();
            streets.sort_by(|a, b| collate(&a.street, &b.street));
            SectionAggregate {
                section: section.to_string(),
                total_value: stable_sum(acc.values),
                streets,
            }
        })
        .collect();
    out.sort_by(|a, b| collate(&a.section, &b.section));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use crate::parser::parse_record;

    fn records(values: &[&str]) -> Vec<ParsedRecord> {
        values.iter().map(|v| parse_record(&RawRecord::new(*v))).collect()
    }

    #[test]
    fn test_aggregate_end_to_end_example() {
        let recs = records(&[
            "1/2024-01-01/Turno Dia/AB1_12/North/10.5/x",
            "2/2024-01-01/Turno Noche/AB1_13/North/5/x",
        ]);
        let sums = aggregate(&recs);
        assert_eq!(
            sums,
            vec![SectionAggregate {
                section: "North".to_string(),
                total_value: 15.5,
                streets: vec![StreetTotal {
                    street: "AB1".to_string(),
                    total_value: 15.5,
                }],
            }]
        );
    }

    #[test]
    fn test_aggregate_sorts_sections_and_streets() {
        let recs = records(&[
            "1/d/s/ZZ9_1/South/1/x",
            "2/d/s/AA1_1/South/2/x",
            "3/d/s/MM5_1/North/3/x",
            "4/d/s/BB2_1/South/4/x",
        ]);
        let sums = aggregate(&recs);
        let sections: Vec<&str> = sums.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(sections, vec!["North", "South"]);
        let streets: Vec<&str> = sums[1].streets.iter().map(|s| s.street.as_str()).collect();
        assert_eq!(streets, vec!["AA1", "BB2", "ZZ9"]);
        assert_eq!(sums[1].total_value, 7.0);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut recs = records(&[
            "1/d/s/AB1_1/North/1.25/x",
            "2/d/s/AB2_1/North/2/x",
            "3/d/s/CD1_1/South/3/x",
            "4/d/s/AB1_2/North/4/x",
            "5/d/s/CD1_2/South/0.5/x",
        ]);
        let forward = aggregate(&recs);
        recs.reverse();
        assert_eq!(aggregate(&recs), forward);
        recs.swap(0, 3);
        recs.swap(1, 4);
        assert_eq!(aggregate(&recs), forward);
    }

    #[test]
    fn test_aggregate_empty_keys_form_their_own_group() {
        let recs = records(&["1/d/s//  /3/x", "2/d/s/AB1_1//4/x"]);
        let sums = aggregate(&recs);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[0].section, "");
        assert_eq!(sums[0].total_value, 4.0);
        assert_eq!(sums[1].section, "  ");
        assert_eq!(sums[1].streets[0].street, "");
    }

    #[test]
    fn test_aggregate_section_total_spans_streets() {
        let recs = records(&["1/d/s/AB1_1/N/1/x", "2/d/s/AB2_1/N/2/x", "3/d/s/AB3_1/N/bad/x"]);
        let sums = aggregate(&recs);
        assert_eq!(sums[0].total_value, 3.0);
        assert_eq!(sums[0].streets.len(), 3);
        assert_eq!(sums[0].streets[2].total_value, 0.0);
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_collate_is_case_insensitive_first() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("ab", "AB"), Ordering::Less);
        assert_eq!(collate("B1", "a2"), Ordering::Greater);
        assert_eq!(collate("x", "x"), Ordering::Equal);
    }

    #[test]
    fn test_aggregate_inexact_values_are_order_independent() {
        let mut recs = records(&[
            "1/d/s/AB1_1/N/0.1/x",
            "2/d/s/AB1_2/N/0.2/x",
            "3/d/s/AB1_3/N/0.3/x",
        ]);
        let forward = aggregate(&recs);
        recs.reverse();
        let backward = aggregate(&recs);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].total_value.to_bits(), backward[0].total_value.to_bits());
        recs.swap(0, 1);
        assert_eq!(aggregate(&recs), forward);
    }

    #[test]
    fn test_aggregate_sorts_accented_sections_by_base_letter() {
        let recs = records(&[
            "1/d/s/AB1_1/Zona/1/x",
            "2/d/s/AB1_1/Área/1/x",
            "3/d/s/AB1_1/Bloque/1/x",
        ]);
        let sections: Vec<String> = aggregate(&recs).into_iter().map(|s| s.section).collect();
        assert_eq!(sections, vec!["Área", "Bloque", "Zona"]);
    }

    #[test]
    fn test_collate_accents_break_ties_before_case() {
        assert_eq!(collate("cana", "caña"), Ordering::Less);
        assert_eq!(collate("Éste", "este"), Ordering::Greater);
        assert_eq!(collate("área", "Area"), Ordering::Greater);
        assert_eq!(collate("ñu", "oso"), Ordering::Less);
    }
}
