use thiserror::Error;

use crate::models::{ParsedRecord, RawRecord};

pub const FIELD_COUNT: usize = 7;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split a code into (street, trench).
///
/// `AB1_12` splits at the first underscore; `AB112` takes a fixed three
/// character street prefix. Codes shorter than three characters are all street.
pub fn split_code(code: &str) -> (String, String) {
    if let Some((street, trench)) = code.split_once('_') {
        return (street.to_string(), trench.to_string());
    }
    match code.char_indices().nth(3) {
        Some((idx, _)) => (code[..idx].to_string(), code[idx..].to_string()),
        None => (code.to_string(), String::new()),
    }
}

/// Read the longest numeric prefix of `raw`, ignoring leading whitespace.
/// `"10.5kg"` → 10.5, `"N/A"` → None.
fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // An exponent only counts when it carries at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Lenient numeric parse: anything unreadable or infinite counts as zero.
pub fn parse_value(raw: &str) -> f64 {
    match parse_leading_number(raw) {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Lenient parse
// ---------------------------------------------------------------------------

/// Parse one record. Never fails: missing fields are empty, extra fields are
/// dropped, and a non-numeric value becomes 0.
pub fn parse_record(raw: &RawRecord) -> ParsedRecord {
    let mut fields = raw.value.split('/');
    let mut next = || fields.next().unwrap_or("").to_string();

    let id = next();
    let date = next();
    let shift = next();
    let code = next();
    let section = next();
    let value1 = next();
    let raw_value2 = next();

    let (street, trench) = split_code(&code);
    ParsedRecord {
        id,
        date,
        shift,
        street,
        trench,
        section,
        value: parse_value(&value1),
        raw_value2,
    }
}

// ---------------------------------------------------------------------------
// Strict parse
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordIssue {
    #[error("expected 7 fields, found {found}")]
    FieldCount { found: usize },

    #[error("value {value:?} is not a number")]
    NonNumericValue { value: String },
}

/// Parse one record, rejecting anything the lenient parser would paper over.
pub fn parse_record_strict(raw: &RawRecord) -> std::result::Result<ParsedRecord, RecordIssue> {
    let fields: Vec<&str> = raw.value.split('/').collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordIssue::FieldCount { found: fields.len() });
    }
    let value1 = fields[5].trim();
    match value1.parse::<f64>() {
        Ok(v) if v.is_finite() => {}
        _ => {
            return Err(RecordIssue::NonNumericValue {
                value: fields[5].to_string(),
            })
        }
    }
    Ok(parse_record(raw))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseIssue {
    /// Position of the record in the source document.
    pub index: usize,
    pub raw: String,
    pub issue: RecordIssue,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<ParsedRecord>,
    pub issues: Vec<ParseIssue>,
}

/// Parse every record leniently and collect what the strict parser rejects.
/// Rejected records still appear in `records`, valued the lenient way.
pub fn parse_records(raws: &[RawRecord]) -> ParseOutcome {
    let mut outcome = ParseOutcome {
        records: Vec::with_capacity(raws.len()),
        issues: Vec::new(),
    };
    for (index, raw) in raws.iter().enumerate() {
        match parse_record_strict(raw) {
            Ok(record) => outcome.records.push(record),
            Err(issue) => {
                outcome.issues.push(ParseIssue {
                    index,
                    raw: raw.value.clone(),
                    issue,
                });
                outcome.records.push(parse_record(raw));
            }
        }
    }
    outcome
}
