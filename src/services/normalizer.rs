//! Row normalization
//!
//! Coerces mapped cells into a typed `PatientRecord`. Coercion never fails a
//! row: a value that cannot be read is simply left unset.

use once_cell::sync::Lazy;
use regex::Regex;

use super::column_mapper::ColumnMapping;
use super::date_parser;
use super::workbook::{CellValue, RawRow};
use crate::types::{FieldKind, PatientField, PatientRecord, GENDER_FEMALE, GENDER_MALE};

/// Values this short are never taken as a fallback name
const MIN_FALLBACK_NAME_LEN: usize = 3;

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:[.,]\d+)?").expect("valid number pattern"));

/// Normalize every row and drop the ones without a name
pub fn normalize_rows(rows: &[RawRow], mapping: &ColumnMapping) -> Vec<PatientRecord> {
    rows.iter()
        .map(|row| normalize_row(row, mapping))
        .filter(PatientRecord::has_name)
        .collect()
}

pub fn normalize_row(row: &RawRow, mapping: &ColumnMapping) -> PatientRecord {
    let mut record = PatientRecord::default();

    for (field, header) in mapping.iter() {
        let Some(cell) = row.get(header) else {
            continue;
        };

        match field.kind() {
            FieldKind::Number => {
                if let Some(n) = coerce_number(cell) {
                    record.set_number(field, n);
                }
            }
            FieldKind::Date => {
                if let Some(date) = date_parser::disambiguate(cell) {
                    record.set_text(field, date);
                }
            }
            FieldKind::Gender => {
                if let Some(gender) = clean_text(cell).map(|g| normalize_gender(&g)) {
                    record.set_text(field, gender);
                }
            }
            FieldKind::Text => {
                if let Some(text) = clean_text(cell) {
                    record.set_text(field, text);
                }
            }
        }
    }

    if !mapping.contains(PatientField::Nama) {
        if let Some(name) = fallback_name(row) {
            record.nama = name;
        }
    }

    record
}

/// Trimmed text, `None` when nothing is left
fn clean_text(cell: &CellValue) -> Option<String> {
    let text = cell.to_text();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Native numbers pass through; text keeps its leading number ("165 cm" -> 165)
fn coerce_number(cell: &CellValue) -> Option<f64> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let m = LEADING_NUMBER.find(s.trim())?;
            m.as_str().replace(',', ".").parse().ok()?
        }
        CellValue::Empty | CellValue::Date(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Loose gender matching: any value containing "l" reads as male, then any
/// containing "p" as female. Anything else is kept as written.
pub fn normalize_gender(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    if lower.contains('l') || lower.contains("male") || lower.contains("pria") {
        GENDER_MALE.to_string()
    } else if lower.contains('p') || lower.contains("female") || lower.contains("wanita") {
        GENDER_FEMALE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// First text cell in column order long enough to be a name
fn fallback_name(row: &RawRow) -> Option<String> {
    row.values().find_map(|cell| match cell {
        CellValue::Text(s) if s.trim().chars().count() >= MIN_FALLBACK_NAME_LEN => {
            Some(s.trim().to_string())
        }
        _ => None,
    })
}
