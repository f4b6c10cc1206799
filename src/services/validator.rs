//! Row validation
//!
//! Only required-field violations keep a row out of the import. Phone and
//! date problems are reported, and the row is imported with the value as-is.

use once_cell::sync::Lazy;
use regex::Regex;

use super::date_parser;
use crate::types::{ImportProfile, PatientField, PatientRecord, ValidationError, ValidationOutcome};

pub const MSG_INVALID_PHONE: &str = "Format telepon tidak valid";
pub const MSG_INVALID_DATE: &str = "Format tanggal tidak valid";

const PHONE_FIELDS: [PatientField; 2] = [PatientField::Telepon, PatientField::TeleponDarurat];
const DATE_FIELDS: [PatientField; 2] = [PatientField::TanggalLahir, PatientField::TanggalMendaftar];

/// Indonesian numbers: +62, 62 or 0 prefix, then 8-15 digits, spaces or dashes
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+62|62|0)[0-9\s\-]{8,15}$").expect("valid phone pattern"));

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone.trim())
}

pub fn validate(records: Vec<PatientRecord>, profile: &ImportProfile) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for (idx, record) in records.into_iter().enumerate() {
        let row = idx + 1;
        let mut blocked = false;

        for &field in &profile.required {
            let value = record.text(field).unwrap_or_default();
            if value.trim().is_empty() {
                blocked = true;
                outcome.errors.push(ValidationError {
                    row,
                    field,
                    message: format!("{} wajib diisi", field.label()),
                    value: Some(value.to_string()),
                });
            }
        }

        for field in PHONE_FIELDS {
            if let Some(phone) = record.text(field) {
                if !is_valid_phone(phone) {
                    outcome.errors.push(ValidationError {
                        row,
                        field,
                        message: MSG_INVALID_PHONE.to_string(),
                        value: Some(phone.to_string()),
                    });
                }
            }
        }

        for field in DATE_FIELDS {
            if let Some(date) = record.text(field) {
                if !date_parser::is_valid_date_string(date) {
                    outcome.errors.push(ValidationError {
                        row,
                        field,
                        message: MSG_INVALID_DATE.to_string(),
                        value: Some(date.to_string()),
                    });
                }
            }
        }

        if !blocked {
            outcome.valid_data.push(record);
        }
    }

    outcome
}
