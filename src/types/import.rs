//! Import batch types for spreadsheet patient import

use serde::{Deserialize, Serialize};

use super::patient::{PatientField, PatientRecord};

/// Single validation problem found in a normalized row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based position in the normalized row sequence
    pub row: usize,
    pub field: PatientField,
    pub message: String,
    pub value: Option<String>,
}

/// Outcome of validating every normalized row
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Rows admitted for import, in input order
    pub valid_data: Vec<PatientRecord>,
    pub errors: Vec<ValidationError>,
}

/// Request body for `POST /patients/import`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPatientsRequest {
    pub patients: Vec<PatientRecord>,
}

/// Successful response of `POST /patients/import`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPatientsResponse {
    pub imported: u32,
    pub errors: u32,
}

/// Error body returned by the Patient Service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorResponse {
    pub error: String,
}

/// Final counts shown to the user, taken from the service response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub total: u32,
    pub success: u32,
    pub errors: u32,
}

impl ImportResult {
    pub fn from_response(submitted: usize, response: ImportPatientsResponse) -> Self {
        Self {
            total: submitted as u32,
            success: response.imported,
            errors: response.errors,
        }
    }
}
