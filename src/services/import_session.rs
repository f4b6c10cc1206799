//! Import session
//!
//! One session holds the outcome of reading one file:
//! decode -> map -> normalize -> validate, then a single batch submission.
//! A failed submission leaves the validated rows in place so the submit
//! step can be repeated without reading the file again.

use std::path::Path;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::column_mapper::{map_columns, ColumnMapping};
use super::date_parser::display_to_storage;
use super::normalizer::normalize_rows;
use super::patient_api::PatientService;
use super::validator::validate;
use super::workbook::{self, FileFormat, RawRow};
use crate::error::ImportError;
use crate::types::{
    ImportPatientsRequest, ImportProfile, ImportResult, PatientRecord, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Validated, not yet submitted (or last submission failed)
    Ready,
    Completed(ImportResult),
}

pub struct ImportSession {
    pub id: Uuid,
    pub file_name: String,
    profile: ImportProfile,
    headers: Vec<String>,
    mapping: ColumnMapping,
    rows_read: usize,
    valid_data: Vec<PatientRecord>,
    errors: Vec<ValidationError>,
    state: SessionState,
}

impl ImportSession {
    /// Read and prepare a file from disk
    pub async fn from_file(path: &Path, profile: ImportProfile) -> Result<Self, ImportError> {
        let format = FileFormat::from_path(path)?;
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(&file_name, &bytes, format, profile)
    }

    /// Prepare an in-memory upload
    pub fn from_bytes(
        file_name: &str,
        bytes: &[u8],
        format: FileFormat,
        profile: ImportProfile,
    ) -> Result<Self, ImportError> {
        let rows = workbook::decode(bytes, format)?;
        Ok(Self::from_rows(file_name.to_string(), rows, profile))
    }

    fn from_rows(file_name: String, rows: Vec<RawRow>, profile: ImportProfile) -> Self {
        let id = Uuid::new_v4();
        let headers: Vec<String> = rows
            .first()
            .map(|r| r.headers().map(str::to_string).collect())
            .unwrap_or_default();
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

        let mapping = map_columns(&header_refs, &profile);
        let records = normalize_rows(&rows, &mapping);
        let outcome = validate(records, &profile);

        info!(
            "Import session {} for '{}': {} rows read, {} columns mapped, {} importable, {} validation errors",
            id,
            file_name,
            rows.len(),
            mapping.len(),
            outcome.valid_data.len(),
            outcome.errors.len()
        );

        Self {
            id,
            file_name,
            profile,
            headers,
            mapping,
            rows_read: rows.len(),
            valid_data: outcome.valid_data,
            errors: outcome.errors,
            state: SessionState::Ready,
        }
    }

    pub fn profile(&self) -> &ImportProfile {
        &self.profile
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn unmapped_headers(&self) -> Vec<&str> {
        let headers: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        self.mapping.unmapped(&headers)
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Rows dropped before validation (no name) or blocked by a required field
    pub fn skipped_rows(&self) -> usize {
        self.rows_read - self.valid_data.len()
    }

    pub fn valid_data(&self) -> &[PatientRecord] {
        &self.valid_data
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Request body with dates converted to `YYYY-MM-DD`
    pub fn storage_request(&self) -> ImportPatientsRequest {
        let patients = self
            .valid_data
            .iter()
            .cloned()
            .map(|mut record| {
                record.tanggal_lahir = record.tanggal_lahir.map(to_storage);
                record.tanggal_mendaftar = record.tanggal_mendaftar.map(to_storage);
                record
            })
            .collect();
        ImportPatientsRequest { patients }
    }

    /// Submit the importable rows in one call.
    ///
    /// Counts come from the service reply. On failure the session stays
    /// `Ready` with its rows, so calling `submit` again is a retry.
    pub async fn submit(&mut self, service: &dyn PatientService) -> Result<ImportResult, ImportError> {
        if let SessionState::Completed(result) = self.state {
            warn!("Import session {} already submitted", self.id);
            return Ok(result);
        }
        if self.valid_data.is_empty() {
            return Err(ImportError::NothingToImport);
        }

        let request = self.storage_request();
        let submitted = request.patients.len();
        info!(
            "Import session {}: submitting {} patients via {} service",
            self.id,
            submitted,
            service.name()
        );

        match service.import_patients(&request).await {
            Ok(response) => {
                let result = ImportResult::from_response(submitted, response);
                self.state = SessionState::Completed(result);
                info!(
                    "Import session {} completed: {}/{} imported, {} errors",
                    self.id, result.success, result.total, result.errors
                );
                Ok(result)
            }
            Err(e) => {
                warn!("Import session {} submission failed: {}", self.id, e);
                self.state = SessionState::Ready;
                Err(e)
            }
        }
    }

    /// Human-readable summary, listing at most `error_limit` validation errors
    pub fn report(&self, error_limit: usize) -> String {
        let mut report = format!("Import pasien dari file '{}'\n", self.file_name);
        report.push_str(&format!("Profil: {}\n", self.profile.name));
        report.push_str("Kolom terbaca:\n");
        for (field, header) in self.mapping.iter() {
            report.push_str(&format!("  {} <- '{}'\n", field, header));
        }
        let unmapped = self.unmapped_headers();
        if !unmapped.is_empty() {
            report.push_str(&format!("Kolom diabaikan: {}\n", unmapped.join(", ")));
        }
        report.push_str(&format!("Baris data: {}\n", self.rows_read));
        report.push_str(&format!("Siap diimpor: {}\n", self.valid_data.len()));
        report.push_str(&format!("Dilewati: {}\n", self.skipped_rows()));
        report.push_str(&format!("Peringatan validasi: {}\n", self.errors.len()));

        if !self.errors.is_empty() {
            report.push_str("\nDetail:\n");
            for (i, err) in self.errors.iter().take(error_limit).enumerate() {
                report.push_str(&format!(
                    "{}. Baris {}, {}: {}",
                    i + 1,
                    err.row,
                    err.field,
                    err.message
                ));
                if let Some(value) = err.value.as_deref().filter(|v| !v.is_empty()) {
                    report.push_str(&format!(" ('{}')", value));
                }
                report.push('\n');
            }
            if self.errors.len() > error_limit {
                report.push_str(&format!(
                    "... dan {} peringatan lainnya\n",
                    self.errors.len() - error_limit
                ));
            }
        }

        if let SessionState::Completed(result) = self.state {
            report.push_str(&format!(
                "\nHasil: total {}, berhasil {}, gagal {}\n",
                result.total, result.success, result.errors
            ));
        }

        report
    }
}

fn to_storage(date: String) -> String {
    display_to_storage(&date).unwrap_or(date)
}
