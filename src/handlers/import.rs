//! `import` command: read, report, submit

use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use super::resolve_profile;
use crate::config::Config;
use crate::defaults::DISPLAY_ERROR_LIMIT;
use crate::error::ImportError;
use crate::services::import_session::ImportSession;
use crate::services::patient_api::{HttpPatientService, PatientService};
use crate::types::{ImportResult, PatientField};

pub async fn handle_import(config: &Config, file: &Path, profile: &str, dry_run: bool) -> Result<()> {
    let profile = resolve_profile(profile)?;
    let mut session = match ImportSession::from_file(file, profile).await {
        Ok(session) => session,
        Err(e) => {
            if let Some(hint) = file_error_hint(&e) {
                eprintln!("{}", hint);
            }
            return Err(e.into());
        }
    };

    for warning in mapping_warnings(&session) {
        warn!("Import session {}: {}", session.id, warning);
    }
    println!("{}", session.report(DISPLAY_ERROR_LIMIT));

    if dry_run {
        info!(
            "Import session {} ({}): dry run, {} rows read, {} validation errors, nothing submitted",
            session.id,
            session.profile().name,
            session.rows_read(),
            session.errors().len()
        );
        return Ok(());
    }
    if session.valid_data().is_empty() {
        return Err(ImportError::NothingToImport.into());
    }

    let service = HttpPatientService::new(&config.patient_api_url, config.require_token()?)?;
    let interactive = std::io::stdin().is_terminal();

    let result = submit_with_retry(&mut session, &service, |err| {
        interactive && confirm_retry(err)
    })
    .await?;

    println!(
        "Berhasil mengimpor {} dari {} pasien ({} gagal)",
        result.success, result.total, result.errors
    );
    Ok(())
}

/// File errors end the attempt; the user has to pick another file
fn file_error_hint(err: &ImportError) -> Option<&'static str> {
    err.is_file_error()
        .then_some("Periksa file lalu pilih kembali file .xlsx, .xls, atau .csv yang benar.")
}

/// Problems with the header row worth surfacing before submission
fn mapping_warnings(session: &ImportSession) -> Vec<String> {
    let mapping = session.mapping();
    if mapping.is_empty() {
        return vec![format!(
            "no column matches profile '{}'",
            session.profile().name
        )];
    }
    if !mapping.contains(PatientField::Nama) {
        return vec!["no name column, names taken from the first text cell".to_string()];
    }
    Vec::new()
}

/// Submit the session, asking `retry` after each retryable failure
pub async fn submit_with_retry<F>(
    session: &mut ImportSession,
    service: &dyn PatientService,
    mut retry: F,
) -> Result<ImportResult, ImportError>
where
    F: FnMut(&ImportError) -> bool,
{
    let mut attempt = 1;
    loop {
        match session.submit(service).await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() && retry(&e) => {
                attempt += 1;
                warn!("Import session {}: retrying, attempt {}", session.id, attempt);
            }
            Err(e) => return Err(e),
        }
    }
}

fn confirm_retry(err: &ImportError) -> bool {
    eprint!("Gagal mengirim data: {}. Coba lagi? [y/N] ", err);
    std::io::stderr().flush().ok();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "ya" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::full_profile;
    use crate::services::import_session::SessionState;
    use crate::services::patient_api::mock::MockPatientService;
    use crate::services::workbook::FileFormat;

    fn session() -> ImportSession {
        let csv = "Nama,Telepon\nAni,081234567890\nBudi,081298765432\n";
        ImportSession::from_bytes("pasien.csv", csv.as_bytes(), FileFormat::Csv, full_profile())
            .unwrap()
    }

    #[test]
    fn test_file_errors_get_a_hint() {
        assert!(file_error_hint(&ImportError::EmptyFile).is_some());
        assert!(file_error_hint(&ImportError::UnsupportedFormat("pdf".into())).is_some());
        assert!(file_error_hint(&ImportError::Network("refused".into())).is_none());
    }

    #[test]
    fn test_mapping_warnings() {
        assert!(mapping_warnings(&session()).is_empty());

        let csv = "Identitas,Telepon\nHadi Santoso,081234567890\n";
        let fallback =
            ImportSession::from_bytes("pasien.csv", csv.as_bytes(), FileFormat::Csv, full_profile())
                .unwrap();
        assert_eq!(mapping_warnings(&fallback).len(), 1);

        let csv = "Email,Umur\nani@example.com,30\n";
        let unmapped =
            ImportSession::from_bytes("pasien.csv", csv.as_bytes(), FileFormat::Csv, full_profile())
                .unwrap();
        assert!(mapping_warnings(&unmapped)[0].contains("lengkap"));
    }

    #[tokio::test]
    async fn test_retry_after_server_error() {
        let mut session = session();
        let service = MockPatientService::new().reply_err("Server sibuk").reply_ok(2, 0);
        let mut asked = 0;

        let result = submit_with_retry(&mut session, &service, |err| {
            asked += 1;
            assert_eq!(err.to_string(), "Server sibuk");
            true
        })
        .await
        .unwrap();

        assert_eq!(asked, 1);
        assert_eq!(result, ImportResult { total: 2, success: 2, errors: 0 });
        assert_eq!(service.requests().len(), 2);
        assert_eq!(service.requests()[0], service.requests()[1]);
    }

    #[tokio::test]
    async fn test_declined_retry_keeps_session_ready() {
        let mut session = session();
        let service = MockPatientService::new().reply_err("Gagal menyimpan");

        let err = submit_with_retry(&mut session, &service, |_| false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Gagal menyimpan");
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.valid_data().len(), 2);
    }

    #[tokio::test]
    async fn test_nothing_to_import_is_not_retried() {
        let csv = "Nama,Telepon\n,081234567890\n";
        let mut session =
            ImportSession::from_bytes("kosong.csv", csv.as_bytes(), FileFormat::Csv, full_profile())
                .unwrap();
        let service = MockPatientService::new();

        let err = submit_with_retry(&mut session, &service, |_| panic!("must not ask"))
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::NothingToImport));
        assert!(service.requests().is_empty());
    }
}
