use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Format file '{0}' tidak didukung (gunakan .xlsx, .xls, atau .csv)")]
    UnsupportedFormat(String),
    #[error("Gagal membaca file, periksa kembali formatnya: {0}")]
    Unreadable(String),
    #[error("File kosong, tidak ada data pasien")]
    EmptyFile,
    #[error("Gagal membaca file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tidak ada data valid untuk diimpor")]
    NothingToImport,
    #[error("{0}")]
    Server(String),
    #[error("Gagal menghubungi server: {0}")]
    Network(String),
}

impl ImportError {
    /// File errors end the attempt; the user has to pick a file again
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            ImportError::UnsupportedFormat(_)
                | ImportError::Unreadable(_)
                | ImportError::EmptyFile
                | ImportError::Io(_)
        )
    }

    /// Submission failures keep the session; the same rows can be sent again
    pub fn is_retryable(&self) -> bool {
        matches!(self, ImportError::Server(_) | ImportError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_shows_literal_message() {
        let err = ImportError::Server("Token kedaluwarsa".to_string());
        assert_eq!(err.to_string(), "Token kedaluwarsa");
        assert!(!err.is_file_error());
    }

    #[test]
    fn test_file_errors_are_classified() {
        assert!(ImportError::EmptyFile.is_file_error());
        assert!(ImportError::Unreadable("bad zip".into()).is_file_error());
        assert!(!ImportError::NothingToImport.is_file_error());
    }

    #[test]
    fn test_submission_errors_are_retryable() {
        assert!(ImportError::Network("timeout".into()).is_retryable());
        assert!(ImportError::Server("Server sibuk".into()).is_retryable());
        assert!(!ImportError::NothingToImport.is_retryable());
        assert!(!ImportError::EmptyFile.is_retryable());
    }
}
