//! Configuration management

use anyhow::{Context, Result};

use crate::defaults::{DEFAULT_LOGS_DIR, DEFAULT_PATIENT_API_URL};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Patient Service base URL, without trailing slash
    pub patient_api_url: String,

    /// Bearer token for the Patient Service (only needed to submit)
    pub patient_api_token: Option<String>,

    /// Directory for rotated log files
    pub logs_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let patient_api_url = std::env::var("PATIENT_API_URL")
            .unwrap_or_else(|_| DEFAULT_PATIENT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !(patient_api_url.starts_with("http://") || patient_api_url.starts_with("https://")) {
            anyhow::bail!(
                "PATIENT_API_URL must be an http(s) URL (current: '{}')",
                patient_api_url
            );
        }

        let patient_api_token = std::env::var("PATIENT_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| DEFAULT_LOGS_DIR.to_string());

        Ok(Self {
            patient_api_url,
            patient_api_token,
            logs_dir,
        })
    }

    /// Token for submission; missing token is a configuration error
    pub fn require_token(&self) -> Result<&str> {
        self.patient_api_token
            .as_deref()
            .context("PATIENT_API_TOKEN must be set to submit an import")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_defaults_when_unset() {
        std::env::remove_var("PATIENT_API_URL");
        std::env::remove_var("PATIENT_API_TOKEN");

        let config = Config::from_env().unwrap();
        assert_eq!(config.patient_api_url, DEFAULT_PATIENT_API_URL);
        assert!(config.patient_api_token.is_none());
        assert!(config.require_token().is_err());
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_url_trailing_slash_trimmed() {
        std::env::set_var("PATIENT_API_URL", "https://klinik.example/api/");

        let config = Config::from_env().unwrap();
        assert_eq!(config.patient_api_url, "https://klinik.example/api");

        std::env::remove_var("PATIENT_API_URL");
    }

    #[test]
    fn test_require_token() {
        let config = Config {
            patient_api_url: DEFAULT_PATIENT_API_URL.to_string(),
            patient_api_token: Some("secret".to_string()),
            logs_dir: DEFAULT_LOGS_DIR.to_string(),
        };
        assert_eq!(config.require_token().unwrap(), "secret");
    }
}
