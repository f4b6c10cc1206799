//! Patient Service client
//!
//! The importer talks to a single endpoint, `POST /patients/import`. The
//! call is made once per attempt, without retry and without a timeout.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ImportError;
use crate::types::{ImportPatientsRequest, ImportPatientsResponse, ServiceErrorResponse};

const USER_AGENT: &str = concat!("klinik-import/", env!("CARGO_PKG_VERSION"));

/// Patient Service abstraction (HTTP in production, mock in tests)
#[async_trait]
pub trait PatientService: Send + Sync {
    /// Submit one batch of patients
    async fn import_patients(
        &self,
        request: &ImportPatientsRequest,
    ) -> Result<ImportPatientsResponse, ImportError>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Bearer-authenticated HTTP client for the Patient Service
pub struct HttpPatientService {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpPatientService {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ImportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ImportError::Network(e.to_string()))?;

        Ok(Self::with_client(client, base_url, token))
    }

    pub fn with_client(client: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/patients/import", self.base_url)
    }
}

#[async_trait]
impl PatientService for HttpPatientService {
    async fn import_patients(
        &self,
        request: &ImportPatientsRequest,
    ) -> Result<ImportPatientsResponse, ImportError> {
        let url = self.endpoint();
        debug!("POST {} with {} patients", url, request.patients.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| ImportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ImportError::Network(e.to_string()))?;

        parse_import_response(status, &body)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Interpret the service reply. Non-2xx replies surface the service's own
/// `error` string when it sent one.
pub fn parse_import_response(status: u16, body: &str) -> Result<ImportPatientsResponse, ImportError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|e| ImportError::Server(format!("Respons server tidak valid: {}", e)));
    }

    let message = serde_json::from_str::<ServiceErrorResponse>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("Server mengembalikan status {}", status));
    Err(ImportError::Server(message))
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted Patient Service: replies are handed out in order
    #[derive(Default)]
    pub struct MockPatientService {
        replies: Mutex<VecDeque<Result<ImportPatientsResponse, String>>>,
        requests: Mutex<Vec<ImportPatientsRequest>>,
    }

    impl MockPatientService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply_ok(self, imported: u32, errors: u32) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(ImportPatientsResponse { imported, errors }));
            self
        }

        pub fn reply_err(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<ImportPatientsRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PatientService for MockPatientService {
        async fn import_patients(
            &self,
            request: &ImportPatientsRequest,
        ) -> Result<ImportPatientsResponse, ImportError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(ImportError::Server(message)),
                None => Err(ImportError::Network("no scripted reply".to_string())),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }
}
