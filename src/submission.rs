use crate::config::ClientConfig;
use crate::error::SubmissionError;
use crate::validation::rules::MESSAGE_MAX;
use crate::validation::{Field, FieldError, ValidatedContact, ValidationErrors};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

/// Fallback error text when the server gives none
const GENERIC_FAILURE: &str = "Failed to send message";

/// Successful response of the contact endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the contact endpoint
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint_url: String,
    anon_key: String,
}

impl ContactClient {
    pub fn new(
        endpoint_url: &str,
        anon_key: &str,
        timeout: Duration,
    ) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint_url: endpoint_url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SubmissionError> {
        Self::new(
            &config.endpoint_url,
            &config.anon_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Send a validated record to the contact endpoint.
    ///
    /// Fields are re-trimmed and the message length re-checked before
    /// anything goes on the wire. Non-2xx responses carry the server's
    /// `error` text when it sent one.
    pub async fn submit(
        &self,
        record: &ValidatedContact,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let payload = prepare_payload(record)?;

        let response = self
            .http
            .post(&self.endpoint_url)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());

            warn!("Contact endpoint rejected submission ({}): {}", status, message);
            return Err(SubmissionError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let receipt: SubmissionReceipt = response.json().await?;
        if !receipt.success {
            return Err(SubmissionError::InvalidResponse(
                "success flag not set".to_string(),
            ));
        }

        info!("Contact message submitted (id: {})", receipt.id);
        Ok(receipt)
    }
}

/// Final trim plus the message-length backstop
fn prepare_payload(record: &ValidatedContact) -> Result<ValidatedContact, SubmissionError> {
    let phone = record
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let payload = ValidatedContact {
        name: record.name.trim().to_string(),
        email: record.email.trim().to_string(),
        phone,
        subject: record.subject.trim().to_string(),
        message: record.message.trim().to_string(),
    };

    if payload.message.chars().count() > MESSAGE_MAX {
        let mut errors = ValidationErrors::default();
        errors.add(Field::Message, vec![FieldError::TooLong { max: MESSAGE_MAX }]);
        return Err(SubmissionError::Validation(errors));
    }

    Ok(payload)
}
