//! Error taxonomy shared by the client-side pipeline and the contact endpoint.
//!
//! - Validation failures are recoverable and live in [`crate::validation`].
//! - [`SubmissionError`] covers everything that can go wrong after a record
//!   passed validation and is handed to the network.
//! - [`EndpointError`] is the server-side view; it maps onto HTTP responses
//!   and never carries internal causes to the caller.

use crate::endpoint::{cors_headers, REQUIRED_FIELDS};
use crate::validation::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure reading or writing durable client storage
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Failure submitting a validated record to the contact endpoint
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The record failed the pre-flight checks; show field errors, keep the form
    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the server-provided error if any
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl SubmissionError {
    /// True for errors the user fixes by editing the form
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmissionError::Validation(_))
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubmissionError::Timeout
        } else if err.is_decode() {
            SubmissionError::InvalidResponse(err.to_string())
        } else {
            SubmissionError::Network(err.to_string())
        }
    }
}

/// Failure delivering a staff notification
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook returned HTTP {0}")]
    Status(u16),

    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl NotifyError {
    /// Server errors and transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Status(status) => *status >= 500,
            NotifyError::Request(_) => true,
        }
    }
}

/// Server-side failure of the contact endpoint
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid JSON body")]
    MalformedPayload,

    #[error("Unauthorized")]
    Unauthorized,

    /// Persistence failed; the cause is logged, never returned
    #[error("Failed to save message")]
    Persistence(#[source] anyhow::Error),
}

impl EndpointError {
    pub fn status(&self) -> StatusCode {
        match self {
            EndpointError::Unauthorized => StatusCode::UNAUTHORIZED,
            EndpointError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let body = match &self {
            EndpointError::MissingFields => json!({
                "error": self.to_string(),
                "required": REQUIRED_FIELDS,
            }),
            EndpointError::Persistence(cause) => {
                error!("Failed to save contact message: {:#}", cause);
                json!({ "error": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (self.status(), cors_headers(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_error_display() {
        let err = SubmissionError::Server {
            status: 500,
            message: "Failed to save message".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (500): Failed to save message");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_submission_error_is_validation() {
        let err = SubmissionError::Validation(ValidationErrors::default());
        assert!(err.is_validation());
    }

    #[test]
    fn test_notify_error_retryable() {
        assert!(NotifyError::Status(502).is_retryable());
        assert!(!NotifyError::Status(400).is_retryable());
    }

    #[test]
    fn test_endpoint_error_status() {
        assert_eq!(EndpointError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(EndpointError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            EndpointError::Persistence(anyhow::anyhow!("down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_endpoint_error_response_has_cors() {
        let response = EndpointError::InvalidEmail.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[test]
    fn test_persistence_error_hides_cause() {
        let err = EndpointError::Persistence(anyhow::anyhow!("connection refused to 10.0.0.5"));
        assert_eq!(err.to_string(), "Failed to save message");
    }
}
