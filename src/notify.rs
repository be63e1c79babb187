use crate::config::Config;
use crate::db::ContactMessage;
use crate::error::NotifyError;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct NotificationPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient: Option<&'a str>,
    id: i64,
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    message: &'a str,
    received_at: String,
}

/// Posts new-message summaries to a staff webhook
#[derive(Debug, Clone)]
pub struct Notifier {
    http: reqwest::Client,
    webhook_url: String,
    recipient: Option<String>,
    retry: RetryConfig,
}

impl Notifier {
    pub fn new(webhook_url: &str, recipient: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build notification HTTP client")?;

        Ok(Self {
            http,
            webhook_url: webhook_url.to_string(),
            recipient,
            retry: RetryConfig::notification(),
        })
    }

    /// `None` when no webhook is configured
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        config
            .notify_webhook_url
            .as_deref()
            .map(|url| Self::new(url, config.notify_recipient.clone()))
            .transpose()
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Deliver one notification, retrying 5xx and transport failures
    pub async fn notify(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        let payload = NotificationPayload {
            recipient: self.recipient.as_deref(),
            id: message.id,
            name: &message.name,
            email: &message.email,
            phone: message.phone.as_deref(),
            subject: message.subject.as_deref(),
            message: &message.message,
            received_at: message.created_at.to_rfc3339(),
        };

        let http = &self.http;
        let url = self.webhook_url.as_str();
        let payload = &payload;

        with_retry_if(
            &self.retry,
            "Contact notification",
            move || async move {
                let response = http.post(url).json(payload).send().await?;
                let status = response.status();
                if status.is_success() {
                    Ok(())
                } else {
                    Err(NotifyError::Status(status.as_u16()))
                }
            },
            NotifyError::is_retryable,
        )
        .await?;

        info!("Notification sent for message {}", message.id);
        Ok(())
    }

    /// Fire-and-forget delivery. Failures are logged and go no further.
    pub fn spawn(&self, message: ContactMessage) -> JoinHandle<()> {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&message).await {
                warn!("Notification for message {} failed: {}", message.id, e);
            }
        })
    }
}
