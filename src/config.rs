use anyhow::{Context, Result};

/// Contact endpoint (server) configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Server
    pub port: u16,

    // Auth - when set, requests must carry this as a bearer token
    pub anon_key: Option<String>,

    // Notifications
    pub notify_webhook_url: Option<String>,
    pub notify_recipient: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL not set")?,

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            anon_key: non_empty_var("CONTACT_ANON_KEY"),

            notify_webhook_url: non_empty_var("NOTIFY_WEBHOOK_URL"),
            notify_recipient: non_empty_var("NOTIFY_RECIPIENT"),
        })
    }
}

/// Submission client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint_url: String,
    pub anon_key: String,
    /// Whole-request timeout for a submission
    pub timeout_secs: u64,
    /// Delay before as-you-type field validation runs
    pub debounce_ms: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint_url: std::env::var("CONTACT_ENDPOINT_URL")
                .context("CONTACT_ENDPOINT_URL not set")?,
            anon_key: std::env::var("CONTACT_ANON_KEY").context("CONTACT_ANON_KEY not set")?,
            timeout_secs: std::env::var("CONTACT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            debounce_ms: std::env::var("FIELD_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
