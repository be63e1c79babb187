use super::{cors_headers, derive_client_ip, AppState};
use crate::db::NewContactMessage;
use crate::error::EndpointError;
use crate::security::constant_time_compare;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Storage caps for name, email, phone and subject
const SHORT_FIELD_MAX: usize = 255;
const MESSAGE_FIELD_MAX: usize = 10_000;

static EMAIL_SYNTAX_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_syntax() -> &'static Regex {
    EMAIL_SYNTAX_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers(), "ok")
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            warn!("Health check failed: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, EndpointError> {
    authorize(&state, &headers)?;

    let payload = parse_object(&body)?;

    let (name, email, message) = match (
        string_field(&payload, "name"),
        string_field(&payload, "email"),
        string_field(&payload, "message"),
    ) {
        (Some(name), Some(email), Some(message)) => (name, email, message),
        _ => {
            debug!("Rejected contact payload with missing fields");
            return Err(EndpointError::MissingFields);
        }
    };

    if !email_syntax().is_match(&email) {
        debug!("Rejected contact payload with malformed email");
        return Err(EndpointError::InvalidEmail);
    }

    let row = NewContactMessage {
        name: truncate(&name, SHORT_FIELD_MAX),
        email: truncate(&email, SHORT_FIELD_MAX),
        phone: string_field(&payload, "phone").map(|p| truncate(&p, SHORT_FIELD_MAX)),
        subject: string_field(&payload, "subject").map(|s| truncate(&s, SHORT_FIELD_MAX)),
        message: truncate(&message, MESSAGE_FIELD_MAX),
        ip_address: derive_client_ip(&headers),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string(),
    };

    let stored = state
        .store
        .insert(row)
        .await
        .map_err(EndpointError::Persistence)?;

    info!("Stored contact message {}", stored.id);

    if let Some(notifier) = &state.notifier {
        notifier.spawn(stored.clone());
    }

    Ok((
        StatusCode::OK,
        cors_headers(),
        Json(json!({
            "success": true,
            "message": "Message sent successfully",
            "id": stored.id,
        })),
    )
        .into_response())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), EndpointError> {
    let Some(expected) = state.anon_key.as_deref() else {
        return Ok(());
    };

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    if constant_time_compare(token, expected) {
        Ok(())
    } else {
        debug!("Rejected contact request with bad bearer token");
        Err(EndpointError::Unauthorized)
    }
}

/// The body must be a JSON object; anything else is malformed
fn parse_object(body: &[u8]) -> Result<Map<String, Value>, EndpointError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            debug!("Rejected contact payload that is not an object: {}", other);
            Err(EndpointError::MalformedPayload)
        }
        Err(e) => {
            debug!("Rejected unparseable contact payload: {}", e);
            Err(EndpointError::MalformedPayload)
        }
    }
}

/// Trimmed string value, or `None` when absent, blank or not a string
fn string_field(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
