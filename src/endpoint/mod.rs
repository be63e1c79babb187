//! Contact endpoint.
//!
//! `POST /functions/v1/contact-form` validates the payload, stores one row
//! per submission and kicks off a best-effort staff notification. Every
//! response carries permissive CORS headers; `OPTIONS` answers the browser
//! pre-flight with a plain "ok".

mod client_ip;
mod handler;

pub use client_ip::derive_client_ip;

use crate::db::MessageStore;
use crate::notify::Notifier;
use axum::{
    http::{header, HeaderName},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const CONTACT_PATH: &str = "/functions/v1/contact-form";

/// Fields the endpoint refuses to store without
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

pub fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    ]
}

pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    /// When set, requests must send `Authorization: Bearer <key>`
    pub anon_key: Option<String>,
    pub notifier: Option<Notifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            anon_key: None,
            notifier: None,
        }
    }

    pub fn with_anon_key(mut self, anon_key: Option<String>) -> Self {
        self.anon_key = anon_key;
        self
    }

    pub fn with_notifier(mut self, notifier: Option<Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            CONTACT_PATH,
            post(handler::submit_contact).options(handler::preflight),
        )
        .route("/health", get(handler::health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
