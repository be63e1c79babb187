//! Contact pipeline for the restaurant website.
//!
//! Client side: consent-gated site state (cookie consent, language, theme),
//! field validation with debouncing, and the submission client.
//! Server side: the contact endpoint, message persistence and staff
//! notifications.

pub mod config;
pub mod consent;
pub mod db;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod i18n;
pub mod notify;
pub mod retry;
pub mod security;
pub mod state;
pub mod storage;
pub mod submission;
pub mod theme;
pub mod validation;
