//! Cookie consent store.
//!
//! Persists the user's consent per category and answers whether a category
//! is allowed. `essential` is always granted and is never a user choice;
//! everything else defaults to denied until the user decides.

use crate::error::StorageError;
use crate::storage::{KeyValueStore, CONSENT_DATE_KEY, CONSENT_KEY, LANGUAGE_KEY, THEME_KEY};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// A consent category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookieCategory {
    Essential,
    Analytics,
    Preferences,
}

/// Per-category consent as stored under `cookieConsent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookiePreferences {
    pub essential: bool,
    pub analytics: bool,
    pub preferences: bool,
}

impl CookiePreferences {
    /// Everything optional granted
    pub fn all() -> Self {
        Self {
            essential: true,
            analytics: true,
            preferences: true,
        }
    }

    /// Only what the site cannot work without
    pub fn essential_only() -> Self {
        Self::default()
    }

    pub fn allows(&self, category: CookieCategory) -> bool {
        match category {
            CookieCategory::Essential => true,
            CookieCategory::Analytics => self.analytics,
            CookieCategory::Preferences => self.preferences,
        }
    }

    /// Force the invariant that essential is always on
    fn normalized(mut self) -> Self {
        self.essential = true;
        self
    }
}

impl Default for CookiePreferences {
    fn default() -> Self {
        Self {
            essential: true,
            analytics: false,
            preferences: false,
        }
    }
}

/// Consent store over durable client storage
#[derive(Clone)]
pub struct ConsentStore {
    storage: Arc<dyn KeyValueStore>,
    current: CookiePreferences,
    decided: bool,
}

impl ConsentStore {
    /// Build the store and load whatever consent is already persisted
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            storage,
            current: CookiePreferences::default(),
            decided: false,
        };
        store.load();
        store
    }

    /// Read persisted preferences.
    ///
    /// Missing or malformed data yields the defaults and marks consent as
    /// not yet decided. Never fails.
    pub fn load(&mut self) -> CookiePreferences {
        let parsed = self
            .storage
            .get(CONSENT_KEY)
            .and_then(|raw| match serde_json::from_str::<CookiePreferences>(&raw) {
                Ok(prefs) => Some(prefs),
                Err(e) => {
                    debug!("Ignoring malformed consent data: {}", e);
                    None
                }
            });

        match parsed {
            Some(prefs) => {
                self.current = prefs.normalized();
                self.decided = true;
            }
            None => {
                self.current = CookiePreferences::default();
                self.decided = false;
            }
        }

        self.current
    }

    /// Persist new preferences with a consent timestamp.
    ///
    /// Withdrawing `preferences` consent also deletes any language or theme
    /// choice persisted under the earlier consent.
    pub fn save(&mut self, prefs: CookiePreferences) -> Result<(), StorageError> {
        let prefs = prefs.normalized();

        self.storage
            .set(CONSENT_KEY, &serde_json::to_string(&prefs)?)?;
        self.storage
            .set(CONSENT_DATE_KEY, &Utc::now().to_rfc3339())?;

        if !prefs.preferences {
            self.storage.remove(LANGUAGE_KEY)?;
            self.storage.remove(THEME_KEY)?;
        }

        info!(
            "Cookie consent saved (analytics: {}, preferences: {})",
            prefs.analytics, prefs.preferences
        );

        self.current = prefs;
        self.decided = true;
        Ok(())
    }

    pub fn accept_all(&mut self) -> Result<(), StorageError> {
        self.save(CookiePreferences::all())
    }

    pub fn reject_all(&mut self) -> Result<(), StorageError> {
        self.save(CookiePreferences::essential_only())
    }

    pub fn is_category_allowed(&self, category: CookieCategory) -> bool {
        self.current.allows(category)
    }

    pub fn preferences(&self) -> CookiePreferences {
        self.current
    }

    /// Whether the user has made a choice (drives banner visibility)
    pub fn has_decided(&self) -> bool {
        self.decided
    }

    /// When consent was last given, as stored
    pub fn consent_date(&self) -> Option<String> {
        self.storage.get(CONSENT_DATE_KEY)
    }
}
