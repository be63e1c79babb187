//! Application-level client state.
//!
//! One struct owns consent, localization and theme over a shared storage
//! backend and is passed to whatever renders the site. Every write of a
//! language or theme goes through here so the consent check cannot be
//! skipped.

use crate::consent::{ConsentStore, CookieCategory, CookiePreferences};
use crate::error::StorageError;
use crate::i18n::{Language, Localization};
use crate::storage::KeyValueStore;
use crate::theme::{Theme, ThemeStore};
use std::sync::Arc;

pub struct SiteState {
    consent: ConsentStore,
    localization: Localization,
    theme: ThemeStore,
}

impl SiteState {
    /// Load all stores from storage. `system_prefers_dark` is the OS-level
    /// colour-scheme preference.
    pub fn load(storage: Arc<dyn KeyValueStore>, system_prefers_dark: bool) -> Self {
        let consent = ConsentStore::new(storage.clone());
        let localization = Localization::new(storage.clone(), &consent);
        let theme = ThemeStore::new(storage, &consent, system_prefers_dark);

        Self {
            consent,
            localization,
            theme,
        }
    }

    pub fn consent(&self) -> &ConsentStore {
        &self.consent
    }

    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.localization.translate(key)
    }

    pub fn language(&self) -> Language {
        self.localization.language()
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Localized name of the current theme, for the toggle button
    pub fn theme_label(&self) -> &'static str {
        self.localization.translate(self.theme.get().label_key())
    }

    /// Whether the consent banner should still be shown
    pub fn needs_consent_decision(&self) -> bool {
        !self.consent.has_decided()
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), StorageError> {
        self.localization.set_language(language, &self.consent)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        self.theme.toggle(&self.consent)
    }

    /// Record a consent decision.
    ///
    /// Granting `preferences` immediately persists the language and theme
    /// already chosen in this session.
    pub fn update_consent(&mut self, prefs: CookiePreferences) -> Result<(), StorageError> {
        self.consent.save(prefs)?;

        if self.consent.is_category_allowed(CookieCategory::Preferences) {
            let language = self.localization.language();
            self.localization.set_language(language, &self.consent)?;
            self.theme.persist(&self.consent)?;
        }
        Ok(())
    }
}
