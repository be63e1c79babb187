//! Localization store: the active language plus key lookup.
//!
//! The chosen language is written to durable storage only while the
//! visitor has granted `preferences` consent. Without it the choice lives
//! in this struct and is gone on the next load.

use crate::consent::{ConsentStore, CookieCategory};
use crate::error::StorageError;
use crate::i18n::Language;
use crate::storage::{KeyValueStore, LANGUAGE_KEY};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Localization {
    storage: Arc<dyn KeyValueStore>,
    language: Language,
}

impl Localization {
    /// Resolve the starting language: the persisted choice when consent
    /// allows reading it, otherwise the default language.
    pub fn new(storage: Arc<dyn KeyValueStore>, consent: &ConsentStore) -> Self {
        let persisted = if consent.is_category_allowed(CookieCategory::Preferences) {
            storage
                .get(LANGUAGE_KEY)
                .and_then(|code| Language::from_code(&code).ok())
        } else {
            None
        };

        Self {
            storage,
            language: persisted.unwrap_or_default(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language; persists only with `preferences` consent.
    pub fn set_language(
        &mut self,
        language: Language,
        consent: &ConsentStore,
    ) -> Result<(), StorageError> {
        self.language = language;

        if consent.is_category_allowed(CookieCategory::Preferences) {
            self.storage.set(LANGUAGE_KEY, language.code())?;
        } else {
            debug!("Language {} kept for this session only", language.code());
        }
        Ok(())
    }

    /// Translate a key in the active language.
    ///
    /// A missing key returns the key itself so rendering never breaks.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        match self.language.config().lookup(key) {
            Some(text) => text,
            None => {
                debug!("Missing translation for '{}' in {}", key, self.language.code());
                key
            }
        }
    }

    /// Translate and fill `{name}` placeholders
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.translate(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}
