//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of all languages the site is
//! translated into. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access.

use crate::i18n::strings::{ENGLISH_STRINGS, FRENCH_STRINGS, PORTUGUESE_STRINGS, SPANISH_STRINGS};
use std::sync::OnceLock;

/// Static key -> string table for one language
pub type StringTable = &'static [(&'static str, &'static str)];

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "pt", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Portuguese")
    pub name: &'static str,

    /// Native name of the language (e.g., "Português")
    pub native_name: &'static str,

    /// Whether this is the language shown before the visitor picks one (only one should be true)
    pub is_default: bool,

    /// Whether this language is offered in the language switcher
    pub enabled: bool,

    /// All translated strings for this language
    pub strings: StringTable,
}

impl LanguageConfig {
    /// Look up a single translated string
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in switcher order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if zero or several languages are marked default (a
    /// configuration error in `default_languages`).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// The restaurant's languages. Portuguese is the house language.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            is_default: true,
            enabled: true,
            strings: PORTUGUESE_STRINGS,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
            enabled: true,
            strings: ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
            enabled: true,
            strings: SPANISH_STRINGS,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
            enabled: true,
            strings: FRENCH_STRINGS,
        },
    ]
}
