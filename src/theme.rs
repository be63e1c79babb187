use crate::consent::{ConsentStore, CookieCategory};
use crate::error::StorageError;
use crate::storage::{KeyValueStore, THEME_KEY};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Colour scheme of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Translation key for the theme's label
    pub fn label_key(&self) -> &'static str {
        match self {
            Theme::Light => "theme.light",
            Theme::Dark => "theme.dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: '{}'", other)),
        }
    }
}

/// Theme store.
///
/// Initial theme: persisted value (only with `preferences` consent), then
/// the operating system's dark-mode preference, then light.
#[derive(Clone)]
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl ThemeStore {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        consent: &ConsentStore,
        system_prefers_dark: bool,
    ) -> Self {
        let persisted = if consent.is_category_allowed(CookieCategory::Preferences) {
            storage.get(THEME_KEY).and_then(|raw| raw.parse().ok())
        } else {
            None
        };

        let theme = persisted.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });

        Self { storage, theme }
    }

    pub fn get(&self) -> Theme {
        self.theme
    }

    /// Flip light/dark; persists only with `preferences` consent.
    pub fn toggle(&mut self, consent: &ConsentStore) -> Result<Theme, StorageError> {
        self.theme = self.theme.toggled();

        if consent.is_category_allowed(CookieCategory::Preferences) {
            self.storage.set(THEME_KEY, self.theme.as_str())?;
        }
        Ok(self.theme)
    }

    /// Write the current theme if consent allows it
    pub fn persist(&self, consent: &ConsentStore) -> Result<(), StorageError> {
        if consent.is_category_allowed(CookieCategory::Preferences) {
            self.storage.set(THEME_KEY, self.theme.as_str())?;
        }
        Ok(())
    }
}
