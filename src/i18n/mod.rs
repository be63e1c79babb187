//! Internationalization (i18n) module for the site's four languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe Language type validated against the registry
//! - `strings`: Static key -> text tables, one per language
//! - `localization`: The active-language store with consent-gated persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use restaurant_contact::i18n::{Language, Localization};
//!
//! let mut localization = Localization::new(storage, &consent);
//! localization.set_language(Language::from_code("fr")?, &consent)?;
//! let label = localization.translate("form.submit");
//! ```

mod language;
mod localization;
mod registry;
mod strings;

pub use language::Language;
pub use localization::Localization;
pub use registry::{LanguageConfig, LanguageRegistry, StringTable};
