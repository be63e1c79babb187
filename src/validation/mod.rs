//! Contact form validation.
//!
//! Values are normalized first (trimmed; e-mail also lower-cased), then
//! every rule for the field runs. Form-level validation checks every
//! field and reports every failure instead of stopping at the first.
//!
//! - `rules`: the per-field rule lists and patterns
//! - `debounce`: delayed per-field validation for as-you-type feedback

mod debounce;
pub mod rules;

pub use debounce::{DebouncedValidator, FieldValidation};

use crate::i18n::Localization;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A contact form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Subject,
        Field::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Phone)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single rule rejected a field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("required")]
    Required,

    #[error("shorter than {min} characters")]
    TooShort { min: usize },

    #[error("longer than {max} characters")]
    TooLong { max: usize },

    #[error("invalid format")]
    InvalidFormat,

    /// Any security-rule rejection. One variant on purpose: the caller
    /// must not learn which rule fired.
    #[error("invalid characters detected")]
    InvalidCharacters,
}

impl FieldError {
    /// Translation key of the message shown for this error on `field`
    pub fn message_key(&self, field: Field) -> &'static str {
        match self {
            FieldError::Required => "validation.required",
            FieldError::TooShort { .. } => "validation.too_short",
            FieldError::TooLong { .. } => "validation.too_long",
            FieldError::InvalidCharacters => "validation.invalid_characters",
            FieldError::InvalidFormat => match field {
                Field::Name => "validation.name.pattern",
                Field::Email => "validation.email.pattern",
                Field::Phone => "validation.phone.pattern",
                Field::Subject => "validation.subject.pattern",
                Field::Message => "validation.message.pattern",
            },
        }
    }

    pub fn localize(&self, field: Field, localization: &Localization) -> String {
        let key = self.message_key(field);
        match self {
            FieldError::TooShort { min } => {
                localization.translate_with(key, &[("min", &min.to_string())])
            }
            FieldError::TooLong { max } => {
                localization.translate_with(key, &[("max", &max.to_string())])
            }
            _ => localization.translate(key).to_string(),
        }
    }
}

/// Every failing rule, grouped by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, field: Field, errors: Vec<FieldError>) {
        if !errors.is_empty() {
            self.errors.entry(field).or_default().extend(errors);
        }
    }

    pub fn get(&self, field: Field) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The error the form shows for `field`
    pub fn first(&self, field: Field) -> Option<&FieldError> {
        self.get(field).first()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// One localized message per failing field
    pub fn localized(&self, localization: &Localization) -> BTreeMap<Field, String> {
        self.errors
            .iter()
            .filter_map(|(field, errs)| {
                errs.first()
                    .map(|err| (*field, err.localize(*field, localization)))
            })
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs.iter().map(|e| e.to_string()).collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Raw form input as typed by the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactFormInput {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => self.phone.as_deref().unwrap_or(""),
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = Some(value),
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).trim().is_empty())
    }
}

/// A normalized record that passed every rule; this is the request body
/// sent to the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Trim, and lower-case e-mail addresses
pub fn normalize(field: Field, raw: &str) -> String {
    let trimmed = raw.trim();
    match field {
        Field::Email => trimmed.to_lowercase(),
        _ => trimmed.to_string(),
    }
}

/// Validate one field, returning its normalized value or all failures
pub fn validate_field(field: Field, raw: &str) -> Result<String, Vec<FieldError>> {
    let value = normalize(field, raw);

    if value.is_empty() {
        return if field.is_required() {
            Err(vec![FieldError::Required])
        } else {
            Ok(value)
        };
    }

    let errors: Vec<FieldError> = rules::rules_for(field)
        .iter()
        .filter_map(|rule| rule.check(&value))
        .collect();

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

/// Validate the whole form, collecting every field's errors
pub fn validate_form(input: &ContactFormInput) -> Result<ValidatedContact, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut values: BTreeMap<Field, String> = BTreeMap::new();

    for field in Field::ALL {
        match validate_field(field, input.value(field)) {
            Ok(value) => {
                values.insert(field, value);
            }
            Err(errs) => errors.add(field, errs),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut take = |field: Field| values.remove(&field).unwrap_or_default();
    let phone = take(Field::Phone);

    Ok(ValidatedContact {
        name: take(Field::Name),
        email: take(Field::Email),
        phone: (!phone.is_empty()).then_some(phone),
        subject: take(Field::Subject),
        message: take(Field::Message),
    })
}
