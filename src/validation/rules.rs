//! Per-field rule lists.
//!
//! Each field has an ordered list of independent rules. All rules run on
//! every check; the first failure is what the form displays, so the
//! security rule sits before the pattern rule and malicious input always
//! shows the generic "invalid characters" message.

use crate::security;
use crate::validation::{Field, FieldError};
use regex::Regex;
use std::sync::OnceLock;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 254;
pub const SUBJECT_MIN: usize = 5;
pub const SUBJECT_MAX: usize = 100;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 1000;

/// A single check against an already-normalized, non-empty value
#[derive(Clone, Copy)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    NoInjection,
    Pattern(fn() -> &'static Regex),
}

impl Rule {
    pub fn check(&self, value: &str) -> Option<FieldError> {
        match self {
            Rule::MinLength(min) => {
                (value.chars().count() < *min).then_some(FieldError::TooShort { min: *min })
            }
            Rule::MaxLength(max) => {
                (value.chars().count() > *max).then_some(FieldError::TooLong { max: *max })
            }
            Rule::NoInjection => {
                security::is_malicious(value).then_some(FieldError::InvalidCharacters)
            }
            Rule::Pattern(regex) => (!regex().is_match(value)).then_some(FieldError::InvalidFormat),
        }
    }
}

const NAME_RULES: &[Rule] = &[
    Rule::MinLength(NAME_MIN),
    Rule::MaxLength(NAME_MAX),
    Rule::NoInjection,
    Rule::Pattern(name_pattern),
];

const EMAIL_RULES: &[Rule] = &[
    Rule::MaxLength(EMAIL_MAX),
    Rule::NoInjection,
    Rule::Pattern(email_pattern),
];

const PHONE_RULES: &[Rule] = &[Rule::Pattern(phone_pattern)];

const SUBJECT_RULES: &[Rule] = &[
    Rule::MinLength(SUBJECT_MIN),
    Rule::MaxLength(SUBJECT_MAX),
    Rule::NoInjection,
    Rule::Pattern(subject_pattern),
];

const MESSAGE_RULES: &[Rule] = &[
    Rule::MinLength(MESSAGE_MIN),
    Rule::MaxLength(MESSAGE_MAX),
    Rule::NoInjection,
    Rule::Pattern(message_pattern),
];

pub fn rules_for(field: Field) -> &'static [Rule] {
    match field {
        Field::Name => NAME_RULES,
        Field::Email => EMAIL_RULES,
        Field::Phone => PHONE_RULES,
        Field::Subject => SUBJECT_RULES,
        Field::Message => MESSAGE_RULES,
    }
}

// Regex patterns (cached for performance)
static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static SUBJECT_REGEX: OnceLock<Regex> = OnceLock::new();
static MESSAGE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Letters (Latin accented included), spaces, hyphens, apostrophes
fn name_pattern() -> &'static Regex {
    NAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s'\-]+$").unwrap())
}

fn email_pattern() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

fn phone_pattern() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(r"^[+]?[1-9][\d\s\-()]{0,20}$").unwrap())
}

/// Letters, digits, accented letters and `- ' . , ! ? ( )`
fn subject_pattern() -> &'static Regex {
    SUBJECT_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9À-ÿ\s\-'.,!?()]+$").unwrap())
}

/// Subject set plus `: @ # $ % & * + = / €`
fn message_pattern() -> &'static Regex {
    MESSAGE_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9À-ÿ\s\-'.,!?():@\#$%\&*+=/€]+$").unwrap()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(field: Field, value: &str) -> Vec<FieldError> {
        rules_for(field)
            .iter()
            .filter_map(|rule| rule.check(value))
            .collect()
    }

    #[test]
    fn test_name_pattern() {
        assert!(name_pattern().is_match("Ana Sofia"));
        assert!(name_pattern().is_match("José d'Ávila-Moreira"));
        assert!(!name_pattern().is_match("Agent 007"));
        assert!(!name_pattern().is_match("bob@example"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(phone_pattern().is_match("+351 912 345 678"));
        assert!(phone_pattern().is_match("21 555-0199"));
        assert!(phone_pattern().is_match("912345678"));
        assert!(!phone_pattern().is_match("abc"));
        assert!(!phone_pattern().is_match("0912345678"));
        assert!(!phone_pattern().is_match("+1 234 567 890 123 456 789 01"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(email_pattern().is_match("john@example.com"));
        assert!(email_pattern().is_match("maria.silva+reservas@restaurante.pt"));
        assert!(!email_pattern().is_match("john@example"));
        assert!(!email_pattern().is_match("john example.com"));
    }

    #[test]
    fn test_subject_pattern_rejects_symbols() {
        assert!(subject_pattern().is_match("Group booking (12 people)?"));
        assert!(!subject_pattern().is_match("Price: 20€"));
    }

    #[test]
    fn test_message_pattern_accepts_extended_punctuation() {
        assert!(message_pattern().is_match(
            "Hi! Table for 4 @ 20:30, budget 25€/person & 1 high-chair + 50% deposit?\nThanks."
        ));
        assert!(!message_pattern().is_match("<b>bold</b>"));
    }

    #[test]
    fn test_all_rules_run() {
        // Too short AND disallowed characters: both reported
        let errs = errors(Field::Name, "1");
        assert_eq!(errs, vec![FieldError::TooShort { min: 2 }, FieldError::InvalidFormat]);
    }

    #[test]
    fn test_security_rule_precedes_pattern() {
        let errs = errors(Field::Subject, "<script>alert(1)</script>");
        assert_eq!(errs[0], FieldError::InvalidCharacters);
        assert!(errs.contains(&FieldError::InvalidFormat));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 50 two-byte characters is still within the name limit
        let name = "é".repeat(50);
        assert!(errors(Field::Name, &name).is_empty());
        let name = "é".repeat(51);
        assert_eq!(errors(Field::Name, &name), vec![FieldError::TooLong { max: 50 }]);
    }
}
