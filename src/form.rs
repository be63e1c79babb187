//! Contact form controller.
//!
//! Holds what the visitor typed, the error shown under each field and
//! whether a submission is in flight. A successful send clears the form;
//! any failure keeps the contents so the visitor can retry.

use crate::error::SubmissionError;
use crate::i18n::Localization;
use crate::submission::{ContactClient, SubmissionReceipt};
use crate::validation::{
    validate_field, validate_form, ContactFormInput, DebouncedValidator, Field, FieldError,
    FieldValidation, ValidatedContact,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification shown to the visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

impl Toast {
    fn new(
        kind: ToastKind,
        localization: &Localization,
        title_key: &str,
        description_key: &str,
    ) -> Self {
        Self {
            kind,
            title: localization.translate(title_key).to_string(),
            description: localization.translate(description_key).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored by the endpoint; the form has been cleared
    Sent { id: i64, toast: Toast },
    /// Field errors are displayed; nothing was sent
    Invalid { toast: Toast },
    /// Network or server failure; contents kept for retry
    Failed { toast: Toast },
    /// A submission is already in flight
    Busy,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    input: ContactFormInput,
    errors: BTreeMap<Field, String>,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &ContactFormInput {
        &self.input
    }

    /// Localized error currently shown under `field`
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    /// The submit button is disabled while this is true
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Record an edit. The field's error stays until it is re-validated.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value.into());
    }

    /// Record a keystroke and schedule the field's delayed validation.
    /// Results arrive on the validator's channel for [`Self::apply_validation`].
    pub fn edit(
        &mut self,
        field: Field,
        value: impl Into<String>,
        validator: &mut DebouncedValidator,
    ) {
        let value = value.into();
        self.input.set(field, value.clone());
        validator.schedule(field, value);
    }

    /// Validate one field right away (on blur)
    pub fn validate_now(&mut self, field: Field, localization: &Localization) {
        let result = validate_field(field, self.input.value(field));
        self.show_field_result(field, &result, localization);
    }

    /// Apply a debounced validation result, ignoring stale ones whose
    /// value no longer matches the field
    pub fn apply_validation(&mut self, outcome: &FieldValidation, localization: &Localization) {
        if self.input.value(outcome.field) != outcome.value {
            debug!("Dropping stale validation for {}", outcome.field);
            return;
        }
        self.show_field_result(outcome.field, &outcome.result, localization);
    }

    fn show_field_result(
        &mut self,
        field: Field,
        result: &Result<String, Vec<FieldError>>,
        localization: &Localization,
    ) {
        match result {
            Ok(_) => {
                self.errors.remove(&field);
            }
            Err(errs) => {
                if let Some(first) = errs.first() {
                    self.errors.insert(field, first.localize(field, localization));
                }
            }
        }
    }

    /// Validate everything and enter the submitting state.
    ///
    /// Returns the record to send, or the outcome to show when nothing
    /// should be sent.
    pub fn begin_submit(
        &mut self,
        localization: &Localization,
    ) -> Result<ValidatedContact, SubmitOutcome> {
        if self.submitting {
            return Err(SubmitOutcome::Busy);
        }

        match validate_form(&self.input) {
            Ok(record) => {
                self.errors.clear();
                self.submitting = true;
                Ok(record)
            }
            Err(errors) => {
                debug!("Contact form has {} invalid field(s)", errors.len());
                self.errors = errors.localized(localization);
                Err(SubmitOutcome::Invalid {
                    toast: Toast::new(
                        ToastKind::Error,
                        localization,
                        "toast.error.title",
                        "validation.form_invalid",
                    ),
                })
            }
        }
    }

    /// Leave the submitting state with the endpoint's answer
    pub fn finish_submit(
        &mut self,
        result: Result<SubmissionReceipt, SubmissionError>,
        localization: &Localization,
    ) -> SubmitOutcome {
        self.submitting = false;

        match result {
            Ok(receipt) => {
                self.input = ContactFormInput::default();
                self.errors.clear();
                SubmitOutcome::Sent {
                    id: receipt.id,
                    toast: Toast::new(
                        ToastKind::Success,
                        localization,
                        "toast.success.title",
                        "toast.success.description",
                    ),
                }
            }
            Err(SubmissionError::Validation(errors)) => {
                self.errors = errors.localized(localization);
                SubmitOutcome::Invalid {
                    toast: Toast::new(
                        ToastKind::Error,
                        localization,
                        "toast.error.title",
                        "validation.form_invalid",
                    ),
                }
            }
            Err(e) => {
                warn!("Contact form submission failed: {}", e);
                SubmitOutcome::Failed {
                    toast: Toast::new(
                        ToastKind::Error,
                        localization,
                        "toast.error.title",
                        "toast.error.description",
                    ),
                }
            }
        }
    }

    /// Validate, send and apply the result
    pub async fn submit(
        &mut self,
        client: &ContactClient,
        localization: &Localization,
    ) -> SubmitOutcome {
        let record = match self.begin_submit(localization) {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };

        let result = client.submit(&record).await;
        self.finish_submit(result, localization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::ConsentStore;
    use crate::i18n::Language;
    use crate::storage::{KeyValueStore, MemoryStorage};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn english() -> Localization {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let consent = ConsentStore::new(storage.clone());
        let mut localization = Localization::new(storage, &consent);
        localization.set_language(Language::ENGLISH, &consent).unwrap();
        localization
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Maria Silva");
        form.set_field(Field::Email, "  Maria@Example.com ");
        form.set_field(Field::Subject, "Birthday dinner");
        form.set_field(Field::Message, "Can we bring our own cake on Saturday?");
        form
    }

    async fn client_for(server: &MockServer) -> ContactClient {
        ContactClient::new(
            &format!("{}/functions/v1/contact-form", server.uri()),
            "test-anon-key",
            Duration::from_secs(2),
        )
        .unwrap()
    }

    // ==================== Field Validation Tests ====================

    #[test]
    fn test_validate_now_sets_and_clears_error() {
        let localization = english();
        let mut form = ContactForm::new();

        form.set_field(Field::Name, "M");
        form.validate_now(Field::Name, &localization);
        assert_eq!(form.error(Field::Name), Some("Must be at least 2 characters"));

        form.set_field(Field::Name, "Maria");
        form.validate_now(Field::Name, &localization);
        assert!(form.error(Field::Name).is_none());
    }

    #[test]
    fn test_stale_debounced_result_is_ignored() {
        let localization = english();
        let mut form = ContactForm::new();
        form.set_field(Field::Subject, "Hello there");

        let stale = FieldValidation {
            field: Field::Subject,
            value: "Hel".to_string(),
            result: validate_field(Field::Subject, "Hel"),
        };
        form.apply_validation(&stale, &localization);
        assert!(form.error(Field::Subject).is_none());
    }

    #[test]
    fn test_current_debounced_result_is_applied() {
        let localization = english();
        let mut form = ContactForm::new();
        form.set_field(Field::Subject, "Hel");

        let current = FieldValidation {
            field: Field::Subject,
            value: "Hel".to_string(),
            result: validate_field(Field::Subject, "Hel"),
        };
        form.apply_validation(&current, &localization);
        assert_eq!(form.error(Field::Subject), Some("Must be at least 5 characters"));
    }

    #[tokio::test]
    async fn test_debounced_edits_surface_field_error() {
        let localization = english();
        let mut form = ContactForm::new();
        let (mut validator, mut rx) = DebouncedValidator::new(Duration::from_millis(50));

        for partial in ["H", "He", "Hel"] {
            form.edit(Field::Subject, partial, &mut validator);
        }

        let outcome = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("validation should run")
            .expect("channel open");
        assert_eq!(outcome.value, "Hel");
        form.apply_validation(&outcome, &localization);
        assert_eq!(form.error(Field::Subject), Some("Must be at least 5 characters"));

        form.edit(Field::Subject, "Hello there", &mut validator);
        let outcome = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("validation should run")
            .expect("channel open");
        form.apply_validation(&outcome, &localization);
        assert!(form.error(Field::Subject).is_none());
    }

    #[tokio::test]
    async fn test_debounced_result_for_overwritten_value_is_dropped() {
        let localization = english();
        let mut form = ContactForm::new();
        let (mut validator, mut rx) = DebouncedValidator::new(Duration::from_millis(50));

        form.edit(Field::Name, "M", &mut validator);
        form.set_field(Field::Name, "Maria");

        let outcome = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("validation should run")
            .expect("channel open");
        form.apply_validation(&outcome, &localization);
        assert!(form.error(Field::Name).is_none());
    }

    // ==================== Submit State Tests ====================

    #[test]
    fn test_begin_submit_blocks_duplicates() {
        let localization = english();
        let mut form = filled_form();

        assert!(form.begin_submit(&localization).is_ok());
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(&localization), Err(SubmitOutcome::Busy));
    }

    #[test]
    fn test_begin_submit_invalid_shows_all_errors() {
        let localization = english();
        let mut form = ContactForm::new();
        form.set_field(Field::Email, "nope");

        let outcome = form.begin_submit(&localization).unwrap_err();
        assert!(matches!(outcome, SubmitOutcome::Invalid { .. }));
        assert!(!form.is_submitting());
        assert_eq!(form.errors().len(), 4);
        assert_eq!(form.error(Field::Email), Some("Please enter a valid email address"));
        assert_eq!(form.input().email, "nope", "input retained");
    }

    #[test]
    fn test_finish_submit_failure_keeps_input() {
        let localization = english();
        let mut form = filled_form();
        form.begin_submit(&localization).unwrap();

        let outcome = form.finish_submit(Err(SubmissionError::Timeout), &localization);
        match outcome {
            SubmitOutcome::Failed { toast } => {
                assert_eq!(toast.kind, ToastKind::Error);
                assert_eq!(toast.title, "Could not send");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!form.is_submitting());
        assert_eq!(form.input().name, "Maria Silva");
    }

    // ==================== End-to-end Submit Tests ====================

    #[tokio::test]
    async fn test_submit_success_clears_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/contact-form"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Message sent successfully",
                "id": 12
            })))
            .expect(1)
            .mount(&server)
            .await;

        let localization = english();
        let client = client_for(&server).await;
        let mut form = filled_form();

        let outcome = form.submit(&client, &localization).await;
        match outcome {
            SubmitOutcome::Sent { id, toast } => {
                assert_eq!(id, 12);
                assert_eq!(toast.kind, ToastKind::Success);
                assert_eq!(toast.title, "Message sent!");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(form.input().is_blank());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_server_error_retains_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "Failed to save message"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let localization = english();
        let client = client_for(&server).await;
        let mut form = filled_form();

        let outcome = form.submit(&client, &localization).await;
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(form.input().subject, "Birthday dinner");
    }

    #[tokio::test]
    async fn test_submit_invalid_form_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let localization = english();
        let client = client_for(&server).await;
        let mut form = filled_form();
        form.set_field(Field::Message, "<script>alert(1)</script>");

        let outcome = form.submit(&client, &localization).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid { .. }));
        assert_eq!(form.error(Field::Message), Some("Invalid characters detected"));
    }
}
