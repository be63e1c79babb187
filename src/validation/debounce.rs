use crate::config::ClientConfig;
use crate::validation::{validate_field, Field, FieldError};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Outcome of one debounced validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub field: Field,
    pub value: String,
    pub result: Result<String, Vec<FieldError>>,
}

/// Per-field delayed validation.
///
/// Every edit replaces the field's pending validation: the previous timer
/// is aborted before a new one is scheduled, so a burst of keystrokes
/// produces one validation of the final value. Dropping the validator
/// aborts everything still pending.
///
/// Must be used from within a Tokio runtime.
pub struct DebouncedValidator {
    delay: Duration,
    pending: HashMap<Field, JoinHandle<()>>,
    results: mpsc::UnboundedSender<FieldValidation>,
}

impl DebouncedValidator {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<FieldValidation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                pending: HashMap::new(),
                results: tx,
            },
            rx,
        )
    }

    /// Validator using the configured `FIELD_DEBOUNCE_MS` delay
    pub fn from_config(config: &ClientConfig) -> (Self, mpsc::UnboundedReceiver<FieldValidation>) {
        Self::new(Duration::from_millis(config.debounce_ms))
    }

    /// Schedule validation of `value` after the debounce delay
    pub fn schedule(&mut self, field: Field, value: impl Into<String>) {
        self.cancel(field);

        let value = value.into();
        let delay = self.delay;
        let results = self.results.clone();

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let result = validate_field(field, &value);
            // Receiver gone means the form was torn down
            let _ = results.send(FieldValidation {
                field,
                value,
                result,
            });
        });

        self.pending.insert(field, handle);
    }

    /// Abort the field's pending validation, if any
    pub fn cancel(&mut self, field: Field) {
        if let Some(handle) = self.pending.remove(&field) {
            if !handle.is_finished() {
                debug!("Cancelling pending validation for {}", field);
            }
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    /// Number of validations scheduled but not yet run
    pub fn pending_count(&self) -> usize {
        self.pending.values().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for DebouncedValidator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
