//! Form host surface consumed by the navigation controller.

use std::collections::HashMap;

use async_trait::async_trait;

/// Current value per field name
pub type FormValues = HashMap<String, String>;

/// Validation message per field name; absent fields are valid
pub type FieldErrors = HashMap<String, String>;

/// External form-state engine: values, validation and submission lifecycle
#[async_trait]
pub trait FormHost: Send {
    /// Snapshot of the current field values
    fn values(&self) -> FormValues;

    /// Re-run validation over the whole form
    async fn validate_form(&mut self) -> FieldErrors;

    /// Commit `values` as the new baseline, dropping errors and touched state
    fn reset_form(&mut self, values: FormValues);

    /// Run the submission path; invalid forms only surface their errors
    async fn submit_form(&mut self);

    /// Whether a submission is in flight
    fn is_submitting(&self) -> bool;
}
