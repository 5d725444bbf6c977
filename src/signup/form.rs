//! Registration form state: the concrete form host driven by the wizard

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::pages::SIGNUP_FIELDS;
use super::validation::{signup_schema, ValidationSchema};
use crate::wizard::{FieldErrors, FormHost, FormValues};

/// Receives the values of a valid form when it is submitted
pub trait SubmitHandler: Send {
    fn on_submit(&mut self, values: FormValues);
}

impl SubmitHandler for mpsc::UnboundedSender<FormValues> {
    fn on_submit(&mut self, values: FormValues) {
        if self.send(values).is_err() {
            warn!("submission receiver dropped");
        }
    }
}

/// Values, validation and submission lifecycle of the registration form
pub struct SignupForm {
    schema: ValidationSchema,
    values: FormValues,
    errors: FieldErrors,
    touched: HashSet<String>,
    submitting: bool,
    handler: Box<dyn SubmitHandler>,
}

impl SignupForm {
    /// Registration form with every field initially empty
    pub fn new(handler: impl SubmitHandler + 'static) -> Self {
        Self::with_schema(signup_schema(), handler)
    }

    pub fn with_schema(schema: ValidationSchema, handler: impl SubmitHandler + 'static) -> Self {
        let values = SIGNUP_FIELDS
            .iter()
            .map(|name| ((*name).to_string(), String::new()))
            .collect();
        Self {
            schema,
            values,
            errors: FieldErrors::new(),
            touched: HashSet::new(),
            submitting: false,
            handler: Box::new(handler),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Change a field value and re-check that field
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
        self.refresh_field_error(field);
    }

    /// Mark a field as visited so its error becomes visible
    pub fn touch(&mut self, field: &str) {
        self.touched.insert(field.to_string());
        self.refresh_field_error(field);
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Error to display for a field: only once the field has been touched
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.get(field).map(String::as_str)
        } else {
            None
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The background submission finished; controls become usable again
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    fn refresh_field_error(&mut self, field: &str) {
        match self.schema.validate_field(field, &self.values) {
            Some(message) => {
                self.errors.insert(field.to_string(), message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }
}

#[async_trait]
impl FormHost for SignupForm {
    fn values(&self) -> FormValues {
        self.values.clone()
    }

    async fn validate_form(&mut self) -> FieldErrors {
        self.errors = self.schema.validate(&self.values);
        self.errors.clone()
    }

    fn reset_form(&mut self, values: FormValues) {
        self.values = values;
        self.errors.clear();
        self.touched.clear();
        self.submitting = false;
    }

    async fn submit_form(&mut self) {
        self.touched
            .extend(self.schema.field_names().map(str::to_string));

        let errors = self.validate_form().await;
        if !errors.is_empty() {
            debug!(fields = errors.len(), "submission skipped, form invalid");
            return;
        }

        self.submitting = true;
        self.handler.on_submit(self.values.clone());
    }

    fn is_submitting(&self) -> bool {
        self.submitting
    }
}
