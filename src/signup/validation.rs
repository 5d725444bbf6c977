//! Field validation rules for the registration form

use once_cell::sync::Lazy;
use regex::Regex;

use super::pages::{EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use crate::wizard::{FieldErrors, FormValues};

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

static LATIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]").expect("latin pattern compiles"));

/// Non-blank after trimming
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Non-empty, whitespace counts
pub fn present(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if EMAIL_RE.is_match(value.trim()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn contains_latin(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if LATIN_RE.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Ordered validators per field; the first failing rule reports
#[derive(Default)]
pub struct ValidationSchema {
    fields: Vec<(String, Vec<Validator>)>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, validators: Vec<Validator>) -> Self {
        self.fields.push((name.into(), validators));
        self
    }

    /// Validate one field; missing values count as empty
    pub fn validate_field(&self, name: &str, values: &FormValues) -> Option<String> {
        let (_, validators) = self.fields.iter().find(|(field, _)| field == name)?;
        let value = values.get(name).map_or("", String::as_str);
        validators.iter().find_map(|validate| validate(value).err())
    }

    /// Validate every field in the schema
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|(name, _)| {
                self.validate_field(name, values)
                    .map(|message| (name.clone(), message))
            })
            .collect()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// Rules for the registration form
pub fn signup_schema() -> ValidationSchema {
    ValidationSchema::new()
        .field(FIRST_NAME, vec![required("First name is required")])
        .field(LAST_NAME, vec![required("Last name is required")])
        .field(
            EMAIL,
            vec![
                required("Email is required"),
                email("Must be a valid email"),
            ],
        )
        .field(
            PASSWORD,
            vec![
                present("Please provide a password"),
                min_length(
                    8,
                    "Password is too short - it should be at least 8 characters",
                ),
                contains_latin("Password can only contain Latin Characters"),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = signup_schema().validate(&FormValues::new());
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[FIRST_NAME], "First name is required");
        assert_eq!(errors[LAST_NAME], "Last name is required");
        assert_eq!(errors[EMAIL], "Email is required");
        assert_eq!(errors[PASSWORD], "Please provide a password");
    }

    #[test]
    fn test_whitespace_names_are_rejected() {
        let errors = signup_schema().validate(&values(&[(FIRST_NAME, "   ")]));
        assert_eq!(errors[FIRST_NAME], "First name is required");
    }

    #[test]
    fn test_email_format() {
        let schema = signup_schema();
        assert_eq!(
            schema.validate_field(EMAIL, &values(&[(EMAIL, "not-an-email")])),
            Some("Must be a valid email".to_string())
        );
        assert_eq!(
            schema.validate_field(EMAIL, &values(&[(EMAIL, " a@b.com ")])),
            None
        );
    }

    #[test]
    fn test_password_rules_in_order() {
        let schema = signup_schema();
        assert_eq!(
            schema.validate_field(PASSWORD, &values(&[(PASSWORD, "abc")])),
            Some("Password is too short - it should be at least 8 characters".to_string())
        );
        assert_eq!(
            schema.validate_field(PASSWORD, &values(&[(PASSWORD, "12345678")])),
            Some("Password can only contain Latin Characters".to_string())
        );
        assert_eq!(
            schema.validate_field(PASSWORD, &values(&[(PASSWORD, "password1")])),
            None
        );
    }

    #[test]
    fn test_complete_form_is_valid() {
        let errors = signup_schema().validate(&values(&[
            (FIRST_NAME, "A"),
            (LAST_NAME, "B"),
            (EMAIL, "a@b.com"),
            (PASSWORD, "password1"),
        ]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_field_has_no_rules() {
        assert_eq!(signup_schema().validate_field("nickname", &FormValues::new()), None);
    }
}
