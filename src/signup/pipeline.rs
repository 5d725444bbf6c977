//! Submission pipeline: form values -> `registerUser` -> stored credential

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use super::pages::{EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use crate::api::{ApiError, RegisterUserVariables, UserRegistrar};
use crate::auth::{CredentialError, CredentialStore};
use crate::wizard::FormValues;

#[derive(Error, Debug)]
pub enum SignupError {
    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("registration succeeded but the credential could not be stored: {0}")]
    Credential(#[from] CredentialError),
}

/// Select the mutation parameters from the form values; extra fields are dropped
pub fn parse_values(values: &FormValues) -> Result<RegisterUserVariables, SignupError> {
    let field = |name: &'static str| {
        values
            .get(name)
            .cloned()
            .ok_or(SignupError::MissingField(name))
    };

    Ok(RegisterUserVariables {
        first_name: field(FIRST_NAME)?,
        last_name: field(LAST_NAME)?,
        email: field(EMAIL)?,
        password: field(PASSWORD)?,
    })
}

/// Performs the remote registration and persists the returned credential
pub struct SubmissionPipeline {
    registrar: Arc<dyn UserRegistrar>,
    credentials: Arc<dyn CredentialStore>,
}

impl SubmissionPipeline {
    pub fn new(registrar: Arc<dyn UserRegistrar>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            registrar,
            credentials,
        }
    }

    /// Submit the form values, returning the stored token.
    ///
    /// Failures are logged and returned; nothing is stored on failure.
    pub async fn run(&self, values: &FormValues) -> Result<String, SignupError> {
        let result = self.register(values).await;
        match &result {
            Ok(_) => info!("registration complete"),
            Err(e) => error!(error = %e, "registration failed"),
        }
        result
    }

    async fn register(&self, values: &FormValues) -> Result<String, SignupError> {
        let variables = parse_values(values)?;
        let token = self.registrar.register_user(&variables).await?;
        self.credentials.set_access_token(&token)?;
        Ok(token)
    }
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
    fn test_parse_values_drops_extra_fields() {
        let parsed = parse_values(&values(&[
            (FIRST_NAME, "A"),
            (LAST_NAME, "B"),
            (EMAIL, "a@b.com"),
            (PASSWORD, "password1"),
            ("newsletter", "yes"),
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            RegisterUserVariables {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                email: "a@b.com".to_string(),
                password: "password1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_values_missing_field() {
        let err = parse_values(&values(&[(FIRST_NAME, "A")])).unwrap_err();
        assert!(matches!(err, SignupError::MissingField(LAST_NAME)));
    }
}
