//! The `registerUser` mutation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::graphql::GraphQlClient;

const OPERATION: &str = "registerUser";

pub const REGISTER_USER_MUTATION: &str = r#"
    mutation registerUser(
        $firstName: String!
        $lastName: String!
        $email: String!
        $password: String!
    ) {
        registerUser(
            firstName: $firstName
            lastName: $lastName
            email: $email
            password: $password
        ) {
            token
        }
    }
"#;

/// Named parameters of the mutation
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserVariables {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterUserVariables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserVariables")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `registerUser { token }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterUserPayload {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUserData {
    register_user: Option<RegisterUserPayload>,
}

/// Anything able to perform the registration mutation
#[async_trait]
pub trait UserRegistrar: Send + Sync {
    /// Register a user, returning the issued credential
    async fn register_user(&self, variables: &RegisterUserVariables) -> Result<String, ApiError>;
}

#[async_trait]
impl UserRegistrar for GraphQlClient {
    async fn register_user(&self, variables: &RegisterUserVariables) -> Result<String, ApiError> {
        let variables =
            serde_json::to_value(variables).map_err(|e| ApiError::decode(OPERATION, e.to_string()))?;

        let data: RegisterUserData = self
            .execute(OPERATION, REGISTER_USER_MUTATION, Some(variables))
            .await?;

        extract_token(data)
    }
}

fn extract_token(data: RegisterUserData) -> Result<String, ApiError> {
    data.register_user
        .and_then(|payload| payload.token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::missing_token(OPERATION))
}
