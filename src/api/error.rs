//! Errors raised while talking to the registration API

use thiserror::Error;

/// Errors that can occur when calling the GraphQL API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 Unauthorized
    #[error("{operation}: Unauthorized (401)")]
    Unauthorized { operation: String },

    /// 403 Forbidden
    #[error("{operation}: Forbidden (403) - insufficient permissions")]
    Forbidden { operation: String },

    /// 429 Rate Limited
    #[error("{operation}: Rate limited")]
    RateLimited {
        operation: String,
        retry_after_secs: Option<u64>,
    },

    /// Connection, DNS or transport failure
    #[error("{operation}: Network error - {message}")]
    Network { operation: String, message: String },

    /// Any other non-success HTTP status
    #[error("{operation}: HTTP {status} - {message}")]
    Http {
        operation: String,
        status: u16,
        message: String,
    },

    /// The server answered with GraphQL errors
    #[error("{operation}: {}", .messages.join("; "))]
    GraphQl {
        operation: String,
        messages: Vec<String>,
    },

    /// Response body could not be decoded
    #[error("{operation}: Parse error - {message}")]
    Decode { operation: String, message: String },

    /// Mutation succeeded but carried no credential
    #[error("{operation}: No token in response")]
    MissingToken { operation: String },
}

impl ApiError {
    pub fn unauthorized(operation: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            operation: operation.into(),
        }
    }

    pub fn forbidden(operation: impl Into<String>) -> Self {
        ApiError::Forbidden {
            operation: operation.into(),
        }
    }

    pub fn rate_limited(operation: impl Into<String>, retry_after: Option<u64>) -> Self {
        ApiError::RateLimited {
            operation: operation.into(),
            retry_after_secs: retry_after,
        }
    }

    pub fn network(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Network {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn http(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    pub fn graphql(operation: impl Into<String>, messages: Vec<String>) -> Self {
        ApiError::GraphQl {
            operation: operation.into(),
            messages,
        }
    }

    pub fn decode(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Decode {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn missing_token(operation: impl Into<String>) -> Self {
        ApiError::MissingToken {
            operation: operation.into(),
        }
    }

    /// Whether retrying the same request later could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited { .. } | ApiError::Network { .. } => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(ApiError::network("op", "connection refused").is_retryable());
        assert!(ApiError::rate_limited("op", Some(5)).is_retryable());
        assert!(ApiError::http("op", 502, "bad gateway").is_retryable());
        assert!(!ApiError::http("op", 400, "bad request").is_retryable());
        assert!(!ApiError::forbidden("op").is_retryable());
        assert!(!ApiError::missing_token("op").is_retryable());
    }

    #[test]
    fn test_display() {
        let err = ApiError::graphql(
            "registerUser",
            vec!["email taken".to_string(), "try again".to_string()],
        );
        assert_eq!(err.to_string(), "registerUser: email taken; try again");

        let err = ApiError::http("registerUser", 500, "boom");
        assert_eq!(err.to_string(), "registerUser: HTTP 500 - boom");
    }
}
