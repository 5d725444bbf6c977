//! Minimal GraphQL-over-HTTP client

use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use crate::config::ApiConfig;

/// GraphQL endpoint client
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    endpoint: String,
    client: Client,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a query or mutation and decode its `data` member
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let request = GraphQlRequest { query, variables };

        debug!(operation, endpoint = %self.endpoint, "GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::network(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(operation, status.as_u16(), retry_after, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(operation, e.to_string()))?;

        decode_response(operation, &body)
    }
}

/// Map a non-success HTTP status to an error
fn status_error(operation: &str, status: u16, retry_after: Option<u64>, body: String) -> ApiError {
    match status {
        401 => ApiError::unauthorized(operation),
        403 => ApiError::forbidden(operation),
        429 => ApiError::rate_limited(operation, retry_after),
        _ => ApiError::http(operation, status, body),
    }
}

/// Decode a GraphQL response body, surfacing `errors` before `data`
pub(crate) fn decode_response<T: DeserializeOwned>(
    operation: &str,
    body: &str,
) -> Result<T, ApiError> {
    let response: GraphQlResponse<T> =
        serde_json::from_str(body).map_err(|e| ApiError::decode(operation, e.to_string()))?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors.into_iter().map(|e| e.message).collect();
        return Err(ApiError::graphql(operation, messages));
    }

    response
        .data
        .ok_or_else(|| ApiError::decode(operation, "No data in response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        value: String,
    }

    #[test]
    fn test_decode_data() {
        let echo: Echo = decode_response("echo", r#"{"data":{"value":"hi"}}"#).unwrap();
        assert_eq!(echo.value, "hi");
    }

    #[test]
    fn test_decode_errors_take_precedence() {
        let body = r#"{"data":null,"errors":[{"message":"a"},{"message":"b"}]}"#;
        let err = decode_response::<Echo>("echo", body).unwrap_err();
        assert_eq!(
            err,
            ApiError::graphql("echo", vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_decode_empty_errors_list_is_ignored() {
        let body = r#"{"data":{"value":"ok"},"errors":[]}"#;
        let echo: Echo = decode_response("echo", body).unwrap();
        assert_eq!(echo.value, "ok");
    }

    #[test]
    fn test_decode_missing_data() {
        let err = decode_response::<Echo>("echo", r#"{"data":null}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert!(err.to_string().contains("No data in response"));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode_response::<Echo>("echo", "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error("op", 401, None, String::new()),
            ApiError::unauthorized("op")
        );
        assert_eq!(
            status_error("op", 429, Some(7), String::new()),
            ApiError::rate_limited("op", Some(7))
        );
        assert_eq!(
            status_error("op", 500, None, "oops".to_string()),
            ApiError::http("op", 500, "oops")
        );
    }

    #[test]
    fn test_request_omits_null_variables() {
        let request = GraphQlRequest {
            query: "{ ping }",
            variables: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "query": "{ ping }" }));
    }
}
