//! HTTP client for the intake API.
//!
//! `IntakeClient` posts forms to `POST /api/intake` and decodes the server's success
//! and error bodies. `IntakeFormHandler` wraps it with local validation and
//! user-facing notifications.

pub mod form;
pub mod notify;

pub use form::{IntakeFormHandler, SubmissionOutcome};
pub use notify::{Notification, Notifier, Severity, TracingNotifier};

use intake_core::models::{IntakeForm, IntakeResponse};
use intake_core::FieldViolation;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:4000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const INTAKE_PATH: &str = "/api/intake";

/// Message used when a response carries an `error` member without a message
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to submit form";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        violations: Vec<FieldViolation>,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Form is invalid: {} field violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),
}

impl ClientError {
    /// Message worth showing to the person who filled in the form.
    ///
    /// Transport and decode failures have none; the caller falls back to a generic prompt.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ClientError::Transport(_) | ClientError::Decode(_) => None,
            ClientError::Api {
                message,
                violations,
                ..
            } => Some(match violations.first() {
                Some(first) => format!("{}: {}", message, first.message),
                None => message.clone(),
            }),
            ClientError::Validation(violations) => violations.first().map(|v| v.message.clone()),
        }
    }
}

/// Error body as rendered by the intake API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    #[serde(default)]
    violations: Vec<FieldViolation>,
}

/// HTTP client for the intake API.
#[derive(Clone, Debug)]
pub struct IntakeClient {
    client: Client,
    base_url: String,
}

impl IntakeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: INTAKE_API_URL (or API_URL), INTAKE_CLIENT_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("INTAKE_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("INTAKE_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit one form. Exactly one request is sent; nothing is retried.
    #[tracing::instrument(skip(self, form), fields(base_url = %self.base_url))]
    pub async fn submit_intake(&self, form: &IntakeForm) -> Result<IntakeResponse, ClientError> {
        let response = self
            .client
            .post(self.build_url(INTAKE_PATH))
            .json(form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        let body: JsonValue = serde_json::from_str(&text)
            .map_err(|e| ClientError::Decode(format!("invalid JSON: {}", e)))?;

        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(JsonValue::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(FALLBACK_ERROR_MESSAGE)
                .to_string();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
                violations: Vec::new(),
            });
        }

        serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn api_error(status: StatusCode, text: &str) -> ClientError {
    let parsed = serde_json::from_str::<ApiErrorBody>(text).ok();
    let (message, violations) = match parsed {
        Some(ApiErrorBody {
            error: Some(error),
            violations,
        }) => (error, violations),
        Some(ApiErrorBody { violations, .. }) => (status_message(status), violations),
        None => (status_message(status), Vec::new()),
    };

    ClientError::Api {
        status: status.as_u16(),
        message,
        violations,
    }
}

fn status_message(status: StatusCode) -> String {
    format!(
        "Request failed with status {}",
        status.canonical_reason().unwrap_or(status.as_str())
    )
}


#[cfg(test)]
mod tests {
    use super::test_support::{form, success_body};
    use super::*;
    use intake_core::models::SubmissionStatus;
    use serde_json::json;

    async fn client_for(server: &mockito::Server) -> IntakeClient {
        IntakeClient::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = IntakeClient::new("http://intake.local/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.build_url(INTAKE_PATH), "http://intake.local/api/intake");
    }

    #[tokio::test]
    async fn test_submit_intake_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/intake")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(json!({
                "case_type": "consumer_protection",
                "urgency": "medium"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body().to_string())
            .create_async()
            .await;

        let response = client_for(&server).await.submit_intake(&form()).await.unwrap();

        mock.assert_async().await;
        assert!(response.success);
        assert_eq!(response.message, "Case submitted successfully");
        assert_eq!(response.data.status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_violations() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/intake")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_FAILED",
                    "violations": [
                        {"field": "email", "code": "email", "message": "Invalid email address"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server).await.submit_intake(&form()).await.unwrap_err();

        match &err {
            ClientError::Api {
                status,
                message,
                violations,
            } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "Validation failed");
                assert_eq!(violations[0].field, "email");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert_eq!(
            err.user_message().as_deref(),
            Some("Validation failed: Invalid email address")
        );
    }

    #[tokio::test]
    async fn test_server_error_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/intake")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let err = client_for(&server).await.submit_intake(&form()).await.unwrap_err();

        match err {
            ClientError::Api { status, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Request failed with status Bad Gateway");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_member_in_success_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/intake")
            .with_status(200)
            .with_body(json!({"success": false, "error": {"code": "X"}}).to_string())
            .create_async()
            .await;

        let err = client_for(&server).await.submit_intake(&form()).await.unwrap_err();

        assert_eq!(err.user_message().as_deref(), Some(FALLBACK_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/intake")
            .with_status(200)
            .with_body(json!({"success": true}).to_string())
            .create_async()
            .await;

        let err = client_for(&server).await.submit_intake(&form()).await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
        assert!(err.user_message().is_none());
    }
}
