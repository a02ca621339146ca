//! Intake form submission handler.
//!
//! One call to [`IntakeFormHandler::submit`] makes at most one request and emits
//! exactly one notification.

use intake_core::models::{IntakeForm, IntakeSubmission};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::notify::{Notification, Notifier};
use crate::{ClientError, IntakeClient};

pub const SUCCESS_TITLE: &str = "Case Submitted Successfully!";
pub const SUCCESS_DESCRIPTION: &str = "We'll review your case and get back to you within 24 hours.";
pub const FAILURE_TITLE: &str = "Submission Failed";
pub const GENERIC_FAILURE_DESCRIPTION: &str = "Please try again or contact us directly.";

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Success { data: IntakeSubmission },
    Failure { message: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    /// `{success, data}` or `{success, error}`, the shape form callers consume
    pub fn to_json(&self) -> JsonValue {
        match self {
            SubmissionOutcome::Success { data } => json!({ "success": true, "data": data }),
            SubmissionOutcome::Failure { message } => json!({ "success": false, "error": message }),
        }
    }
}

/// Submits intake forms and tells the user how it went.
pub struct IntakeFormHandler<N> {
    client: IntakeClient,
    notifier: N,
}

impl<N: Notifier> IntakeFormHandler<N> {
    pub fn new(client: IntakeClient, notifier: N) -> Self {
        Self { client, notifier }
    }

    /// Validate locally, send, and notify. Never retries.
    #[tracing::instrument(skip(self, form), fields(case_type = %form.case_type, urgency = %form.urgency))]
    pub async fn submit(&self, form: &IntakeForm) -> SubmissionOutcome {
        match self.send(form).await {
            Ok(data) => {
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION));
                SubmissionOutcome::Success { data }
            }
            Err(e) => {
                tracing::error!(error = %e, "Form submission error");
                let message = e
                    .user_message()
                    .unwrap_or_else(|| GENERIC_FAILURE_DESCRIPTION.to_string());
                self.notifier
                    .notify(Notification::error(FAILURE_TITLE, message.clone()));
                SubmissionOutcome::Failure { message }
            }
        }
    }

    async fn send(&self, form: &IntakeForm) -> Result<IntakeSubmission, ClientError> {
        form.validate().map_err(ClientError::Validation)?;
        let response = self.client.submit_intake(form).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::test_support::{form, success_body};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<Notification>>>,
    }

    impl RecordingNotifier {
        fn sent(&self) -> Vec<Notification> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.sent.lock().unwrap().push(notification);
        }
    }

    fn handler(base_url: &str) -> (IntakeFormHandler<RecordingNotifier>, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let client = IntakeClient::new(base_url, Duration::from_secs(5)).unwrap();
        (IntakeFormHandler::new(client, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_success_notifies_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/intake")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body().to_string())
            .expect(1)
            .create_async()
            .await;
        let (handler, notifier) = handler(&server.url());

        let outcome = handler.submit(&form()).await;

        mock.assert_async().await;
        assert!(outcome.is_success());
        assert_eq!(
            notifier.sent(),
            vec![Notification {
                title: SUCCESS_TITLE.to_string(),
                description: SUCCESS_DESCRIPTION.to_string(),
                severity: Severity::Success,
            }]
        );
        assert_eq!(outcome.to_json()["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/intake")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(json!({"error": "Internal server error", "code": "DATABASE_ERROR"}).to_string())
            .expect(1)
            .create_async()
            .await;
        let (handler, notifier) = handler(&server.url());

        let outcome = handler.submit(&form()).await;

        mock.assert_async().await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                message: "Internal server error".to_string()
            }
        );
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, FAILURE_TITLE);
        assert_eq!(sent[0].severity, Severity::Error);
        assert_eq!(outcome.to_json(), json!({"success": false, "error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_network_failure_uses_generic_message() {
        // Nothing listens on port 1.
        let (handler, notifier) = handler("http://127.0.0.1:1");

        let outcome = handler.submit(&form()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                message: GENERIC_FAILURE_DESCRIPTION.to_string()
            }
        );
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].description, GENERIC_FAILURE_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/intake")
            .expect(0)
            .create_async()
            .await;
        let (handler, notifier) = handler(&server.url());
        let mut invalid = form();
        invalid.case_description = "too short".to_string();

        let outcome = handler.submit(&invalid).await;

        mock.assert_async().await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                message: "Case description must be at least 10 characters".to_string()
            }
        );
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_error_member_without_message_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/intake")
            .with_status(200)
            .with_body(json!({"success": false, "error": {}}).to_string())
            .create_async()
            .await;
        let (handler, notifier) = handler(&server.url());

        let outcome = handler.submit(&form()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failure {
                message: crate::FALLBACK_ERROR_MESSAGE.to_string()
            }
        );
        assert_eq!(notifier.sent()[0].description, crate::FALLBACK_ERROR_MESSAGE);
    }
}
