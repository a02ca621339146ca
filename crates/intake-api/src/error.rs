//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors so they become
//! `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::{AppError, ErrorMetadata, FieldViolation, LogLevel};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Field-level violations, sorted by field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    /// Create a simple error response with default values
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_type: None,
            code: code.into(),
            violations: None,
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from intake-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// A body that is not JSON fails validation on the `body` field; an oversized body is a 413.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        let body_text = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return HttpAppError(AppError::PayloadTooLarge(body_text));
        }
        HttpAppError(AppError::Validation(vec![FieldViolation::new(
            "body",
            "invalid_json",
            format!("Invalid request body: {}", body_text),
        )]))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Json<T>` when you want a consistent API error shape for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl HttpAppError {
    fn to_error_response(&self, is_production: bool) -> ErrorResponse {
        let app_error = &self.0;
        let mut body = ErrorResponse::new(app_error.client_message(), app_error.error_code());
        body.violations = app_error.violations().map(<[FieldViolation]>::to_vec);

        // Always hide details in production; elsewhere only non-sensitive errors show them.
        if !is_production && !app_error.is_sensitive() {
            body.details = Some(app_error.detailed_message());
            body.error_type = Some(app_error.error_type().to_string());
        }
        body
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        let body = self.to_error_response(is_production_env());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_violations() {
        let err = HttpAppError(AppError::Validation(vec![FieldViolation::new(
            "urgency",
            "urgency",
            "Urgency must be one of: low, medium, high",
        )]));
        let body = err.to_error_response(false);
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.code, "VALIDATION_FAILED");
        assert_eq!(body.violations.as_ref().map(Vec::len), Some(1));
        assert!(body.details.is_some());
    }

    #[test]
    fn test_database_error_is_generic() {
        let err = HttpAppError(AppError::from(sqlx::Error::PoolClosed));
        let body = err.to_error_response(false);
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.code, "DATABASE_ERROR");
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
        assert!(body.violations.is_none());
    }

    #[test]
    fn test_production_hides_details_but_keeps_violations() {
        let err = HttpAppError(AppError::Validation(vec![FieldViolation::new(
            "email",
            "email",
            "Invalid email address",
        )]));
        let body = err.to_error_response(true);
        assert!(body.details.is_none());
        assert_eq!(body.violations.map(|v| v[0].field.clone()), Some("email".to_string()));
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("Validation failed", "VALIDATION_FAILED"))
            .expect("serialize");
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert!(json.get("details").is_none());
        assert!(json.get("violations").is_none());
    }
}
