use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use intake_core::models::{IntakeResponse, IntakeSubmissionRequest};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Validate an intake submission and store it.
///
/// Validation failures never reach the store. A store failure is logged with its
/// cause and answered with a generic 500.
#[utoipa::path(
    post,
    path = "/api/intake",
    tag = "intake",
    request_body = IntakeSubmissionRequest,
    responses(
        (status = 200, description = "Case submitted", body = IntakeResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(operation = "create_intake"))]
pub async fn create_intake(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<JsonValue>,
) -> Result<impl IntoResponse, HttpAppError> {
    let submission = IntakeSubmissionRequest::from_json(body)?.into_new_submission(Utc::now())?;

    // A failed insert is logged with its cause when the error response is rendered.
    let stored = state.store.insert_submission(submission).await?;

    tracing::info!(
        submission_id = %stored.id,
        case_type = %stored.case_type,
        urgency = %stored.urgency,
        "Intake submission stored"
    );

    Ok((StatusCode::OK, Json(IntakeResponse::created(stored))))
}
