//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use intake_core::{models, FieldViolation};

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "Legal case intake: validates a prospective client's submission and stores it for review."
    ),
    paths(handlers::intake::create_intake),
    components(
        schemas(
            models::IntakeSubmissionRequest,
            models::IntakeSubmission,
            models::IntakeResponse,
            models::CaseType,
            models::Urgency,
            models::SubmissionStatus,
            FieldViolation,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "intake", description = "Case intake submissions")
    )
)]
pub struct ApiDoc;
