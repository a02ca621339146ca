//! Store trait consumed by the HTTP layer
//!
//! The handler only needs to persist one record and to probe readiness, so the
//! seam is kept that narrow. `IntakeSubmissionRepository` is the production impl.

use async_trait::async_trait;
use intake_core::models::{IntakeSubmission, NewIntakeSubmission};
use intake_core::AppError;

use crate::db::IntakeSubmissionRepository;

#[async_trait]
pub trait IntakeStore: Send + Sync {
    /// Persist one validated submission and return the stored record
    async fn insert_submission(
        &self,
        submission: NewIntakeSubmission,
    ) -> Result<IntakeSubmission, AppError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<(), AppError>;
}

#[async_trait]
impl IntakeStore for IntakeSubmissionRepository {
    async fn insert_submission(
        &self,
        submission: NewIntakeSubmission,
    ) -> Result<IntakeSubmission, AppError> {
        self.insert(&submission).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ping().await
    }
}
