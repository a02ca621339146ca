use chrono::{DateTime, Utc};
use intake_core::{
    models::{CaseType, IntakeSubmission, NewIntakeSubmission, SubmissionStatus, Urgency},
    AppError,
};
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

/// Row shape of `intake_submissions`; enumerations are stored as text.
#[derive(Debug, FromRow)]
struct IntakeSubmissionRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    case_type: String,
    case_description: String,
    incident_date: Option<String>,
    location: Option<String>,
    urgency: String,
    created_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<IntakeSubmissionRow> for IntakeSubmission {
    type Error = AppError;

    fn try_from(row: IntakeSubmissionRow) -> Result<Self, Self::Error> {
        Ok(IntakeSubmission {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            case_type: row.case_type.parse::<CaseType>()?,
            case_description: row.case_description,
            incident_date: row.incident_date,
            location: row.location,
            urgency: row.urgency.parse::<Urgency>()?,
            created_at: row.created_at,
            status: row.status.parse::<SubmissionStatus>()?,
        })
    }
}

/// Repository for intake submissions
#[derive(Clone)]
pub struct IntakeSubmissionRepository {
    pool: PgPool,
}

impl IntakeSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one submission and read the stored row back in the same statement.
    #[tracing::instrument(
        skip(self, submission),
        fields(
            db.table = "intake_submissions",
            db.operation = "insert",
            db.record_id = %submission.id
        )
    )]
    pub async fn insert(
        &self,
        submission: &NewIntakeSubmission,
    ) -> Result<IntakeSubmission, AppError> {
        let row = sqlx::query_as::<Postgres, IntakeSubmissionRow>(
            r#"
            INSERT INTO intake_submissions (
                id, first_name, last_name, email, phone, case_type, case_description,
                incident_date, location, urgency, created_at, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, first_name, last_name, email, phone, case_type, case_description,
                      incident_date, location, urgency, created_at, status
            "#,
        )
        .bind(submission.id)
        .bind(&submission.first_name)
        .bind(&submission.last_name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(submission.case_type.as_str())
        .bind(&submission.case_description)
        .bind(submission.incident_date.as_deref())
        .bind(submission.location.as_deref())
        .bind(submission.urgency.as_str())
        .bind(submission.created_at)
        .bind(submission.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Round trip to the database, used by readiness probes
    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(case_type: &str, status: &str) -> IntakeSubmissionRow {
        IntakeSubmissionRow {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            case_type: case_type.to_string(),
            case_description: "Defective product injury".to_string(),
            incident_date: Some("last spring".to_string()),
            location: None,
            urgency: "medium".to_string(),
            created_at: Utc::now(),
            status: status.to_string(),
        }
    }

    #[test]
    fn row_decodes_text_enumerations() {
        let submission = IntakeSubmission::try_from(row("consumer_protection", "pending")).unwrap();
        assert_eq!(submission.case_type, CaseType::ConsumerProtection);
        assert_eq!(submission.urgency, Urgency::Medium);
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.incident_date.as_deref(), Some("last spring"));
    }

    #[test]
    fn unknown_stored_value_is_internal_error() {
        let err = IntakeSubmission::try_from(row("maritime", "pending")).unwrap_err();
        assert!(matches!(err, AppError::InternalWithSource { .. }));
    }
}
