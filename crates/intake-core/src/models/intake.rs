use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::validation::{
    validate_case_type, validate_email_domain, validate_urgency, violations_from_errors,
    FieldViolation,
};

/// Confirmation message returned with every stored submission.
pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Case submitted successfully";

/// Kind of legal matter the submitter is asking about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    PersonalInjury,
    ConsumerProtection,
    Other,
}

impl CaseType {
    pub const VARIANTS: &'static [&'static str] =
        &["personal_injury", "consumer_protection", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::PersonalInjury => "personal_injury",
            CaseType::ConsumerProtection => "consumer_protection",
            CaseType::Other => "other",
        }
    }
}

impl Display for CaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal_injury" => Ok(CaseType::PersonalInjury),
            "consumer_protection" => Ok(CaseType::ConsumerProtection),
            "other" => Ok(CaseType::Other),
            _ => Err(anyhow::anyhow!("Invalid case type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const VARIANTS: &'static [&'static str] = &["low", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl Display for Urgency {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            _ => Err(anyhow::anyhow!("Invalid urgency: {}", s)),
        }
    }
}

/// Review state of a stored submission. This service only ever writes `Pending`;
/// the remaining values are set by downstream case management.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Reviewing,
    Accepted,
    Declined,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Reviewing => "reviewing",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Declined => "declined",
        }
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "reviewing" => Ok(SubmissionStatus::Reviewing),
            "accepted" => Ok(SubmissionStatus::Accepted),
            "declined" => Ok(SubmissionStatus::Declined),
            _ => Err(anyhow::anyhow!("Invalid submission status: {}", s)),
        }
    }
}

/// Stored intake submission, as read back from `intake_submissions`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IntakeSubmission {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub case_type: CaseType,
    pub case_description: String,
    pub incident_date: Option<String>,
    pub location: Option<String>,
    pub urgency: Urgency,
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

/// Raw request body for `POST /api/intake`.
///
/// Every field is optional at the type level so that a missing or unknown value is
/// reported per field by the validation schema rather than as a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct IntakeSubmissionRequest {
    #[validate(
        required(message = "First name is required"),
        length(min = 1, message = "First name is required")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Last name is required"),
        length(min = 1, message = "Last name is required")
    )]
    pub last_name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address"),
        custom(function = "validate_email_domain")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Phone number is required"),
        length(min = 1, message = "Phone number is required")
    )]
    pub phone: Option<String>,
    #[validate(
        required(message = "Case type is required"),
        custom(function = "validate_case_type")
    )]
    #[schema(example = "personal_injury")]
    pub case_type: Option<String>,
    #[validate(
        required(message = "Case description is required"),
        length(min = 10, message = "Case description must be at least 10 characters")
    )]
    pub case_description: Option<String>,
    pub incident_date: Option<String>,
    pub location: Option<String>,
    #[validate(
        required(message = "Urgency is required"),
        custom(function = "validate_urgency")
    )]
    #[schema(example = "medium")]
    pub urgency: Option<String>,
}

impl IntakeSubmissionRequest {
    /// Every field the request accepts; anything else in a body is ignored.
    pub const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "phone",
        "case_type",
        "case_description",
        "incident_date",
        "location",
        "urgency",
    ];

    /// Decode an arbitrary JSON body.
    ///
    /// Fields holding a non-text value are reported as `invalid_type` violations,
    /// together with the schema violations of the remaining fields. A body that
    /// is not an object is a single violation on `body`.
    pub fn from_json(body: JsonValue) -> Result<Self, AppError> {
        let mut map = match body {
            JsonValue::Object(map) => map,
            other => {
                return Err(AppError::Validation(vec![FieldViolation::new(
                    "body",
                    "invalid_type",
                    format!("Expected object, received {}", json_type_name(&other)),
                )]))
            }
        };

        let mut mistyped = Vec::new();
        for field in Self::FIELDS {
            let is_text = matches!(
                map.get(*field),
                None | Some(JsonValue::Null) | Some(JsonValue::String(_))
            );
            if !is_text {
                if let Some(value) = map.remove(*field) {
                    mistyped.push(FieldViolation::new(
                        *field,
                        "invalid_type",
                        format!("Expected string, received {}", json_type_name(&value)),
                    ));
                }
            }
        }

        let request: Self = serde_json::from_value(JsonValue::Object(map))?;
        if mistyped.is_empty() {
            return Ok(request);
        }

        let mut violations = mistyped;
        if let Err(errors) = request.validate() {
            let remaining: Vec<FieldViolation> = violations_from_errors(&errors)
                .into_iter()
                .filter(|v| !violations.iter().any(|m| m.field == v.field))
                .collect();
            violations.extend(remaining);
        }
        violations.sort_by(|a, b| a.field.cmp(&b.field));

        Err(AppError::Validation(violations))
    }

    /// Validate and stamp the server-assigned columns.
    ///
    /// `created_at` and `status` never come from the caller; the id is fresh for
    /// every call, so identical requests produce distinct rows.
    pub fn into_new_submission(
        self,
        created_at: DateTime<Utc>,
    ) -> Result<NewIntakeSubmission, AppError> {
        self.validate()?;

        Ok(NewIntakeSubmission {
            id: Uuid::new_v4(),
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
            email: required(self.email, "email")?,
            phone: required(self.phone, "phone")?,
            case_type: required(self.case_type, "case_type")?
                .parse::<CaseType>()
                .map_err(AppError::from)?,
            case_description: required(self.case_description, "case_description")?,
            incident_date: self.incident_date,
            location: self.location,
            urgency: required(self.urgency, "urgency")?
                .parse::<Urgency>()
                .map_err(AppError::from)?,
            created_at,
            status: SubmissionStatus::Pending,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Internal(format!("{} missing after validation", field)))
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Typed intake form filled in on the client side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IntakeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub case_type: CaseType,
    pub case_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub urgency: Urgency,
}

impl IntakeForm {
    /// Run the server's validation schema locally.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        IntakeSubmissionRequest::from(self)
            .validate()
            .map_err(|e| violations_from_errors(&e))
    }
}

impl From<&IntakeForm> for IntakeSubmissionRequest {
    fn from(form: &IntakeForm) -> Self {
        IntakeSubmissionRequest {
            first_name: Some(form.first_name.clone()),
            last_name: Some(form.last_name.clone()),
            email: Some(form.email.clone()),
            phone: Some(form.phone.clone()),
            case_type: Some(form.case_type.to_string()),
            case_description: Some(form.case_description.clone()),
            incident_date: form.incident_date.clone(),
            location: form.location.clone(),
            urgency: Some(form.urgency.to_string()),
        }
    }
}

/// Validated submission ready for insertion, server-assigned columns included.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIntakeSubmission {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub case_type: CaseType,
    pub case_description: String,
    pub incident_date: Option<String>,
    pub location: Option<String>,
    pub urgency: Urgency,
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

impl From<NewIntakeSubmission> for IntakeSubmission {
    fn from(new: NewIntakeSubmission) -> Self {
        IntakeSubmission {
            id: new.id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            case_type: new.case_type,
            case_description: new.case_description,
            incident_date: new.incident_date,
            location: new.location,
            urgency: new.urgency,
            created_at: new.created_at,
            status: new.status,
        }
    }
}

/// Success body of `POST /api/intake`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IntakeResponse {
    pub success: bool,
    pub message: String,
    pub data: IntakeSubmission,
}

impl IntakeResponse {
    pub fn created(data: IntakeSubmission) -> Self {
        IntakeResponse {
            success: true,
            message: SUBMISSION_SUCCESS_MESSAGE.to_string(),
            data,
        }
    }
}
