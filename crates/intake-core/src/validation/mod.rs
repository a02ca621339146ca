//! Validation modules
//!
//! The per-field rules themselves are declared on the request model with
//! `#[derive(Validate)]`; this module turns `validator` output into the
//! field-level violation list returned to callers.

pub mod email;
pub mod enumerations;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

pub use email::validate_email_domain;
pub use enumerations::{validate_case_type, validate_urgency, RawEnumValue};

/// One failed constraint on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Request field name (e.g. `email`), or `body` when no field applies
    pub field: String,
    /// Machine-readable rule name (e.g. `required`, `length`, `email`)
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Flatten `validator` errors into violations, sorted by field name.
pub fn violations_from_errors(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                FieldViolation::new(field.clone(), e.code.to_string(), message)
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    violations
}
