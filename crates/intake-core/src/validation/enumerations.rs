//! Membership rules for the enumerated intake fields.
//!
//! Requests carry `case_type` and `urgency` as raw text so that an unknown value is
//! reported against its field instead of failing the whole body. These functions
//! are wired into the schema with `#[validate(custom(function = ...))]`.

use std::borrow::Cow;
use std::str::FromStr;

use validator::ValidationError;

use crate::models::{CaseType, Urgency};

/// Raw text that may or may not name an enumeration value.
pub trait RawEnumValue {
    fn raw(&self) -> Option<&str>;
}

impl RawEnumValue for str {
    fn raw(&self) -> Option<&str> {
        Some(self)
    }
}

impl RawEnumValue for String {
    fn raw(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: RawEnumValue + ?Sized> RawEnumValue for &T {
    fn raw(&self) -> Option<&str> {
        (**self).raw()
    }
}

impl<T: RawEnumValue> RawEnumValue for Option<T> {
    fn raw(&self) -> Option<&str> {
        self.as_ref().and_then(|v| v.raw())
    }
}

fn check_member<E: FromStr>(
    value: Option<&str>,
    code: &'static str,
    message: String,
) -> Result<(), ValidationError> {
    // Absence is reported by the `required` rule.
    let Some(value) = value else {
        return Ok(());
    };

    if E::from_str(value).is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err.add_param(Cow::Borrowed("value"), &value);
    Err(err)
}

pub fn validate_case_type<T: RawEnumValue + ?Sized>(value: &T) -> Result<(), ValidationError> {
    check_member::<CaseType>(
        value.raw(),
        "case_type",
        format!("Case type must be one of: {}", CaseType::VARIANTS.join(", ")),
    )
}

pub fn validate_urgency<T: RawEnumValue + ?Sized>(value: &T) -> Result<(), ValidationError> {
    check_member::<Urgency>(
        value.raw(),
        "urgency",
        format!("Urgency must be one of: {}", Urgency::VARIANTS.join(", ")),
    )
}
