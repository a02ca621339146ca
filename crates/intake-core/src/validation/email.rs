//! Domain rule for email addresses.
//!
//! `validator`'s `email` rule follows HTML5 and accepts single-label hosts
//! (`user@localhost`) and IP literals. Intake addresses must also end in a dotted
//! domain with an alphabetic top-level label of at least two letters.

use std::borrow::Cow;

use regex::Regex;
use validator::{ValidateEmail, ValidationError};

const DOMAIN_PATTERN: &str = r"@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

fn invalid_email() -> ValidationError {
    let mut err = ValidationError::new("email");
    err.message = Some(Cow::Borrowed("Invalid email address"));
    err
}

pub fn validate_email_domain(value: &str) -> Result<(), ValidationError> {
    // Malformed addresses are reported by the `email` rule.
    if !value.validate_email() {
        return Ok(());
    }

    let pattern = Regex::new(DOMAIN_PATTERN).map_err(|_| invalid_email())?;
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(invalid_email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_domains_pass() {
        for value in ["a@b.com", "jane.doe+intake@mail.example.co.uk", "x@sub-domain.org"] {
            assert!(validate_email_domain(value).is_ok(), "{value} rejected");
        }
    }

    #[test]
    fn single_label_and_ip_hosts_fail() {
        for value in ["a@b", "user@localhost", "a@[127.0.0.1]", "a@b.c", "a@b.c0m"] {
            let err = validate_email_domain(value).unwrap_err();
            assert_eq!(err.code, "email", "{value}");
        }
    }

    #[test]
    fn malformed_address_is_left_to_email_rule() {
        assert!(validate_email_domain("not-an-email").is_ok());
    }
}
