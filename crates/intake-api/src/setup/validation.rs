//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use intake_core::Config;

/// Validate critical configuration values
///
/// Runs the config's own checks, then warns about settings that are legal but
/// unusual for a deployed service.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if !config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }

    if config.max_body_bytes() > 1024 * 1024 {
        tracing::warn!(
            max_body_bytes = config.max_body_bytes(),
            "MAX_BODY_BYTES is above 1 MiB - intake submissions are small text forms"
        );
    }

    Ok(())
}
