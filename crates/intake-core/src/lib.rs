//! Intake Core Library
//!
//! This crate provides the intake domain model, the declarative validation schema,
//! error types and configuration shared by the server, the client and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, IntakeServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{violations_from_errors, FieldViolation};
