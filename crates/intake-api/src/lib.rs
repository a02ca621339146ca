//! Intake API Library
//!
//! This crate provides the HTTP handlers, error mapping, and application setup for
//! the legal intake service.

// Module declarations
mod api_doc;
pub mod handlers;
pub mod setup;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use api_doc::get_openapi_spec;
pub use error::{ErrorResponse, HttpAppError, ValidatedJson};
pub use state::AppState;
