//! Intake Database Layer
//!
//! This crate provides the store collaborator used by the intake endpoint:
//! the `IntakeStore` trait and its PostgreSQL repository.
//!
// Module declarations
pub mod db;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-exports
pub use db::IntakeSubmissionRepository;
pub use store::IntakeStore;
