//! Database repositories for the data access layer
//!
//! One table, `intake_submissions`, written once per accepted submission.

pub mod intake;

pub use intake::IntakeSubmissionRepository;
