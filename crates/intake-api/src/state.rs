//! Application state shared by every handler.

use intake_db::IntakeStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Store collaborator; `IntakeSubmissionRepository` in production
    pub store: Arc<dyn IntakeStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn IntakeStore>) -> Self {
        Self { store }
    }
}
