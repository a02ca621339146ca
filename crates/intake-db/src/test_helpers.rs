//! In-memory store for testing
//!
//! Lets the HTTP layer be exercised without a database.

use async_trait::async_trait;
use intake_core::models::{IntakeSubmission, NewIntakeSubmission};
use intake_core::AppError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::store::IntakeStore;

/// Mock intake store that keeps inserted rows in memory
#[derive(Clone, Default)]
pub struct MockIntakeStore {
    rows: Arc<Mutex<Vec<IntakeSubmission>>>,
    insert_attempts: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MockIntakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails like a closed pool
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Rows stored so far, in insertion order
    pub fn rows(&self) -> Vec<IntakeSubmission> {
        self.rows.lock().unwrap().clone()
    }

    /// Number of insert calls, failed ones included
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::from(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl IntakeStore for MockIntakeStore {
    async fn insert_submission(
        &self,
        submission: NewIntakeSubmission,
    ) -> Result<IntakeSubmission, AppError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let row = IntakeSubmission::from(submission);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check()
    }
}
