//! Test helpers: build AppState and router for integration tests.
//!
//! The store is `MockIntakeStore`, so these tests need no database.
//! Run from workspace root: `cargo test -p intake-api`.

#![allow(dead_code)]

use axum_test::TestServer;
use intake_api::setup::routes;
use intake_api::state::AppState;
use intake_core::{BaseConfig, Config, IntakeServiceConfig};
use intake_db::test_helpers::MockIntakeStore;
use serde_json::{json, Value};
use std::sync::Arc;

/// Body limit used by the test router
pub const TEST_MAX_BODY_BYTES: usize = 4 * 1024;

/// Test application: server plus a handle on the in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub store: MockIntakeStore,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config() -> Config {
    Config(Box::new(IntakeServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 5,
            environment: "test".to_string(),
            max_body_bytes: TEST_MAX_BODY_BYTES,
            http_concurrency_limit: 64,
            log_format: "text".to_string(),
        },
        database_url: "postgres://localhost/intake_test".to_string(),
    }))
}

/// Setup a test app around the given store.
pub fn setup_test_app_with_store(store: MockIntakeStore) -> TestApp {
    let config = create_test_config();
    let state = Arc::new(AppState::new(Arc::new(store.clone())));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");
    TestApp { server, store }
}

/// Setup a test app whose store accepts every write.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_store(MockIntakeStore::new())
}

/// A payload that passes every rule.
pub fn valid_payload() -> Value {
    json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane.doe@example.com",
        "phone": "(555) 010-0199",
        "case_type": "personal_injury",
        "case_description": "Rear-ended at a stop light, neck pain since.",
        "incident_date": "2025-01-03",
        "location": "Springfield",
        "urgency": "high"
    })
}

/// `valid_payload` with one field replaced.
pub fn payload_with(field: &str, value: Value) -> Value {
    let mut payload = valid_payload();
    payload[field] = value;
    payload
}

/// `valid_payload` with one field removed.
pub fn payload_without(field: &str) -> Value {
    let mut payload = valid_payload();
    if let Some(map) = payload.as_object_mut() {
        map.remove(field);
    }
    payload
}

/// Field names of the violations in a 400 body.
pub fn violated_fields(body: &Value) -> Vec<String> {
    body["violations"]
        .as_array()
        .map(|v| {
            v.iter()
                .filter_map(|v| v["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
