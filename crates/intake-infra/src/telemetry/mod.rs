//! Tracing initialization
//!
//! Plain `fmt` output by default, one JSON object per line with `LOG_FORMAT=json`.

mod init_basic;

pub use init_basic::{init_telemetry, LogFormat};
