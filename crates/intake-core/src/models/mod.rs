//! Data models for the application
//!
//! The intake submission is the only entity. Requests, the typed form used by
//! clients, the insert payload and the stored row all live in [intake].

mod intake;

pub use intake::*;
