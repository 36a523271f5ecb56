#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared domain model and form validation for the roadmap service.

pub mod form;
pub mod model;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns current unix epoch milliseconds.
pub fn now_ms() -> i64 {
    let dur = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock set before UNIX_EPOCH");
    dur.as_millis() as i64
}

/// Generates a fresh ULID string, the id form stored roadmaps carry.
pub fn new_ulid() -> String {
    ulid::Ulid::new().to_string()
}
