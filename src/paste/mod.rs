//! Paste domain helpers.
//!
//! # Responsibilities
//! - Generate short paste identifiers
//! - Parse user supplied lifetimes ("15m", "2h", "1d")
//! - Hash and verify paste passwords
//! - Sign and verify per-paste access tokens
//!
//! # Design Decisions
//! - Pure functions and small value types; no I/O
//! - All secret comparisons are constant time

pub mod auth;
pub mod id;
pub mod ttl;

pub use auth::{AuthSigner, PasswordHash};
pub use id::PasteId;
pub use ttl::{parse_ttl, TtlError};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
