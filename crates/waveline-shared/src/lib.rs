//! # waveline-shared
//!
//! Domain models shared by every waveline crate.
//!
//! All types here mirror the backend's JSON wire format (camelCase keys,
//! RFC 3339 timestamps); the backend mints every id as an opaque string.

pub mod types;

pub use types::*;
