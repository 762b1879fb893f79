//! Record identifiers and detail-path resolution.
//!
//! Every listing in the Freakinbeats inventory is addressed by a UUID, and the record detail page
//! lives at `/detail/<uuid>`. This crate owns the textual form of that identifier and the routine
//! that pulls it back out of a page path.
//!
//! This module provides:
//! - A wrapper type ([`RecordUuid`]) that *guarantees* the canonical textual shape once
//!   constructed, while keeping the exact text it was built from.
//! - A pure resolver ([`resolve`]) that finds the first standalone identifier in a path carrying
//!   the `detail` marker segment.
//! - A small adapter trait ([`PathSource`]) for anything that can report the current path.
//!
//! ## Canonical UUID shape
//! - Length: 36
//! - Five groups of `8-4-4-4-12` hex characters separated by hyphens
//! - Hex digits are case-insensitive: `0-9`, `a-f`, `A-F`
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! Notes:
//! - This is the same value you would get from `Uuid::new_v4().hyphenated().to_string()`, except
//!   that uppercase digits are also accepted.
//! - Case is never normalised. A `RecordUuid` parsed from `550E8400-...` displays as
//!   `550E8400-...`. Equality and hashing compare the underlying 128-bit value instead.
//!
//! ## Resolution
//! [`resolve`] is a total function: every input string yields either a [`RecordUuid`] or `None`.
//! Malformed, missing and wrong-route identifiers are all reported the same way.

mod resolver;
mod service;

// Re-export public types
pub use resolver::{resolve, resolve_from, strip_query_and_fragment, PathSource, DETAIL_MARKER};
pub use service::{RecordUuid, Uuid, GROUP_LENGTHS};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
