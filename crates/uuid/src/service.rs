//! Internal implementation of the record identifier type.
//!
//! This module contains the canonical-shape grammar and the [`RecordUuid`] wrapper used for
//! listing identifiers throughout Freakinbeats.

use crate::{UuidError, UuidResult};
use std::hash::{Hash, Hasher};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Hex-digit counts of the five hyphen-separated groups in the canonical shape.
pub const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// Total length of the canonical shape, hyphens included.
pub(crate) const CANONICAL_LEN: usize = 36;

/// A listing identifier in canonical hyphenated form (`8-4-4-4-12` hex groups).
///
/// This wrapper type guarantees that once constructed, the contained text has the canonical
/// shape and denotes a valid UUID. Unlike most UUID handling it does **not** normalise case: the
/// text the identifier was built from is kept verbatim and is what [`fmt::Display`] prints.
///
/// # When to use this type
/// Use this wrapper whenever you are:
/// - Accepting a listing identifier from *outside* the core (page path, API route, CLI input).
/// - Looking a listing up in the inventory.
/// - Allocating an identifier for a new listing.
///
/// # Construction
/// - [`RecordUuid::new`] generates a fresh lowercase identifier.
/// - [`RecordUuid::parse`] validates an externally supplied identifier.
/// - [`crate::resolve`] extracts one from a detail page path.
///
/// # Equality
/// Two `RecordUuid`s are equal when they denote the same 128-bit UUID, so
/// `550e8400-E29B-...` and `550e8400-e29b-...` compare equal and hash identically even though
/// they display differently.
#[derive(Clone, Debug)]
pub struct RecordUuid {
    uuid: Uuid,
    text: String,
}

impl Default for RecordUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordUuid {
    /// Generates a new random (version 4) identifier in lowercase canonical form.
    pub fn new() -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            text: uuid.hyphenated().to_string(),
        }
    }

    /// Validates and wraps a string that must already be in canonical hyphenated form.
    ///
    /// Other UUID spellings accepted by the `uuid` crate (simple, braced, URN) are rejected, and
    /// surrounding whitespace is not trimmed.
    ///
    /// # Arguments
    ///
    /// * `input` - Candidate identifier. Must be exactly 36 characters of canonical shape.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 8-4-4-4-12 hex characters separated by hyphens, got: '{}'",
                input
            )));
        }
        let uuid = Uuid::parse_str(input)
            .map_err(|e| UuidError::InvalidInput(format!("'{}': {}", input, e)))?;
        Ok(Self {
            uuid,
            text: input.to_owned(),
        })
    }

    /// Returns true if the whole of `input` has the canonical shape.
    ///
    /// This is a purely syntactic check, fast enough to run before [`RecordUuid::parse`].
    pub fn is_canonical(input: &str) -> bool {
        input.len() == CANONICAL_LEN && has_canonical_prefix(input.as_bytes())
    }

    /// Returns the UUID as a `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the identifier text exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Returns true if `bytes` starts with the canonical shape.
///
/// Only the first [`CANONICAL_LEN`] bytes are inspected; whatever follows is the caller's
/// concern.
pub(crate) fn has_canonical_prefix(bytes: &[u8]) -> bool {
    let mut pos = 0;
    for (index, &len) in GROUP_LENGTHS.iter().enumerate() {
        if index > 0 {
            if bytes.get(pos) != Some(&b'-') {
                return false;
            }
            pos += 1;
        }
        let Some(group) = bytes.get(pos..pos + len) else {
            return false;
        };
        if !group.iter().all(u8::is_ascii_hexdigit) {
            return false;
        }
        pos += len;
    }
    true
}

impl PartialEq for RecordUuid {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for RecordUuid {}

impl Hash for RecordUuid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl fmt::Display for RecordUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RecordUuid {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for RecordUuid {
    type Err = UuidError;

    /// Equivalent to calling [`RecordUuid::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordUuid::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
