//! Detail-path identifier resolution.
//!
//! The record detail page is served at `/detail/<uuid>`, possibly nested under other segments
//! (`/shop/vinyl/detail/<uuid>`). [`resolve`] checks that the path carries a `detail` marker
//! segment and then returns the first standalone canonical UUID in it, verbatim.
//!
//! Obtaining the path is kept apart from resolving it: anything that knows the current location
//! implements [`PathSource`], and [`resolve_from`] captures the path before handing it to the
//! pure resolver.

use crate::service::{has_canonical_prefix, CANONICAL_LEN};
use crate::RecordUuid;
use std::borrow::Cow;

/// Path segment that marks the record detail route.
pub const DETAIL_MARKER: &str = "detail";

/// Anything that can report the path of the page currently being viewed.
pub trait PathSource {
    /// Returns the path portion of the current location.
    ///
    /// A query string or fragment may be left attached; the resolver ignores both.
    fn current_path(&self) -> Cow<'_, str>;
}

impl PathSource for str {
    fn current_path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl PathSource for String {
    fn current_path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: PathSource + ?Sized> PathSource for &T {
    fn current_path(&self) -> Cow<'_, str> {
        (**self).current_path()
    }
}

/// Captures the current path from `source` and resolves it.
pub fn resolve_from<S: PathSource + ?Sized>(source: &S) -> Option<RecordUuid> {
    resolve(&source.current_path())
}

/// Returns `input` cut at the first `?` or `#`.
pub fn strip_query_and_fragment(input: &str) -> &str {
    match input.find(|c| c == '?' || c == '#') {
        Some(end) => &input[..end],
        None => input,
    }
}

/// Extracts the record identifier from a detail page path.
///
/// The path must contain a segment that is exactly `detail`; `details`, `Detail` or
/// `my-detail` do not count. When it does, the path is scanned left to right for the first
/// canonical `8-4-4-4-12` UUID whose neighbours on both sides are the edge of the path or a
/// character that is neither a hex digit nor a hyphen. The token does not have to follow the
/// marker, so `/related/<a>/detail/<b>` yields `<a>`.
///
/// The returned identifier keeps the case it had in `path`.
///
/// # Returns
///
/// `Some` with the first identifier found, or `None` when the path has no `detail` segment or no
/// bounded identifier. This never fails: every malformed input is simply `None`.
pub fn resolve(path: &str) -> Option<RecordUuid> {
    let path = strip_query_and_fragment(path);
    if !path.split('/').any(|segment| segment == DETAIL_MARKER) {
        return None;
    }

    let bytes = path.as_bytes();
    (0..bytes.len())
        .filter(|&pos| pos == 0 || !extends_token(bytes[pos - 1]))
        .find_map(|pos| token_at(path, pos))
}

/// Hex digits and hyphens would extend or misalign a neighbouring group.
fn extends_token(byte: u8) -> bool {
    byte.is_ascii_hexdigit() || byte == b'-'
}

/// Reads a canonical token starting exactly at byte `pos` of `path`.
fn token_at(path: &str, pos: usize) -> Option<RecordUuid> {
    let bytes = &path.as_bytes()[pos..];
    if !has_canonical_prefix(bytes) {
        return None;
    }
    if bytes.get(CANONICAL_LEN).copied().is_some_and(extends_token) {
        return None;
    }
    RecordUuid::parse(path.get(pos..pos + CANONICAL_LEN)?).ok()
}
