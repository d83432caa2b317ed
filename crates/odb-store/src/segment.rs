//! NUL-delimited views of a raw object buffer.
//!
//! The header is always the bytes before the first NUL. Beyond that, a NUL is
//! only a delimiter inside tree records, and tree digests are binary and may
//! contain NUL themselves, so [`split_segments`] is a layout estimate, not a
//! parser. Tree payloads are decoded with a cursor in [`crate::decode`].

use crate::error::{StoreError, StoreResult};

/// Split a raw buffer at every NUL byte, scanning left to right once.
///
/// Empty segments between consecutive NULs are kept; the trailing segment after
/// the last NUL is kept only when non-empty. Segment 0 is the header.
pub fn split_segments(raw: &[u8]) -> Vec<&[u8]> {
    let mut segments: Vec<&[u8]> = raw.split(|&b| b == 0).collect();
    if segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

/// Split a raw buffer into `(header, payload)` at the first NUL.
pub fn split_header(raw: &[u8]) -> StoreResult<(&[u8], &[u8])> {
    let nul = raw
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| StoreError::MalformedHeader("header is not NUL-terminated".into()))?;
    Ok((&raw[..nul], &raw[nul + 1..]))
}
