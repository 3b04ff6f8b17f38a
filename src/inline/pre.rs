//! Fenced code: ```` ```text``` ````.
//!
//! The fence may open mid-line and run across lines; the body ends at the
//! next ```` ``` ```` and is passed through untouched.

use memchr::memmem;

use crate::Range;

pub const FENCE: &str = "```";

/// A matched code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    /// Raw text between the fences.
    pub body: Range,
    /// Offset just past the closing fence.
    pub end: usize,
}

/// Match a fence whose opening ```` ``` ```` starts at `start`.
pub fn parse_fence(input: &str, start: usize) -> Option<Fence> {
    let body_start = start + FENCE.len();
    let bytes = input.as_bytes().get(body_start..)?;
    let close = body_start + memmem::find(bytes, FENCE.as_bytes())?;
    Some(Fence {
        body: Range::from_usize(body_start, close),
        end: close + FENCE.len(),
    })
}
