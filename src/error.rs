//! Error types for parsing and rendering.

use thiserror::Error;

/// Bytes of document text captured on each side of an error offset.
pub const CONTEXT_RADIUS: usize = 24;

/// Errors surfaced by a parse or by an event sink.
#[derive(Debug, Error)]
pub enum Error {
    /// A handler left the cursor where it found it. Continuing would loop
    /// forever, so the parse is aborted.
    #[error("token at offset {offset} was not consumed (near {context:?})")]
    NoForwardProgress { offset: usize, context: String },

    /// A link, image or embed has no closing delimiter. Only raised when
    /// [`Options::strict_links`](crate::Options::strict_links) is set.
    #[error("unbalanced `{delimiter}` at offset {offset} (near {context:?})")]
    UnbalancedDelimiter {
        delimiter: char,
        offset: usize,
        context: String,
    },

    /// The document does not fit the `u32` offsets used for spans.
    #[error("document of {len} bytes exceeds the 4GB limit")]
    DocumentTooLarge { len: usize },

    /// A renderer needed a front matter field the document never set.
    #[error("front matter field `{field}` is not set")]
    MissingHeaderField { field: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn no_forward_progress(text: &str, offset: usize) -> Self {
        Error::NoForwardProgress {
            offset,
            context: context_around(text, offset),
        }
    }

    pub(crate) fn unbalanced(text: &str, delimiter: char, offset: usize) -> Self {
        Error::UnbalancedDelimiter {
            delimiter,
            offset,
            context: context_around(text, offset),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Error::MissingHeaderField {
            field: field.to_string(),
        }
    }
}

/// Up to [`CONTEXT_RADIUS`] bytes either side of `offset`, widened to
/// character boundaries.
pub fn context_around(text: &str, offset: usize) -> String {
    let offset = offset.min(text.len());
    let mut start = offset.saturating_sub(CONTEXT_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (offset + CONTEXT_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    text[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_short_text() {
        assert_eq!(context_around("[oops", 0), "[oops");
    }

    #[test]
    fn test_context_clamps_to_window() {
        let text = "a".repeat(100);
        let ctx = context_around(&text, 50);
        assert_eq!(ctx.len(), CONTEXT_RADIUS * 2);
    }

    #[test]
    fn test_context_respects_char_boundaries() {
        let text = format!("{}é{}", "x".repeat(CONTEXT_RADIUS - 1), "y".repeat(40));
        // The raw window start lands on the second byte of `é`.
        let ctx = context_around(&text, 2 * CONTEXT_RADIUS);
        assert!(ctx.starts_with('é'));
    }

    #[test]
    fn test_display() {
        let err = Error::missing_field("title");
        assert_eq!(err.to_string(), "front matter field `title` is not set");

        let err = Error::unbalanced("see [here", '[', 4);
        assert!(err.to_string().contains("unbalanced `[` at offset 4"));
    }
}
