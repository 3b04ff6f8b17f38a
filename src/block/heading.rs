//! Headings: `# `, `## `, `### ` at the start of a line.

use crate::cursor::{Cursor, Token};
use crate::event::HeadingLevel;
use crate::Range;

/// A matched heading line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Heading text, trimmed.
    pub text: Range,
    /// Offset of the newline ending the heading, or the end of the text.
    pub end: usize,
}

/// Match a heading opened by `token`.
///
/// The level is the length of the leading `#` run; runs longer than three
/// are not headings. The space after the marker is optional.
pub fn parse_heading(cursor: &Cursor<'_>, token: &Token<'_>) -> Option<Heading> {
    let hashes = token.text.bytes().take_while(|&b| b == b'#').count();
    let level = HeadingLevel::from_marker_len(hashes)?;

    let content_start = token.start() + hashes;
    let line_end = cursor.line_end(token.start());
    let content = cursor.slice(content_start, line_end);

    let start = content_start + (content.len() - content.trim_start().len());
    let end = content_start + content.trim_end().len();

    Some(Heading {
        level,
        text: Range::from_usize(start.min(end), end),
        end: line_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(input: &str) -> Option<(HeadingLevel, &str, usize)> {
        let cursor = Cursor::new(input);
        let token = cursor.next_token()?;
        parse_heading(&cursor, &token).map(|h| (h.level, h.text.slice(input), h.end))
    }

    #[test]
    fn test_levels() {
        assert_eq!(heading("# One"), Some((HeadingLevel::H1, "One", 5)));
        assert_eq!(heading("## Two"), Some((HeadingLevel::H2, "Two", 6)));
        assert_eq!(heading("### Sub"), Some((HeadingLevel::H3, "Sub", 7)));
    }

    #[test]
    fn test_stops_at_newline() {
        assert_eq!(
            heading("## Title here\nbody"),
            Some((HeadingLevel::H2, "Title here", 13))
        );
    }

    #[test]
    fn test_crlf_and_trailing_space() {
        assert_eq!(heading("# Title  \r\nbody").map(|h| h.1), Some("Title"));
    }

    #[test]
    fn test_no_space_after_marker() {
        assert_eq!(heading("#Title"), Some((HeadingLevel::H1, "Title", 6)));
    }

    #[test]
    fn test_empty_heading() {
        assert_eq!(heading("##\nnext"), Some((HeadingLevel::H2, "", 2)));
    }

    #[test]
    fn test_too_many_hashes() {
        assert_eq!(heading("#### Four"), None);
    }
}
