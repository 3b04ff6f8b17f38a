//! Front matter fields.
//!
//! Inside the `---` block each line is a `key: value` pair:
//!
//! ```text
//! ---
//! title: "A quoted title"
//! date: 2020-01-01
//! tags: [rust, parsing]
//! ---
//! ```
//!
//! A quoted value runs to its closing quote on the same line. A value opening
//! with `[` runs to the matching bracket, possibly across lines. Any other
//! value, including one whose quote is never closed, runs to the end of its
//! line.

use crate::cursor::{Cursor, Token};
use crate::inline::brackets::BracketIndex;

/// The token that opens and closes front matter.
pub const DELIMITER: &str = "---";

/// A parsed `key: value` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: &'a str,
    /// Offset just past the value.
    pub end: usize,
}

/// Parse the field whose key starts at `token`, the first token on its line.
///
/// Returns `None` if no colon follows the key on the same line.
pub fn parse_field<'a>(
    cursor: &Cursor<'a>,
    brackets: &BracketIndex<'_>,
    token: &Token<'a>,
) -> Option<Field<'a>> {
    let (key, after_colon) = match token.text.find(':') {
        Some(i) => (&token.text[..i], token.start() + i + 1),
        None => {
            let colon = cursor.next_token_from(token.end())?;
            let same_line = cursor.line_end(token.end()) > colon.start();
            if colon.text != ":" || !same_line {
                return None;
            }
            (token.text, colon.end())
        }
    };
    if key.is_empty() {
        return None;
    }

    let line_end = cursor.line_end(after_colon);
    let value_token = match cursor.next_token_from(after_colon) {
        Some(t) if t.start() < line_end => t,
        _ => {
            return Some(Field {
                key,
                value: "",
                end: line_end,
            });
        }
    };

    let (value, end) = delimited_value(cursor, brackets, &value_token, line_end).unwrap_or_else(|| {
        let value = cursor.slice(value_token.start(), line_end).trim_end();
        (value, line_end)
    });

    Some(Field { key, value, end })
}

/// Value enclosed in quotes or brackets, and the offset past the closer.
fn delimited_value<'a>(
    cursor: &Cursor<'a>,
    brackets: &BracketIndex<'_>,
    token: &Token<'a>,
    line_end: usize,
) -> Option<(&'a str, usize)> {
    let start = token.start();
    let close = match token.text.as_bytes()[0] {
        q @ (b'"' | b'\'') => cursor.find_byte(q, start + 1).filter(|&c| c < line_end)?,
        b'[' => brackets.find_matching_from(b'[', b']', start)?,
        _ => return None,
    };
    Some((cursor.slice(start + 1, close), close + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(line: &str) -> Option<(&str, &str, usize)> {
        let cursor = Cursor::new(line);
        let token = cursor.next_token()?;
        let brackets = BracketIndex::new(cursor.bytes());
        parse_field(&cursor, &brackets, &token).map(|f| (f.key, f.value, f.end))
    }

    #[test]
    fn test_plain_value() {
        assert_eq!(field("date: 2020-01-01\n"), Some(("date", "2020-01-01", 16)));
    }

    #[test]
    fn test_plain_value_runs_to_end_of_line() {
        assert_eq!(
            field("title: Hello there world\nnext: x").map(|f| f.1),
            Some("Hello there world")
        );
    }

    #[test]
    fn test_plain_value_at_end_of_text() {
        assert_eq!(field("date: today"), Some(("date", "today", 11)));
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(field("title: \"A\"\n"), Some(("title", "A", 10)));
    }

    #[test]
    fn test_single_quoted_with_colon() {
        assert_eq!(
            field("title: 'Rust: a tour'\n").map(|f| f.1),
            Some("Rust: a tour")
        );
    }

    #[test]
    fn test_bracketed_list() {
        assert_eq!(
            field("tags: [rust, [nested], parsing]\n").map(|f| f.1),
            Some("rust, [nested], parsing")
        );
    }

    #[test]
    fn test_unterminated_quote_runs_to_end_of_line() {
        assert_eq!(field("title: \"open\n").map(|f| f.1), Some("\"open"));
    }

    #[test]
    fn test_quote_does_not_cross_lines() {
        assert_eq!(
            field("title: \"open\nnext: \"x\"\n").map(|f| (f.1, f.2)),
            Some(("\"open", 12))
        );
    }

    #[test]
    fn test_separate_colon_token() {
        assert_eq!(field("title : Spaced\n").map(|f| (f.0, f.1)), Some(("title", "Spaced")));
    }

    #[test]
    fn test_no_space_after_colon() {
        assert_eq!(field("title:Tight\n").map(|f| f.1), Some("Tight"));
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(field("draft:\ntitle: x"), Some(("draft", "", 6)));
    }

    #[test]
    fn test_crlf_value() {
        assert_eq!(field("date: 2021-03-04\r\n").map(|f| f.1), Some("2021-03-04"));
    }

    #[test]
    fn test_not_a_field() {
        assert_eq!(field("just words\n"), None);
        assert_eq!(field("key\n: value"), None);
        assert_eq!(field(": value"), None);
    }
}
