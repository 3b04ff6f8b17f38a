//! Token scanner over the document text.
//!
//! The cursor holds a single byte offset that only ever moves forward.
//! Tokens (maximal runs of non-whitespace bytes) are produced lazily from
//! that offset; nothing is pre-split into a token list.

use memchr::{memchr, memmem};

use crate::Range;

/// ASCII whitespace bytes that separate tokens.
#[inline]
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Whether the character at byte `at` is whitespace, and its width.
///
/// ASCII bytes are classified directly; anything else is decoded and checked
/// with [`char::is_whitespace`], so no-break and ideographic spaces also
/// separate tokens.
#[inline]
fn space_at(text: &str, at: usize) -> (bool, usize) {
    let b = text.as_bytes()[at];
    if b.is_ascii() {
        return (is_space(b), 1);
    }
    match text[at..].chars().next() {
        Some(c) => (c.is_whitespace(), c.len_utf8()),
        None => (false, 1),
    }
}

/// A maximal run of non-whitespace text and its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text.
    pub text: &'a str,
    /// Byte span of the token in the document.
    pub range: Range,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start_usize()
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.range.end_usize()
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }
}

/// A forward-only cursor producing whitespace-separated tokens.
///
/// # Example
/// ```
/// use pagemark::cursor::Cursor;
///
/// let mut cursor = Cursor::new("# Title\nbody");
/// let token = cursor.next_token().unwrap();
/// assert_eq!(token.text, "#");
/// assert!(cursor.is_first_on_line(&token));
///
/// cursor.advance_to(token.end());
/// assert_eq!(cursor.next_token().unwrap().text, "Title");
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The whole document text.
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Move the cursor to `pos`.
    ///
    /// The scanner never advances on its own; handlers call this once they
    /// know how much text they consumed.
    #[inline]
    pub fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "cursor moved backwards: {} -> {}", self.pos, pos);
        debug_assert!(pos <= self.input.len());
        self.pos = pos;
    }

    /// Next token at or after the cursor.
    #[inline]
    pub fn next_token(&self) -> Option<Token<'a>> {
        self.next_token_from(self.pos)
    }

    /// Next token at or after `from`.
    pub fn next_token_from(&self, from: usize) -> Option<Token<'a>> {
        let len = self.input.len();
        let mut start = from.min(len);
        while !self.input.is_char_boundary(start) {
            start += 1;
        }
        while start < len {
            match space_at(self.input, start) {
                (true, width) => start += width,
                (false, _) => break,
            }
        }
        if start == len {
            return None;
        }
        let mut end = start;
        while end < len {
            match space_at(self.input, end) {
                (false, width) => end += width,
                (true, _) => break,
            }
        }
        Some(self.token(start, end))
    }

    /// The token ending closest before the cursor.
    ///
    /// If the cursor sits inside a token, only the part before the cursor is
    /// returned.
    pub fn previous_token(&self) -> Option<Token<'a>> {
        let mut pos = self.pos.min(self.input.len());
        while !self.input.is_char_boundary(pos) {
            pos -= 1;
        }
        let before = self.input[..pos].trim_end_matches(char::is_whitespace);
        if before.is_empty() {
            return None;
        }
        let start = before
            .trim_end_matches(|c: char| !c.is_whitespace())
            .len();
        Some(self.token(start, before.len()))
    }

    /// Whether `token` is the first token on its line.
    ///
    /// True at offset 0, when nothing but whitespace precedes the cursor, or
    /// when a newline separates the previous token from `token`.
    pub fn is_first_on_line(&self, token: &Token<'_>) -> bool {
        if self.pos == 0 {
            return true;
        }
        match self.previous_token() {
            None => true,
            Some(prev) => {
                let from = prev.end().min(token.start());
                memchr(b'\n', &self.bytes()[from..token.start()]).is_some()
            }
        }
    }

    /// Absolute offset of the next `needle` byte at or after `from`.
    #[inline]
    pub fn find_byte(&self, needle: u8, from: usize) -> Option<usize> {
        let from = from.min(self.input.len());
        memchr(needle, &self.bytes()[from..]).map(|i| from + i)
    }

    /// Absolute offset of the next occurrence of `needle` at or after `from`.
    #[inline]
    pub fn find_str(&self, needle: &str, from: usize) -> Option<usize> {
        let from = from.min(self.input.len());
        memmem::find(&self.bytes()[from..], needle.as_bytes()).map(|i| from + i)
    }

    /// Offset of the newline ending the line containing `from`, or the end of
    /// the text if it is the last line.
    #[inline]
    pub fn line_end(&self, from: usize) -> usize {
        self.find_byte(b'\n', from).unwrap_or(self.input.len())
    }

    /// Text between two offsets.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    #[inline]
    fn token(&self, start: usize, end: usize) -> Token<'a> {
        Token {
            text: &self.input[start..end],
            range: Range::from_usize(start, end),
        }
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset())
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_new() {
        let cursor = Cursor::new("Hello");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn test_cursor_empty() {
        let cursor = Cursor::new("");
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.next_token(), None);
        assert_eq!(cursor.previous_token(), None);
    }

    #[test]
    fn test_next_token_skips_whitespace() {
        let cursor = Cursor::new("  \n\tfoo bar");
        let token = cursor.next_token().unwrap();
        assert_eq!(token.text, "foo");
        assert_eq!((token.start(), token.end()), (4, 7));
    }

    #[test]
    fn test_next_token_from() {
        let cursor = Cursor::new("one two three");
        assert_eq!(cursor.next_token_from(3).unwrap().text, "two");
        assert_eq!(cursor.next_token_from(5).unwrap().text, "wo");
        assert_eq!(cursor.next_token_from(13), None);
        assert_eq!(cursor.next_token_from(99), None);
    }

    #[test]
    fn test_only_whitespace() {
        let cursor = Cursor::new(" \n \r\n ");
        assert_eq!(cursor.next_token(), None);
    }

    #[test]
    fn test_previous_token() {
        let mut cursor = Cursor::new("alpha  beta\ngamma");
        cursor.advance_to(12);
        assert_eq!(cursor.previous_token().unwrap().text, "beta");

        cursor.advance_to(14);
        assert_eq!(cursor.previous_token().unwrap().text, "ga");
    }

    #[test]
    fn test_previous_token_none_after_leading_whitespace() {
        let mut cursor = Cursor::new("\n\n# Title");
        cursor.advance_to(2);
        assert_eq!(cursor.previous_token(), None);
        let token = cursor.next_token().unwrap();
        assert!(cursor.is_first_on_line(&token));
    }

    #[test]
    fn test_first_on_line() {
        let text = "- a\n- b c";
        let mut cursor = Cursor::new(text);

        let first = cursor.next_token().unwrap();
        assert!(cursor.is_first_on_line(&first));

        cursor.advance_to(2);
        let a = cursor.next_token().unwrap();
        assert_eq!(a.text, "a");
        assert!(!cursor.is_first_on_line(&a));

        cursor.advance_to(4);
        let dash = cursor.next_token().unwrap();
        assert!(cursor.is_first_on_line(&dash));

        cursor.advance_to(8);
        let c = cursor.next_token().unwrap();
        assert_eq!(c.text, "c");
        assert!(!cursor.is_first_on_line(&c));
    }

    #[test]
    fn test_find_helpers() {
        let cursor = Cursor::new("a **b** c\nnext");
        assert_eq!(cursor.find_byte(b'*', 0), Some(2));
        assert_eq!(cursor.find_str("**", 4), Some(5));
        assert_eq!(cursor.find_str("```", 0), None);
        assert_eq!(cursor.line_end(0), 9);
        assert_eq!(cursor.line_end(10), 14);
    }

    #[test]
    fn test_unicode_tokens() {
        let cursor = Cursor::new("héllo wörld");
        let token = cursor.next_token().unwrap();
        assert_eq!(token.text, "héllo");
        assert_eq!(cursor.next_token_from(token.end()).unwrap().text, "wörld");
    }

    #[test]
    fn test_unicode_whitespace_separates_tokens() {
        // no-break space and ideographic space
        let text = "a\u{a0}b\u{3000}c";
        let mut cursor = Cursor::new(text);
        let a = cursor.next_token().unwrap();
        assert_eq!(a.text, "a");
        let b = cursor.next_token_from(a.end()).unwrap();
        assert_eq!((b.text, b.start()), ("b", 3));
        let c = cursor.next_token_from(b.end()).unwrap();
        assert_eq!((c.text, c.start()), ("c", 7));

        cursor.advance_to(c.start());
        assert_eq!(cursor.previous_token().unwrap().text, "b");
        assert!(!cursor.is_first_on_line(&c));
    }
}
