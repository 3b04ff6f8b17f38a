//! Balanced delimiter matching.
//!
//! Link, image and embed recognition needs the `]` that closes the first `[`
//! (and likewise for parentheses) even when the text between them contains
//! nested pairs, as in `[![alt](img.png)](page.html)`.
//!
//! Every `[]` and `()` pair in the document is matched in one stack pass,
//! run on the first query that reaches an opener. A query then only scans to
//! its first delimiter, so openers that are never closed do not cost a
//! rescan of the rest of the text.

use std::cell::OnceCell;
use std::ops::Range;

use memchr::{memchr2, memchr2_iter};
use rustc_hash::FxHashMap;

/// Matched `[]` and `()` pairs of one document.
///
/// # Example
/// ```
/// use pagemark::inline::brackets::BracketIndex;
///
/// let text = b"[a [b] c] d] (e";
/// let index = BracketIndex::new(text);
/// assert_eq!(index.find_matching(b'[', b']', 0..text.len()), Some(8));
/// assert_eq!(index.find_matching(b'[', b']', 1..text.len()), Some(5));
/// assert_eq!(index.find_matching(b'(', b')', 0..text.len()), None);
/// ```
#[derive(Debug)]
pub struct BracketIndex<'a> {
    text: &'a [u8],
    /// Opener offset to closer offset. Unclosed openers have no entry.
    closers: OnceCell<FxHashMap<u32, u32>>,
}

impl<'a> BracketIndex<'a> {
    /// Index over `text`. Offsets are stored as `u32`, so `text` must be
    /// shorter than 4GB by the time a query reaches an opener.
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            closers: OnceCell::new(),
        }
    }

    fn closers(&self) -> &FxHashMap<u32, u32> {
        self.closers.get_or_init(|| {
            debug_assert!(self.text.len() <= u32::MAX as usize);
            let mut closers = FxHashMap::default();
            pair_up(self.text, b'[', b']', &mut closers);
            pair_up(self.text, b'(', b')', &mut closers);
            closers
        })
    }

    /// Find the offset of the `close` byte that balances the first `open`
    /// byte in `text[window]`.
    ///
    /// A `close` seen while nothing is open is returned as is: stray closers
    /// end the search instead of failing it. Returns `None` if the window
    /// ends before the first opener is balanced.
    pub fn find_matching(&self, open: u8, close: u8, window: Range<usize>) -> Option<usize> {
        debug_assert!(matches!((open, close), (b'[', b']') | (b'(', b')')));
        let end = window.end.min(self.text.len());
        let start = window.start;
        if start >= end {
            return None;
        }
        let at = start + memchr2(open, close, &self.text[start..end])?;
        if self.text[at] == close {
            return Some(at);
        }
        let closer = *self.closers().get(&(at as u32))? as usize;
        (closer < end).then_some(closer)
    }

    /// [`find_matching`](Self::find_matching) from `begin` to the end of the
    /// text.
    #[inline]
    pub fn find_matching_from(&self, open: u8, close: u8, begin: usize) -> Option<usize> {
        self.find_matching(open, close, begin..self.text.len())
    }
}

fn pair_up(text: &[u8], open: u8, close: u8, closers: &mut FxHashMap<u32, u32>) {
    let mut stack: Vec<u32> = Vec::new();
    for at in memchr2_iter(open, close, text) {
        if text[at] == open {
            stack.push(at as u32);
        } else if let Some(opener) = stack.pop() {
            closers.insert(opener, at as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matching(text: &str) -> Option<usize> {
        BracketIndex::new(text.as_bytes()).find_matching_from(b'[', b']', 0)
    }

    #[test]
    fn test_simple_pair() {
        assert_eq!(matching("[abc]"), Some(4));
    }

    #[test]
    fn test_nested_pair() {
        let text = "[![alt](img.png)](page.html)";
        let index = BracketIndex::new(text.as_bytes());
        assert_eq!(index.find_matching_from(b'[', b']', 0), Some(16));
        assert_eq!(index.find_matching_from(b'[', b']', 2), Some(6));
        assert_eq!(index.find_matching_from(b'(', b')', 7), Some(15));
        assert_eq!(index.find_matching_from(b'(', b')', 17), Some(27));
    }

    #[test]
    fn test_stray_closer_returns_position() {
        assert_eq!(matching("abc] [x]"), Some(3));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(matching("[abc [def]"), None);
        assert_eq!(matching("no brackets"), None);
        assert_eq!(matching(""), None);
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let text = b"[abc]";
        let index = BracketIndex::new(text);
        assert_eq!(index.find_matching(b'[', b']', 0..4), None);
        assert_eq!(index.find_matching(b'[', b']', 0..5), Some(4));
        assert_eq!(index.find_matching(b'[', b']', 3..3), None);
    }

    #[test]
    fn test_window_start() {
        let text = b"(a) (b (c))";
        let index = BracketIndex::new(text);
        assert_eq!(index.find_matching_from(b'(', b')', 4), Some(10));
        assert_eq!(index.find_matching_from(b'(', b')', 3), Some(10));
    }

    #[test]
    fn test_kinds_do_not_mix() {
        let index = BracketIndex::new(b"[a(b]c)");
        assert_eq!(index.find_matching_from(b'[', b']', 0), Some(4));
        assert_eq!(index.find_matching_from(b'(', b')', 0), Some(6));
    }

    #[test]
    fn test_parentheses_in_url() {
        let text = b"(https://en.wikipedia.org/wiki/Rust_(language)) tail";
        let index = BracketIndex::new(text);
        assert_eq!(index.find_matching_from(b'(', b')', 0), Some(46));
    }

    #[test]
    fn test_pairs_matched_on_first_opener() {
        let index = BracketIndex::new(b"a] [b]");
        assert_eq!(index.find_matching_from(b'[', b']', 0), Some(1));
        assert!(index.closers.get().is_none());
        assert_eq!(index.find_matching_from(b'[', b']', 2), Some(5));
        assert!(index.closers.get().is_some());
    }

    #[test]
    fn test_many_unclosed_openers() {
        let text = "[a ".repeat(10_000) + "[b]";
        let index = BracketIndex::new(text.as_bytes());
        assert_eq!(index.find_matching_from(b'[', b']', 0), None);
        assert_eq!(index.find_matching_from(b'[', b']', 29_997), None);
        assert_eq!(index.find_matching_from(b'[', b']', 30_000), Some(30_002));
    }
}
