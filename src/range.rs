//! Compact byte spans into the document text.
//!
//! Tokens and construct bodies are stored as `u32` offset pairs instead of
//! owned strings; documents are limited to 4GB.

/// Half-open byte span `[start, end)` into a document.
///
/// Every span produced by the scanner starts and ends on a character
/// boundary, so slicing a `&str` with it never splits a character.
///
/// # Example
/// ```
/// use pagemark::Range;
///
/// let text = "# Hello";
/// let span = Range::new(2, 7);
/// assert_eq!(span.slice(text), "Hello");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span from usize offsets.
    ///
    /// The parser rejects documents longer than `u32::MAX` bytes before any
    /// span is built.
    ///
    /// # Panics
    /// Panics in debug mode if either offset exceeds `u32::MAX`.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// The text this span covers.
    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start_usize()..self.end_usize()]
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub const fn end_usize(&self) -> usize {
        self.end as usize
    }
}

impl From<std::ops::Range<usize>> for Range {
    #[inline]
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::from_usize(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    #[inline]
    fn from(r: Range) -> Self {
        r.start_usize()..r.end_usize()
    }
}
