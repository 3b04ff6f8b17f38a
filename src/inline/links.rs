//! Link, image and embed recognition.
//!
//! Handles:
//! - Links: `[name](url)`
//! - Images: `![alt](src)`
//! - Embeds: `$[name](url)`
//! - YouTube embeds: `$YT[name](video-id)`
//!
//! The `(` must directly follow the `]` that balances the opening `[`.
//! Balancing is looked up in a [`BracketIndex`] built once per document.

use memchr::memmem;

use super::brackets::BracketIndex;
use crate::event::LinkSpan;
use crate::Range;

/// Which link-like construct a token opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Link,
    Image,
    Embed,
    EmbedYouTube,
}

impl LinkKind {
    /// Opening marker, ending in `[`.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Link => "[",
            Self::Image => "![",
            Self::Embed => "$[",
            Self::EmbedYouTube => "$YT[",
        }
    }
}

/// A resolved link-like construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    /// The whole construct, from the marker to the closing `)`.
    pub range: Range,
    /// Between the brackets.
    pub name: Range,
    /// Between the parentheses.
    pub url: Range,
}

impl Link {
    /// Offset just past the closing `)`.
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end_usize()
    }

    /// Trimmed attribute view of this construct.
    pub fn span<'a>(&self, input: &'a str) -> LinkSpan<'a> {
        LinkSpan {
            text: self.range.slice(input).trim(),
            name: self.name.slice(input).trim(),
            link: self.url.slice(input).trim(),
        }
    }
}

/// A construct whose closing delimiter never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unbalanced {
    /// The delimiter left open.
    pub delimiter: char,
    /// Offset of that delimiter.
    pub offset: usize,
}

/// Parse the construct of `kind` whose marker starts at `start`.
///
/// Returns `Ok(None)` when the brackets balance but no `(` follows, meaning
/// the text is not a link at all.
pub fn parse_link(
    input: &str,
    brackets: &BracketIndex<'_>,
    start: usize,
    kind: LinkKind,
) -> Result<Option<Link>, Unbalanced> {
    let bytes = input.as_bytes();
    let open = start + kind.prefix().len() - 1;
    debug_assert_eq!(bytes.get(open), Some(&b'['));

    let close = brackets.find_matching_from(b'[', b']', open).ok_or(Unbalanced {
        delimiter: '[',
        offset: open,
    })?;

    let paren = close + 1;
    if bytes.get(paren) != Some(&b'(') {
        return Ok(None);
    }

    let paren_close = brackets.find_matching_from(b'(', b')', paren).ok_or(Unbalanced {
        delimiter: '(',
        offset: paren,
    })?;

    Ok(Some(Link {
        kind,
        range: Range::from_usize(start, paren_close + 1),
        name: Range::from_usize(open + 1, close),
        url: Range::from_usize(paren + 1, paren_close),
    }))
}

/// Offset of the first `![` inside a link's span, if any.
pub fn find_nested_image(input: &str, link: &Link) -> Option<usize> {
    let from = link.range.start_usize() + 1;
    let to = link.url.end_usize();
    memmem::find(&input.as_bytes()[from..to], b"![").map(|i| from + i)
}
