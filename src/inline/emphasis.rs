//! Asterisk emphasis: `*italic*`, `**bold**`, `***both***`.
//!
//! The run length of the opening token picks the kind, longest first, and
//! the closer is the next run of the same length. There is no delimiter
//! stack and no flanking rules.

use memchr::memmem;

use crate::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisKind {
    Italic,
    Bold,
    BoldItalic,
}

impl EmphasisKind {
    /// Kind opened by a token, if it starts with `*`.
    pub fn from_token(text: &str) -> Option<Self> {
        if text.starts_with("***") {
            Some(Self::BoldItalic)
        } else if text.starts_with("**") {
            Some(Self::Bold)
        } else if text.starts_with('*') {
            Some(Self::Italic)
        } else {
            None
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Italic => "*",
            Self::Bold => "**",
            Self::BoldItalic => "***",
        }
    }
}

/// A matched emphasis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasis {
    pub kind: EmphasisKind,
    /// Text between the markers.
    pub body: Range,
    /// Offset just past the closing marker.
    pub end: usize,
}

/// Match emphasis of `kind` whose opening marker starts at `start`.
pub fn parse_emphasis(input: &str, start: usize, kind: EmphasisKind) -> Option<Emphasis> {
    let marker = kind.marker();
    let body_start = start + marker.len();
    let rest = input.as_bytes().get(body_start..)?;
    let close = body_start + memmem::find(rest, marker.as_bytes())?;
    Some(Emphasis {
        kind,
        body: Range::from_usize(body_start, close),
        end: close + marker.len(),
    })
}
