//! Event types passed from the parser to sinks.
//!
//! Events form a flat stream, not a tree. Every tag except `List` is opened
//! and closed back to back; a list is closed once, after its last item.

use std::fmt;

use crate::metadata::FrontMatter;

/// The closed set of tag kinds, as seen by `end` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Header,
    Heading1,
    Heading2,
    Heading3,
    Link,
    Image,
    Break,
    Pre,
    Bold,
    Italic,
    BoldItalic,
    Characters,
    List,
    Embed,
    EmbedYouTube,
}

impl TagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Heading1 => "Heading1",
            Self::Heading2 => "Heading2",
            Self::Heading3 => "Heading3",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::Break => "Break",
            Self::Pre => "Pre",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::BoldItalic => "BoldItalic",
            Self::Characters => "Characters",
            Self::List => "List",
            Self::Embed => "Embed",
            Self::EmbedYouTube => "EmbedYouTube",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading level (`#`, `##`, `###`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    /// Level for a run of `n` hashes.
    pub fn from_marker_len(n: usize) -> Option<Self> {
        match n {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// List bullet style, taken from the item marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListType {
    /// `-`
    Dash,
    /// `*`
    Star,
    /// `+`
    Plus,
}

impl ListType {
    pub fn from_marker(b: u8) -> Option<Self> {
        match b {
            b'-' => Some(Self::Dash),
            b'*' => Some(Self::Star),
            b'+' => Some(Self::Plus),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Self::Dash => '-',
            Self::Star => '*',
            Self::Plus => '+',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dash => "-",
            Self::Star => "*",
            Self::Plus => "+",
        }
    }
}

/// Attributes shared by links, images and embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpan<'a> {
    /// The whole matched construct, trimmed.
    pub text: &'a str,
    /// Text between the square brackets.
    pub name: &'a str,
    /// Text between the parentheses.
    pub link: &'a str,
}

/// An opening event with its attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tag<'a> {
    /// The closed front matter block.
    Header(&'a FrontMatter),
    Heading(HeadingLevel, &'a str),
    Link(LinkSpan<'a>),
    Image(LinkSpan<'a>),
    /// `$[name](url)`
    Embed(LinkSpan<'a>),
    /// `$YT[name](video-id)`
    EmbedYouTube(LinkSpan<'a>),
    /// Paragraph break (blank line).
    Break,
    /// Raw contents of a ```` ``` ```` fence.
    Pre(&'a str),
    Bold(&'a str),
    Italic(&'a str),
    BoldItalic(&'a str),
    /// Whitespace between tokens, verbatim.
    Characters(&'a str),
    /// Start of a list item.
    List { text: &'a str, list_type: ListType },
}

impl<'a> Tag<'a> {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Header(_) => TagKind::Header,
            Tag::Heading(HeadingLevel::H1, _) => TagKind::Heading1,
            Tag::Heading(HeadingLevel::H2, _) => TagKind::Heading2,
            Tag::Heading(HeadingLevel::H3, _) => TagKind::Heading3,
            Tag::Link(_) => TagKind::Link,
            Tag::Image(_) => TagKind::Image,
            Tag::Embed(_) => TagKind::Embed,
            Tag::EmbedYouTube(_) => TagKind::EmbedYouTube,
            Tag::Break => TagKind::Break,
            Tag::Pre(_) => TagKind::Pre,
            Tag::Bold(_) => TagKind::Bold,
            Tag::Italic(_) => TagKind::Italic,
            Tag::BoldItalic(_) => TagKind::BoldItalic,
            Tag::Characters(_) => TagKind::Characters,
            Tag::List { .. } => TagKind::List,
        }
    }

    /// The `text` attribute, for tags that carry one.
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Tag::Heading(_, text)
            | Tag::Pre(text)
            | Tag::Bold(text)
            | Tag::Italic(text)
            | Tag::BoldItalic(text)
            | Tag::Characters(text)
            | Tag::List { text, .. } => Some(text),
            Tag::Link(span) | Tag::Image(span) | Tag::Embed(span) | Tag::EmbedYouTube(span) => {
                Some(span.text)
            }
            Tag::Header(_) | Tag::Break => None,
        }
    }

    /// Look up an attribute by its string key.
    ///
    /// Header attributes are the front matter fields; other tags expose
    /// `text`, plus `name`/`link` for link-like tags and `list_type` for
    /// list items.
    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        match (*self, key) {
            (Tag::Header(fm), key) => fm.get(key),
            (Tag::Link(s) | Tag::Image(s) | Tag::Embed(s) | Tag::EmbedYouTube(s), "name") => {
                Some(s.name)
            }
            (Tag::Link(s) | Tag::Image(s) | Tag::Embed(s) | Tag::EmbedYouTube(s), "link") => {
                Some(s.link)
            }
            (Tag::List { list_type, .. }, "list_type") => Some(list_type.as_str()),
            (tag, "text") => tag.text(),
            _ => None,
        }
    }
}
