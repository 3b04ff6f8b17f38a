//! Inline constructs.
//!
//! Every construct here is recognised from the prefix of the token that
//! opens it and may run past that token, across whitespace and newlines.

pub mod brackets;
pub mod emphasis;
pub mod links;
pub mod pre;

pub use emphasis::{Emphasis, EmphasisKind};
pub use links::{Link, LinkKind, Unbalanced};
pub use pre::Fence;

/// The construct a token opens when it is not a line-start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    Link(LinkKind),
    Pre,
    Emphasis(EmphasisKind),
    Text,
}

/// Classify a token by prefix.
///
/// Precedence: `![`, `$[`, `$YT[`, `[`, ```` ``` ````, `***`, `**`, `*`.
pub fn classify(token: &str) -> InlineKind {
    const LINKS: [LinkKind; 4] = [
        LinkKind::Image,
        LinkKind::Embed,
        LinkKind::EmbedYouTube,
        LinkKind::Link,
    ];
    if let Some(kind) = LINKS.into_iter().find(|k| token.starts_with(k.prefix())) {
        return InlineKind::Link(kind);
    }
    if token.starts_with(pre::FENCE) {
        return InlineKind::Pre;
    }
    match EmphasisKind::from_token(token) {
        Some(kind) => InlineKind::Emphasis(kind),
        None => InlineKind::Text,
    }
}
