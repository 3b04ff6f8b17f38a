//! Line-start constructs.
//!
//! These only apply to the first token on a line:
//! - Front matter (`---` ... `---`)
//! - Headings (`#`, `##`, `###`)
//! - List items (`-`, `*`, `+`)
//!
//! Paragraph breaks are found in the whitespace between tokens.

pub mod front_matter;
pub mod heading;
pub mod list;

pub use front_matter::Field;
pub use heading::Heading;

use memchr::memchr_iter;

/// Whether a whitespace gap spans a blank line.
#[inline]
pub fn is_big_break(gap: &str) -> bool {
    memchr_iter(b'\n', gap.as_bytes()).nth(1).is_some()
}
