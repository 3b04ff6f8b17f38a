//! List item markers.

use crate::event::ListType;

/// The list style a line-start token opens.
///
/// Only a bare marker counts, so `**bold**` or `-5` at the start of a line
/// stay inline text.
pub fn list_marker(token: &str) -> Option<ListType> {
    match token.as_bytes() {
        [b] => ListType::from_marker(*b),
        _ => None,
    }
}
