//! HTML escaping for text content.
//!
//! Fast path: find the first escapable byte with memchr and bulk-copy the
//! segments between escapes.

use memchr::{memchr, memchr3};

/// Lookup table for escapable bytes in text content.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Escape HTML text content into `out`.
///
/// Escapes `<`, `>`, `&` and `"`.
///
/// # Example
/// ```
/// use pagemark::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<script>");
/// assert_eq!(out, b"&lt;script&gt;");
/// ```
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    let mut pos = match first_text_escape(input) {
        Some(p) => p,
        None => {
            out.extend_from_slice(input);
            return;
        }
    };
    out.extend_from_slice(&input[..pos]);

    while pos < input.len() {
        let scan_start = pos;
        while pos < input.len() && !TEXT_ESCAPE_TABLE[input[pos] as usize] {
            pos += 1;
        }
        out.extend_from_slice(&input[scan_start..pos]);

        if pos < input.len() {
            let seq: &[u8] = match input[pos] {
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'&' => b"&amp;",
                b'"' => b"&quot;",
                _ => unreachable!(),
            };
            out.extend_from_slice(seq);
            pos += 1;
        }
    }
}

/// Escape and return a new String.
///
/// Prefer [`escape_text_into`] to reuse buffers.
pub fn escape_text_to_string(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input.as_bytes());
    // SAFETY: only ASCII sequences are inserted between slices of valid UTF-8
    unsafe { String::from_utf8_unchecked(out) }
}

#[inline]
fn first_text_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', input);
    let b = memchr(b'"', input);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
