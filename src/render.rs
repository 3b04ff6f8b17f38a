//! HTML staging buffer.
//!
//! The HTML emitter renders each event into an [`HtmlWriter`] and then
//! hands the bytes to its output stream in one write.

use std::borrow::Cow;

use memchr::memchr;

use crate::escape;
use crate::event::HeadingLevel;

/// Reusable HTML output buffer.
///
/// # Example
/// ```
/// use pagemark::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.write_str("<p>");
/// writer.write_escaped_text("Fish & Chips");
/// writer.write_str("</p>");
/// assert_eq!(writer.as_bytes(), b"<p>Fish &amp; Chips</p>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a dynamic string without escaping.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text content with HTML escaping.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text.as_bytes());
    }

    /// Write a double-quoted attribute value with escaping.
    #[inline]
    pub fn write_escaped_attr(&mut self, value: &str) {
        let encoded: Cow<'_, str> = html_escape::encode_double_quoted_attribute(value);
        self.out.extend_from_slice(encoded.as_bytes());
    }

    /// Write `template`, replacing each `$NAME$` placeholder with the
    /// matching value from `vars`. Unknown placeholders are written as is.
    pub fn write_template(&mut self, template: &str, vars: &[(&str, &str)]) {
        let bytes = template.as_bytes();
        let mut pos = 0;
        while let Some(open) = memchr(b'$', &bytes[pos..]).map(|i| pos + i) {
            let close = match memchr(b'$', &bytes[open + 1..]) {
                Some(i) => open + 1 + i,
                None => break,
            };
            let name = &template[open + 1..close];
            match vars.iter().find(|(k, _)| *k == name) {
                Some((_, value)) => {
                    self.write_string(&template[pos..open]);
                    self.write_string(value);
                    pos = close + 1;
                }
                None => {
                    self.write_string(&template[pos..close]);
                    pos = close;
                }
            }
        }
        self.write_string(&template[pos..]);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear output for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    // --- Common HTML Elements ---

    /// Write heading start: `<hN>`
    #[inline]
    pub fn heading_start(&mut self, level: HeadingLevel) {
        self.write_str("<h");
        self.write_byte(b'0' + level.as_u8());
        self.write_byte(b'>');
    }

    /// Write heading end: `</hN>\n`
    #[inline]
    pub fn heading_end(&mut self, level: HeadingLevel) {
        self.write_str("</h");
        self.write_byte(b'0' + level.as_u8());
        self.write_str(">\n");
    }

    /// Close the current paragraph and open the next.
    #[inline]
    pub fn paragraph_break(&mut self) {
        self.write_str("</p>\n<p>");
    }

    /// Write list item start, opening the list first if needed.
    pub fn list_item_start(&mut self, class: Option<&'static str>, continuing: bool) {
        if continuing {
            self.write_str("</li>");
        } else {
            self.write_str("<ul");
            self.class_attr(class);
            self.write_byte(b'>');
        }
        self.write_str("<li");
        self.class_attr(class);
        self.write_str(">\n");
    }

    #[inline]
    pub fn list_end(&mut self) {
        self.write_str("</li></ul>\n");
    }

    fn class_attr(&mut self, class: Option<&'static str>) {
        if let Some(class) = class {
            self.write_str(" class=\"");
            self.write_str(class);
            self.write_byte(b'"');
        }
    }
}
