//! Front matter and plain-text extraction.

use log::debug;

use super::{EventSink, Flow};
use crate::error::Result;
use crate::event::{Tag, TagKind};
use crate::metadata::FrontMatter;

/// A document split into its front matter and its text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `None` when the document has no closed front matter block.
    pub front_matter: Option<FrontMatter>,
    /// Concatenated text of every tag and token after the header.
    pub text: String,
}

/// Sink that records the Header fields and accumulates text.
///
/// In header-only mode it cancels the parse as soon as the Header closes, so
/// the body of a long document is never scanned.
///
/// # Example
/// ```
/// use pagemark::{parse, MetadataCollector};
///
/// let mut collector = MetadataCollector::new();
/// parse("---\ntitle: \"A\"\ndate: 2020-01-01\n---\nbody", &mut collector).unwrap();
///
/// let doc = collector.into_document();
/// assert_eq!(doc.front_matter.unwrap().title(), Some("A"));
/// assert_eq!(doc.text, "body");
/// ```
#[derive(Debug, Default)]
pub struct MetadataCollector {
    front_matter: Option<FrontMatter>,
    text: String,
    header_only: bool,
}

impl MetadataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that stops the parse once the Header has been seen.
    pub fn header_only() -> Self {
        Self {
            header_only: true,
            ..Self::default()
        }
    }

    pub fn front_matter(&self) -> Option<&FrontMatter> {
        self.front_matter.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_document(self) -> Document {
        Document {
            front_matter: self.front_matter,
            text: self.text,
        }
    }
}

impl EventSink for MetadataCollector {
    fn start(&mut self, tag: &Tag<'_>) -> Result<Flow> {
        match tag {
            Tag::Header(fm) => self.front_matter = Some((*fm).clone()),
            tag => {
                if let Some(text) = tag.text() {
                    self.text.push_str(text);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn end(&mut self, kind: TagKind) -> Result<Flow> {
        if kind == TagKind::Header && self.header_only {
            debug!("header collected, stopping");
            return Ok(Flow::Cancel);
        }
        Ok(Flow::Continue)
    }

    fn characters(&mut self, text: &str) -> Result<Flow> {
        self.text.push_str(text);
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::HeadingLevel;

    #[test]
    fn test_header_fields_are_copied() {
        let fm: FrontMatter = [("title", "A"), ("date", "2020-01-01")].into_iter().collect();
        let mut c = MetadataCollector::new();
        assert_eq!(c.start(&Tag::Header(&fm)).unwrap(), Flow::Continue);
        assert_eq!(c.end(TagKind::Header).unwrap(), Flow::Continue);
        assert_eq!(c.front_matter(), Some(&fm));
    }

    #[test]
    fn test_header_only_cancels_at_header_end() {
        let fm = FrontMatter::new();
        let mut c = MetadataCollector::header_only();
        c.start(&Tag::Header(&fm)).unwrap();
        assert_eq!(c.end(TagKind::Header).unwrap(), Flow::Cancel);
    }

    #[test]
    fn test_text_accumulates() {
        let mut c = MetadataCollector::new();
        c.start(&Tag::Heading(HeadingLevel::H1, "Title")).unwrap();
        c.end(TagKind::Heading1).unwrap();
        c.start(&Tag::Characters("\n")).unwrap();
        c.characters("word").unwrap();
        c.start(&Tag::Break).unwrap();
        assert_eq!(c.text(), "Title\nword");
    }
}
