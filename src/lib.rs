//! pagemark: a lightweight markup to XHTML page compiler
//!
//! Documents are scanned in a single forward pass over whitespace-separated
//! tokens. The parser emits a flat stream of events into an [`EventSink`];
//! the crate ships sinks that render a page ([`HtmlEmitter`]) or pull out the
//! front matter and text ([`MetadataCollector`]).
//!
//! # Design Principles
//! - No AST: streaming events only
//! - No regex: byte-level scanning with memchr
//! - Forward only: every iteration consumes input, so every parse ends
//! - Borrowed text: event attributes are slices of the input
//!
//! # Markup
//! ```text
//! ---
//! title: "A page"
//! date: 2020-01-01
//! ---
//! # Heading            ## and ### for smaller ones
//! - item               * and + give styled lists
//! *italic* **bold** ***both***
//! [name](url)  ![alt](src)  $[name](url)  $YT[name](video-id)
//! ```

pub mod block;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod event;
pub mod inline;
pub mod metadata;
pub mod parser;
pub mod range;
pub mod render;
pub mod sink;

use std::io::Write;

// Re-export primary types
pub use error::{Error, Result};
pub use event::{HeadingLevel, LinkSpan, ListType, Tag, TagKind};
pub use metadata::{FrontMatter, PageMeta};
pub use parser::{Outcome, Parser};
pub use range::Range;
pub use render::HtmlWriter;
pub use sink::{
    Document, EventRecorder, EventSink, Flow, HtmlEmitter, MetadataCollector, Recorded,
};

/// Parsing options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Fail on a link, image or embed whose `]` or `)` never appears,
    /// instead of passing the token through as text.
    pub strict_links: bool,
}

/// Page rendering options.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Escape `<`, `>`, `&` and `"` in text and attributes.
    pub escape_html: bool,
    /// Width of embed iframes, in pixels.
    pub embed_width: u32,
    /// Height of embed iframes, in pixels.
    pub embed_height: u32,
    /// Stylesheet linked from the page head.
    pub stylesheet: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            escape_html: true,
            embed_width: 500,
            embed_height: 400,
            stylesheet: "pandoc.css".to_string(),
        }
    }
}

/// Parse a document into `sink`.
///
/// # Example
/// ```
/// use pagemark::{parse, EventRecorder, Outcome, Recorded, TagKind};
///
/// let mut recorder = EventRecorder::new();
/// assert_eq!(parse("**bold**", &mut recorder).unwrap(), Outcome::Completed);
/// assert_eq!(
///     recorder.events(),
///     &[Recorded::start(TagKind::Bold, "bold"), Recorded::End(TagKind::Bold)]
/// );
/// ```
pub fn parse(input: &str, sink: &mut dyn EventSink) -> Result<Outcome> {
    parser::parse_with_options(input, sink, &Options::default())
}

/// Parse a document into `sink` with options.
pub fn parse_with_options(
    input: &str,
    sink: &mut dyn EventSink,
    options: &Options,
) -> Result<Outcome> {
    parser::parse_with_options(input, sink, options)
}

/// Render a document as an XHTML page.
///
/// # Example
/// ```
/// let html = pagemark::to_html("---\ntitle: Hi\ndate: 2020-01-01\n---\n# Hello").unwrap();
/// assert!(html.contains("<title>Hi</title>"));
/// assert!(html.contains("<h1>Hello</h1>"));
/// ```
pub fn to_html(input: &str) -> Result<String> {
    to_html_with_options(input, &HtmlOptions::default(), &Options::default())
}

/// Render a document as an XHTML page with options.
pub fn to_html_with_options(
    input: &str,
    html: &HtmlOptions,
    options: &Options,
) -> Result<String> {
    let out = Vec::with_capacity(input.len() + input.len() / 4 + 1024);
    let out = render_html(input, out, html, options)?;
    // SAFETY: the emitter only writes str slices and ASCII markup
    Ok(unsafe { String::from_utf8_unchecked(out) })
}

/// Render a document as an XHTML page into `out`.
///
/// The footer is written only when the parse completes. Either way the output
/// is flushed and handed back.
pub fn render_html<W: Write>(
    input: &str,
    out: W,
    html: &HtmlOptions,
    options: &Options,
) -> Result<W> {
    let mut emitter = HtmlEmitter::with_options(out, html.clone());
    match parser::parse_with_options(input, &mut emitter, options)? {
        Outcome::Completed => emitter.finish(),
        Outcome::Cancelled => emitter.into_inner(),
    }
}

/// Read only the front matter, without scanning the body.
///
/// Returns `None` if the document has no closed front matter block.
pub fn read_front_matter(input: &str) -> Result<Option<FrontMatter>> {
    let mut collector = MetadataCollector::header_only();
    parse(input, &mut collector)?;
    Ok(collector.into_document().front_matter)
}

/// Split a document into its front matter and text content.
pub fn extract(input: &str) -> Result<Document> {
    let mut collector = MetadataCollector::new();
    parse(input, &mut collector)?;
    Ok(collector.into_document())
}
