//! XHTML page rendering.
//!
//! Most events render on `start`. Link-like tags render on `end` instead,
//! since an image nested in a link must end up inside the anchor: their
//! attributes are kept on a small stack of open contexts until then.

use std::io::Write;

use log::debug;
use smallvec::SmallVec;

use super::{EventSink, Flow};
use crate::error::Result;
use crate::event::{LinkSpan, ListType, Tag, TagKind};
use crate::metadata::FrontMatter;
use crate::render::HtmlWriter;
use crate::HtmlOptions;

const PROLOGUE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <meta http-equiv="Content-Type" content="text/html; charset=utf-8" />
  <meta http-equiv="Content-Style-Type" content="text/css" />
  <meta name="generator" content="pagemark" />
  <title>$PAGE_TITLE$</title>
  <style type="text/css">code{white-space: pre;}</style>
  <link rel="stylesheet" href="$STYLESHEET$" type="text/css" />
</head>
<body>
<div id="header">
<h1 class="title">$PAGE_TITLE$</h1>
<h3 class="date">$PAGE_DATE$</h3>
</div>
<p>"#;

const FOOTER_START: &str = "</p><p id=\"footer\">Generated using pagemark ";
const FOOTER_END: &str = "</p></body>\n</html>\n";

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

/// Blank-line sequences inside a whitespace gap that become paragraph breaks.
const BLANK_LINES: [&str; 3] = ["\r\n\r\n", "\n\n", "\r\r"];

/// A link-like tag waiting for its `end`.
#[derive(Debug)]
struct OpenLink {
    kind: TagKind,
    name: String,
    link: String,
    /// Source of an image nested inside a link.
    image: Option<String>,
}

impl OpenLink {
    fn new(kind: TagKind, span: &LinkSpan<'_>) -> Self {
        Self {
            kind,
            name: span.name.to_string(),
            link: span.link.to_string(),
            image: None,
        }
    }
}

/// Sink that renders events as an XHTML page into `W`.
///
/// Each event is rendered into a staging buffer and written to the output in
/// one call. Call [`finish`](Self::finish) after a completed parse to close
/// the page.
pub struct HtmlEmitter<W: Write> {
    out: W,
    buf: HtmlWriter,
    options: HtmlOptions,
    list: Option<ListType>,
    open: SmallVec<[OpenLink; 2]>,
}

impl<W: Write> HtmlEmitter<W> {
    pub fn new(out: W) -> Self {
        Self::with_options(out, HtmlOptions::default())
    }

    pub fn with_options(out: W, options: HtmlOptions) -> Self {
        Self {
            out,
            buf: HtmlWriter::new(),
            options,
            list: None,
            open: SmallVec::new(),
        }
    }

    /// Close any open list, write the footer and flush.
    pub fn finish(mut self) -> Result<W> {
        self.close_list();
        self.buf.write_str(FOOTER_START);
        self.buf.write_str(env!("CARGO_PKG_VERSION"));
        self.buf.write_str(FOOTER_END);
        self.into_inner()
    }

    /// Flush what has been rendered so far and return the output, without
    /// the footer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush_buf()?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn flush_buf(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.out.write_all(self.buf.as_bytes())?;
            self.buf.clear();
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.options.escape_html {
            self.buf.write_escaped_text(text);
        } else {
            self.buf.write_string(text);
        }
    }

    fn attr(&mut self, value: &str) {
        if self.options.escape_html {
            self.buf.write_escaped_attr(value);
        } else {
            self.buf.write_string(value);
        }
    }

    fn prologue(&mut self, fm: &FrontMatter) -> Result<()> {
        let title = fm.require("title")?;
        let date = fm.require("date")?;
        let (title, date) = if self.options.escape_html {
            (
                crate::escape::escape_text_to_string(title),
                crate::escape::escape_text_to_string(date),
            )
        } else {
            (title.to_string(), date.to_string())
        };
        let stylesheet = html_escape::encode_double_quoted_attribute(&self.options.stylesheet);
        self.buf.write_template(
            PROLOGUE,
            &[
                ("PAGE_TITLE", title.as_str()),
                ("PAGE_DATE", date.as_str()),
                ("STYLESHEET", stylesheet.as_ref()),
            ],
        );
        Ok(())
    }

    fn list_item(&mut self, list_type: ListType) {
        let class = match list_type {
            ListType::Dash => None,
            ListType::Star => Some("list-mult"),
            ListType::Plus => Some("list-plus"),
        };
        self.buf.list_item_start(class, self.list.is_some());
        self.list = Some(list_type);
    }

    fn close_list(&mut self) {
        if self.list.take().is_some() {
            self.buf.list_end();
        }
    }

    /// A whitespace gap. Blank lines inside it become paragraph breaks.
    fn gap(&mut self, gap: &str) {
        if !BLANK_LINES.iter().any(|b| gap.contains(b)) {
            self.buf.write_string(gap);
            return;
        }
        self.close_list();
        let mut rewritten = gap.to_string();
        for blank in BLANK_LINES {
            rewritten = rewritten.replace(blank, "</p><p>");
        }
        self.buf.write_string(&rewritten);
    }

    fn close_link(&mut self, kind: TagKind) {
        let ctx = match self.open.pop() {
            Some(ctx) if ctx.kind == kind => ctx,
            other => {
                debug!("unexpected end({kind}) with open context {:?}", other.map(|c| c.kind));
                return;
            }
        };
        match kind {
            TagKind::Image => {
                let in_link = self.open.last().is_some_and(|p| p.kind == TagKind::Link);
                if !in_link {
                    self.image(&ctx.link, &ctx.name);
                } else if let Some(parent) = self.open.last_mut() {
                    parent.image = Some(ctx.link);
                }
            }
            TagKind::Link => {
                self.buf.write_str("<a href=\"");
                self.attr(&ctx.link);
                self.buf.write_str("\">");
                match &ctx.image {
                    Some(src) => {
                        self.buf.write_str("<img src=\"");
                        self.attr(src);
                        self.buf.write_str("\"/>");
                    }
                    None => self.text(&ctx.name),
                }
                self.buf.write_str("</a>");
            }
            TagKind::Embed => self.iframe(&ctx.link),
            TagKind::EmbedYouTube => {
                let src = format!("{YOUTUBE_EMBED}{}", ctx.link);
                self.iframe(&src);
            }
            _ => {}
        }
    }

    fn image(&mut self, src: &str, alt: &str) {
        self.buf.write_str("<img src=\"");
        self.attr(src);
        self.buf.write_str("\" alt=\"");
        self.attr(alt);
        self.buf.write_str("\"/>");
    }

    fn iframe(&mut self, src: &str) {
        let width = self.options.embed_width.to_string();
        let height = self.options.embed_height.to_string();
        self.buf.write_str("<iframe width=\"");
        self.buf.write_string(&width);
        self.buf.write_str("\" height=\"");
        self.buf.write_string(&height);
        self.buf.write_str("\" src=\"");
        self.attr(src);
        self.buf.write_str("\" frameborder=\"0\" allowfullscreen=\"allowfullscreen\"></iframe>");
    }
}

impl<W: Write> EventSink for HtmlEmitter<W> {
    fn start(&mut self, tag: &Tag<'_>) -> Result<Flow> {
        match *tag {
            Tag::Header(fm) => self.prologue(fm)?,
            Tag::Heading(level, text) => {
                self.buf.heading_start(level);
                self.text(text);
                self.buf.heading_end(level);
            }
            Tag::Link(ref span)
            | Tag::Image(ref span)
            | Tag::Embed(ref span)
            | Tag::EmbedYouTube(ref span) => self.open.push(OpenLink::new(tag.kind(), span)),
            Tag::Break => {
                self.close_list();
                self.buf.paragraph_break();
            }
            Tag::Pre(text) => {
                self.buf.write_str("<pre>");
                self.text(text);
                self.buf.write_str("</pre>\n");
            }
            Tag::Bold(text) => {
                self.buf.write_str("<strong>");
                self.text(text);
                self.buf.write_str("</strong>");
            }
            Tag::Italic(text) => {
                self.buf.write_str("<em>");
                self.text(text);
                self.buf.write_str("</em>");
            }
            Tag::BoldItalic(text) => {
                self.buf.write_str("<strong><em>");
                self.text(text);
                self.buf.write_str("</em></strong>");
            }
            Tag::Characters(gap) => self.gap(gap),
            Tag::List { list_type, .. } => self.list_item(list_type),
        }
        self.flush_buf()?;
        Ok(Flow::Continue)
    }

    fn end(&mut self, kind: TagKind) -> Result<Flow> {
        match kind {
            TagKind::Link | TagKind::Image | TagKind::Embed | TagKind::EmbedYouTube => {
                self.close_link(kind)
            }
            TagKind::List => self.close_list(),
            _ => {}
        }
        self.flush_buf()?;
        Ok(Flow::Continue)
    }

    fn characters(&mut self, text: &str) -> Result<Flow> {
        self.text(text);
        self.flush_buf()?;
        Ok(Flow::Continue)
    }
}
