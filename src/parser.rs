//! The token-driven parser.
//!
//! A single forward pass over the document. Each iteration takes the next
//! token, hands it to the handler its shape selects, and then classifies the
//! whitespace gap that follows. Handlers move the cursor past whatever they
//! consumed; an iteration that fails to move it is an error.

use log::{debug, trace, warn};

use crate::block::{self, front_matter, heading, list};
use crate::cursor::{Cursor, Token};
use crate::error::{Error, Result};
use crate::event::{Tag, TagKind};
use crate::inline::brackets::BracketIndex;
use crate::inline::{self, emphasis, links, pre, EmphasisKind, InlineKind, Link, LinkKind};
use crate::metadata::FrontMatter;
use crate::sink::{EventSink, Flow};
use crate::Options;

/// How a parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every token was processed.
    Completed,
    /// The sink asked to stop.
    Cancelled,
}

#[derive(Debug, Default)]
struct State {
    /// At least one token has been processed.
    started: bool,
    in_front_matter: bool,
    list_open: bool,
    cancelled: bool,
    front_matter: FrontMatter,
}

/// Parser driving one document into one sink.
///
/// # Example
/// ```
/// use pagemark::parser::{Outcome, Parser};
/// use pagemark::{EventRecorder, Options};
///
/// let mut recorder = EventRecorder::new();
/// let outcome = Parser::new("# Hello", &mut recorder, Options::default()).run().unwrap();
/// assert_eq!(outcome, Outcome::Completed);
/// assert_eq!(recorder.events().len(), 2);
/// ```
pub struct Parser<'a, 's> {
    cursor: Cursor<'a>,
    sink: &'s mut dyn EventSink,
    options: Options,
    state: State,
    brackets: BracketIndex<'a>,
}

impl<'a, 's> Parser<'a, 's> {
    pub fn new(input: &'a str, sink: &'s mut dyn EventSink, options: Options) -> Self {
        Self {
            cursor: Cursor::new(input),
            sink,
            options,
            state: State::default(),
            brackets: BracketIndex::new(input.as_bytes()),
        }
    }

    /// Parse the whole document.
    pub fn run(mut self) -> Result<Outcome> {
        let input = self.cursor.input();
        ensure_addressable(input.len())?;

        while let Some(token) = self.cursor.next_token() {
            trace!("token {:?} at {}", token.text, token.start());
            let before = self.cursor.offset();
            self.process_token(token)?;
            if self.state.cancelled {
                debug!("parse cancelled at offset {}", self.cursor.offset());
                return Ok(Outcome::Cancelled);
            }
            if self.cursor.offset() <= before {
                return Err(Error::no_forward_progress(input, token.start()));
            }
        }

        if self.state.in_front_matter {
            warn!("document ended inside front matter, no header emitted");
        }
        self.close_list()?;
        if self.state.cancelled {
            return Ok(Outcome::Cancelled);
        }
        Ok(Outcome::Completed)
    }

    fn process_token(&mut self, token: Token<'a>) -> Result<()> {
        let first_token = !self.state.started;
        self.state.started = true;

        if self.state.in_front_matter {
            self.process_front_matter(token)?;
            if !self.state.in_front_matter {
                self.process_whitespace()?;
            }
            return Ok(());
        }

        let first_on_line = self.cursor.is_first_on_line(&token);
        if first_token && token.text == front_matter::DELIMITER {
            debug!("front matter opened");
            self.state.in_front_matter = true;
            self.cursor.advance_to(token.end());
            return Ok(());
        }

        let handled = first_on_line && self.process_line_start(token)?;
        if !handled {
            self.process_inline(token)?;
        }
        self.process_whitespace()
    }

    fn process_front_matter(&mut self, token: Token<'a>) -> Result<()> {
        let first_on_line = self.cursor.is_first_on_line(&token);

        if first_on_line && token.text == front_matter::DELIMITER {
            let end = self.past_line_end(token.end());
            self.cursor.advance_to(end);
            self.state.in_front_matter = false;
            let fm = std::mem::take(&mut self.state.front_matter);
            debug!("front matter closed with {} fields", fm.len());
            return self.emit(&Tag::Header(&fm));
        }

        if first_on_line {
            if let Some(field) = front_matter::parse_field(&self.cursor, &self.brackets, &token) {
                trace!("front matter field {:?}", field.key);
                self.state.front_matter.insert(field.key, field.value);
                self.cursor.advance_to(field.end);
                return Ok(());
            }
        }

        self.cursor.advance_to(token.end());
        Ok(())
    }

    /// Offset after the newline ending the line at `from`, when only
    /// whitespace remains on that line. Otherwise `from` itself.
    fn past_line_end(&self, from: usize) -> usize {
        let line_end = self.cursor.line_end(from);
        if !self.cursor.slice(from, line_end).trim().is_empty() {
            return from;
        }
        (line_end + 1).min(self.cursor.input().len())
    }

    /// Headings and list items. Returns false if `token` is neither.
    fn process_line_start(&mut self, token: Token<'a>) -> Result<bool> {
        let input = self.cursor.input();

        if token.starts_with("#") {
            if let Some(h) = heading::parse_heading(&self.cursor, &token) {
                self.cursor.advance_to(h.end);
                self.emit(&Tag::Heading(h.level, h.text.slice(input)))?;
                return Ok(true);
            }
        }

        if let Some(list_type) = list::list_marker(token.text) {
            self.cursor.advance_to(token.end());
            self.state.list_open = true;
            self.emit_start(&Tag::List {
                text: token.text,
                list_type,
            })?;
            return Ok(true);
        }

        Ok(false)
    }

    fn process_inline(&mut self, token: Token<'a>) -> Result<()> {
        let input = self.cursor.input();

        match inline::classify(token.text) {
            InlineKind::Link(kind) => {
                match links::parse_link(input, &self.brackets, token.start(), kind) {
                    Ok(Some(link)) => self.process_link(&link),
                    Ok(None) => self.process_characters(token),
                    Err(unbalanced) if self.options.strict_links => Err(Error::unbalanced(
                        input,
                        unbalanced.delimiter,
                        unbalanced.offset,
                    )),
                    Err(unbalanced) => {
                        debug!(
                            "unbalanced `{}` at {}, treating token as text",
                            unbalanced.delimiter, unbalanced.offset
                        );
                        self.process_characters(token)
                    }
                }
            }
            InlineKind::Pre => match pre::parse_fence(input, token.start()) {
                Some(fence) => {
                    self.cursor.advance_to(fence.end);
                    self.emit(&Tag::Pre(fence.body.slice(input)))
                }
                None => self.process_characters(token),
            },
            InlineKind::Emphasis(kind) => match emphasis::parse_emphasis(input, token.start(), kind) {
                Some(em) => {
                    let text = em.body.slice(input);
                    self.cursor.advance_to(em.end);
                    self.emit(&match em.kind {
                        EmphasisKind::Italic => Tag::Italic(text),
                        EmphasisKind::Bold => Tag::Bold(text),
                        EmphasisKind::BoldItalic => Tag::BoldItalic(text),
                    })
                }
                None => self.process_characters(token),
            },
            InlineKind::Text => self.process_characters(token),
        }
    }

    fn process_link(&mut self, link: &Link) -> Result<()> {
        let input = self.cursor.input();
        let span = link.span(input);
        self.cursor.advance_to(link.end());

        match link.kind {
            LinkKind::Link => {
                self.emit_start(&Tag::Link(span))?;
                if let Some(image) = self.nested_image(link) {
                    self.emit(&Tag::Image(image.span(input)))?;
                }
                self.emit_end(TagKind::Link)
            }
            LinkKind::Image => self.emit(&Tag::Image(span)),
            LinkKind::Embed => self.emit(&Tag::Embed(span)),
            LinkKind::EmbedYouTube => self.emit(&Tag::EmbedYouTube(span)),
        }
    }

    /// The first image inside `link`, if it is complete within the link.
    fn nested_image(&self, link: &Link) -> Option<Link> {
        let input = self.cursor.input();
        let at = links::find_nested_image(input, link)?;
        match links::parse_link(input, &self.brackets, at, LinkKind::Image) {
            Ok(Some(image)) if image.end() <= link.end() => Some(image),
            _ => None,
        }
    }

    fn process_characters(&mut self, token: Token<'a>) -> Result<()> {
        self.cursor.advance_to(token.end());
        if self.state.cancelled {
            return Ok(());
        }
        let flow = self.sink.characters(token.text)?;
        self.note(flow);
        Ok(())
    }

    /// Classify the gap between the cursor and the next token.
    fn process_whitespace(&mut self) -> Result<()> {
        if self.state.cancelled {
            return Ok(());
        }
        let start = self.cursor.offset();
        let end = self
            .cursor
            .next_token()
            .map_or(self.cursor.input().len(), |t| t.start());
        if end <= start {
            return Ok(());
        }

        let gap = self.cursor.slice(start, end);
        self.cursor.advance_to(end);
        if block::is_big_break(gap) {
            self.close_list()?;
            self.emit(&Tag::Break)
        } else {
            self.emit(&Tag::Characters(gap))
        }
    }

    fn close_list(&mut self) -> Result<()> {
        if self.state.list_open {
            self.state.list_open = false;
            self.emit_end(TagKind::List)?;
        }
        Ok(())
    }

    /// `start` then `end` for the same tag.
    fn emit(&mut self, tag: &Tag<'_>) -> Result<()> {
        self.emit_start(tag)?;
        self.emit_end(tag.kind())
    }

    fn emit_start(&mut self, tag: &Tag<'_>) -> Result<()> {
        if self.state.cancelled {
            return Ok(());
        }
        let flow = self.sink.start(tag)?;
        self.note(flow);
        Ok(())
    }

    fn emit_end(&mut self, kind: TagKind) -> Result<()> {
        if self.state.cancelled {
            return Ok(());
        }
        let flow = self.sink.end(kind)?;
        self.note(flow);
        Ok(())
    }

    #[inline]
    fn note(&mut self, flow: Flow) {
        if flow.is_cancel() {
            self.state.cancelled = true;
        }
    }
}

/// Offsets are stored as `u32`, so longer documents are rejected up front.
fn ensure_addressable(len: usize) -> Result<()> {
    if u32::try_from(len).is_err() {
        return Err(Error::DocumentTooLarge { len });
    }
    Ok(())
}

/// Parse `input` into `sink` with the given options.
pub fn parse_with_options(
    input: &str,
    sink: &mut dyn EventSink,
    options: &Options,
) -> Result<Outcome> {
    Parser::new(input, sink, *options).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{EventRecorder, Recorded};
    use pretty_assertions::assert_eq;

    fn events(input: &str) -> Vec<Recorded> {
        let mut recorder = EventRecorder::new();
        parse_with_options(input, &mut recorder, &Options::default()).unwrap();
        recorder.into_events()
    }

    fn start(kind: TagKind, text: &str) -> Recorded {
        Recorded::start(kind, text)
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(
            events("hello world"),
            vec![
                Recorded::characters("hello"),
                start(TagKind::Characters, " "),
                Recorded::End(TagKind::Characters),
                Recorded::characters("world"),
            ]
        );
    }

    #[test]
    fn test_heading_consumes_line() {
        assert_eq!(
            events("## Two words\nnext"),
            vec![
                start(TagKind::Heading2, "Two words"),
                Recorded::End(TagKind::Heading2),
                start(TagKind::Characters, "\n"),
                Recorded::End(TagKind::Characters),
                Recorded::characters("next"),
            ]
        );
    }

    #[test]
    fn test_hash_mid_line_is_text() {
        assert_eq!(
            events("a #b"),
            vec![
                Recorded::characters("a"),
                start(TagKind::Characters, " "),
                Recorded::End(TagKind::Characters),
                Recorded::characters("#b"),
            ]
        );
    }

    #[test]
    fn test_big_break() {
        let evs = events("a\n\nb");
        assert_eq!(evs[1], Recorded::Start(TagKind::Break, None));
        assert_eq!(evs[2], Recorded::End(TagKind::Break));
    }

    #[test]
    fn test_front_matter() {
        let mut recorder = EventRecorder::new();
        let input = "---\ntitle: \"A\"\ndate: 2020-01-01\n---\nbody";
        parse_with_options(input, &mut recorder, &Options::default()).unwrap();
        assert_eq!(
            recorder.into_events(),
            vec![
                Recorded::Start(TagKind::Header, None),
                Recorded::End(TagKind::Header),
                Recorded::characters("body"),
            ]
        );
    }

    #[test]
    fn test_delimiter_after_first_token_is_text() {
        let evs = events("intro\n---\n");
        assert_eq!(evs[3], Recorded::characters("---"));
    }

    #[test]
    fn test_unterminated_front_matter_emits_nothing() {
        assert!(events("---\ntitle: x\nbody text").is_empty());
    }

    #[test]
    fn test_list_closed_at_end() {
        assert_eq!(
            events("- a"),
            vec![
                start(TagKind::List, "-"),
                start(TagKind::Characters, " "),
                Recorded::End(TagKind::Characters),
                Recorded::characters("a"),
                Recorded::End(TagKind::List),
            ]
        );
    }

    #[test]
    fn test_strict_links() {
        let mut recorder = EventRecorder::new();
        let options = Options { strict_links: true };
        let err = parse_with_options("[broken](no-close", &mut recorder, &options).unwrap_err();
        assert!(matches!(
            err,
            Error::UnbalancedDelimiter {
                delimiter: '(',
                offset: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_unclosed_link_openers_share_one_index() {
        let input = "[a ".repeat(1_000) + "[b](c)";
        let mut recorder = EventRecorder::new();
        let options = Options { strict_links: true };
        let err = parse_with_options(&input, &mut recorder, &options).unwrap_err();
        assert!(matches!(
            err,
            Error::UnbalancedDelimiter {
                delimiter: '[',
                offset: 0,
                ..
            }
        ));

        let evs = events(&input);
        assert_eq!(evs[0], Recorded::characters("[a"));
        assert_eq!(evs[evs.len() - 2], start(TagKind::Link, "[b](c)"));
    }

    #[test]
    fn test_document_length_limit() {
        assert!(ensure_addressable(u32::MAX as usize).is_ok());
        if let Some(len) = (u32::MAX as usize).checked_add(1) {
            assert!(matches!(
                ensure_addressable(len),
                Err(Error::DocumentTooLarge { len: l }) if l == len
            ));
        }
    }

    #[test]
    fn test_cancel_stops_events() {
        let mut recorder = EventRecorder::with_limit(1);
        let outcome =
            parse_with_options("one two three", &mut recorder, &Options::default()).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(recorder.events(), &[Recorded::characters("one")]);
    }
}
