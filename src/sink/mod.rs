//! Event consumers.
//!
//! The parser pushes every event into one [`EventSink`]. A sink can stop the
//! parse early by returning [`Flow::Cancel`]; no further events are delivered
//! after that.

pub mod collector;
pub mod html;
pub mod recorder;

pub use collector::{Document, MetadataCollector};
pub use html::HtmlEmitter;
pub use recorder::{EventRecorder, Recorded};

use crate::error::Result;
use crate::event::{Tag, TagKind};

/// Whether the parser should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Cancel,
}

impl Flow {
    #[inline]
    pub fn is_cancel(self) -> bool {
        self == Flow::Cancel
    }
}

/// A consumer of parse events.
///
/// Events arrive in document order. Every `start` is followed by the `end` of
/// the same kind before the next event, except list items: a run of items
/// gets a single `end(TagKind::List)` after the last one.
pub trait EventSink {
    /// A tag opens, with its attributes.
    fn start(&mut self, tag: &Tag<'_>) -> Result<Flow>;

    /// A tag of `kind` closes.
    fn end(&mut self, kind: TagKind) -> Result<Flow>;

    /// A plain token, verbatim.
    fn characters(&mut self, text: &str) -> Result<Flow>;
}
