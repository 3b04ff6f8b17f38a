//! Owned event log, for inspecting a parse.

use super::{EventSink, Flow};
use crate::error::Result;
use crate::event::{Tag, TagKind};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// A tag opened, with its `text` attribute when it has one.
    Start(TagKind, Option<String>),
    End(TagKind),
    Characters(String),
}

impl Recorded {
    pub fn start(kind: TagKind, text: &str) -> Self {
        Recorded::Start(kind, Some(text.to_string()))
    }

    pub fn characters(text: &str) -> Self {
        Recorded::Characters(text.to_string())
    }
}

/// Sink that keeps every event it receives.
///
/// Optionally cancels after a fixed number of events.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<Recorded>,
    limit: Option<usize>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the parse once `limit` events have been recorded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn events(&self) -> &[Recorded] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Recorded> {
        self.events
    }

    fn push(&mut self, event: Recorded) -> Flow {
        self.events.push(event);
        match self.limit {
            Some(limit) if self.events.len() >= limit => Flow::Cancel,
            _ => Flow::Continue,
        }
    }
}

impl EventSink for EventRecorder {
    fn start(&mut self, tag: &Tag<'_>) -> Result<Flow> {
        Ok(self.push(Recorded::Start(tag.kind(), tag.text().map(str::to_string))))
    }

    fn end(&mut self, kind: TagKind) -> Result<Flow> {
        Ok(self.push(Recorded::End(kind)))
    }

    fn characters(&mut self, text: &str) -> Result<Flow> {
        Ok(self.push(Recorded::characters(text)))
    }
}
