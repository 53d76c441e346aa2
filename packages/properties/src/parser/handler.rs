//! Tag handler trait definition.

use super::events::StartTag;
use crate::error::Result;

/// Character data collected for an element, finalized when it closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementText {
    /// Text exactly as it appeared.
    pub raw: String,
    /// Text with surrounding whitespace removed.
    pub trimmed: String,
}

impl ElementText {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim().to_string();
        Self { raw, trimmed }
    }

    /// True when the element held nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// The raw text, or `None` when blank.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.raw)
        }
    }
}

/// Trait for the states of a [`HandlerStack`](super::HandlerStack).
///
/// A handler owns one element and everything beneath it. For each nested
/// element it may either handle it locally or hand it, with its whole
/// subtree, to a freshly created child handler. Implementors are usually an
/// enum with one variant per kind of element, so that a parent can take the
/// finished child apart in [`child_finished`](Self::child_finished).
pub trait TagHandler: Sized {
    /// Offered an element that opens while this handler is active.
    ///
    /// Return `Some(child)` to delegate the element to `child`; the child
    /// receives every event up to and including the element's end.
    /// Return `None` to handle the element locally.
    fn start_local(&mut self, tag: &StartTag) -> Result<Option<Self>>;

    /// Called when an element handled by this handler closes, including the
    /// handler's own element.
    fn end_local(&mut self, _name: &str, _text: &ElementText) -> Result<()> {
        Ok(())
    }

    /// Called with a child handler once its element has closed.
    fn child_finished(&mut self, child: Self) -> Result<()>;
}
