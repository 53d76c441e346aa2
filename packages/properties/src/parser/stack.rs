//! Handler stack that drives tag handlers from a single event loop.

use std::io::BufRead;

use super::events::{EventReader, StartTag, XmlEvent};
use super::handler::{ElementText, TagHandler};
use crate::config::MAX_HANDLER_DEPTH;
use crate::error::{PropertyError, Result};

struct Frame<H> {
    handler: H,
    /// Elements currently open in this handler, its own element included.
    open: usize,
    text: String,
}

impl<H> Frame<H> {
    fn new(handler: H, open: usize) -> Self {
        Self {
            handler,
            open,
            text: String::new(),
        }
    }
}

/// Stack of active tag handlers.
///
/// The root handler sits at the bottom. Each delegated element pushes a
/// child on top; the top handler receives every event until its element
/// closes, after which it is popped and passed to the handler beneath it.
/// A handler therefore has at most one active child at any time.
pub struct HandlerStack<H: TagHandler> {
    root: Frame<H>,
    children: Vec<Frame<H>>,
    max_depth: usize,
    root_closed: bool,
}

impl<H: TagHandler> HandlerStack<H> {
    /// Create a stack with `root` handling the document element.
    #[must_use]
    pub fn new(root: H) -> Self {
        Self {
            root: Frame::new(root, 0),
            children: Vec::new(),
            max_depth: MAX_HANDLER_DEPTH,
            root_closed: false,
        }
    }

    /// Override the maximum number of stacked handlers.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of active handlers, the root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children.len() + 1
    }

    /// True once the document element has closed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.root_closed
    }

    fn top_mut(&mut self) -> &mut Frame<H> {
        self.children.last_mut().unwrap_or(&mut self.root)
    }

    /// Dispatch one event.
    pub fn handle_event(&mut self, event: XmlEvent) -> Result<()> {
        match event {
            XmlEvent::Start(tag) => self.start_element(&tag),
            XmlEvent::Text(text) => {
                self.characters(&text);
                Ok(())
            }
            XmlEvent::End(name) => self.end_element(&name),
        }
    }

    /// An element opened.
    pub fn start_element(&mut self, tag: &StartTag) -> Result<()> {
        if self.root_closed {
            return Err(PropertyError::UnexpectedElement {
                tag_name: tag.name.clone(),
                context: "document end".to_string(),
            });
        }

        let delegate = {
            let frame = self.top_mut();
            frame.text.clear();
            let delegate = frame.handler.start_local(tag)?;
            if delegate.is_none() {
                frame.open += 1;
            }
            delegate
        };

        if let Some(child) = delegate {
            if self.depth() >= self.max_depth {
                return Err(PropertyError::NestingTooDeep(self.max_depth));
            }
            tracing::trace!(tag = %tag.name, depth = self.depth(), "Delegating element");
            self.children.push(Frame::new(child, 1));
        }
        Ok(())
    }

    /// Character data for the innermost open element.
    pub fn characters(&mut self, text: &str) {
        self.top_mut().text.push_str(text);
    }

    /// An element closed.
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        let closed = {
            let frame = self.top_mut();
            let text = ElementText::new(std::mem::take(&mut frame.text));
            frame.handler.end_local(name, &text)?;
            frame.open = frame.open.saturating_sub(1);
            frame.open == 0
        };
        if !closed {
            return Ok(());
        }

        match self.children.pop() {
            Some(child) => {
                let parent = self.top_mut();
                parent.text.clear();
                parent.handler.child_finished(child.handler)
            }
            None => {
                self.root_closed = true;
                Ok(())
            }
        }
    }

    /// Return the root handler once the document element has closed.
    ///
    /// # Errors
    /// Returns `UnexpectedEof` if the document element is still open.
    pub fn finish(self) -> Result<H> {
        if self.root_closed {
            Ok(self.root.handler)
        } else {
            Err(PropertyError::UnexpectedEof)
        }
    }
}

/// Run a whole document through a handler stack rooted at `root`.
///
/// The first error aborts the parse; nothing built so far is returned.
pub fn parse_document<H: TagHandler, R: BufRead>(source: R, root: H) -> Result<H> {
    let mut stack = HandlerStack::new(root);
    for event in EventReader::new(source) {
        stack.handle_event(event?)?;
    }
    stack.finish()
}
