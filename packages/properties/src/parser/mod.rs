//! Event-driven XML parsing with delegating tag handlers.
//!
//! Documents are read as a stream of SAX-style events. A stack of
//! [`TagHandler`]s consumes them: every handler owns one element and may
//! delegate nested elements to child handlers, so no handler needs to know
//! the shape of the elements beneath the ones it owns.

mod events;
mod handler;
mod stack;

pub use events::{EventReader, StartTag, XmlEvent};
pub use handler::{ElementText, TagHandler};
pub use stack::{parse_document, HandlerStack};
