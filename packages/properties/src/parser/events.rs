//! Streaming XML events read with `quick_xml`.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{PropertyError, Result};

/// An opening tag with its attributes, namespace prefixes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl StartTag {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get an attribute value, failing with `MissingAttribute` if absent.
    pub fn require_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| PropertyError::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
            })
    }

    /// Build an `UnexpectedElement` error for a child of this element.
    #[must_use]
    pub fn unexpected_child(&self, child: &StartTag) -> PropertyError {
        PropertyError::UnexpectedElement {
            tag_name: child.name.clone(),
            context: self.name.clone(),
        }
    }

    fn from_bytes(start: &BytesStart<'_>) -> std::result::Result<Self, quick_xml::Error> {
        let mut tag = StartTag::new(decode(start.local_name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = decode(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            tag.attributes.push((key, value));
        }
        Ok(tag)
    }
}

/// A SAX-style event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element opened. Self-closing elements produce `Start` then `End`.
    Start(StartTag),
    /// Character data, unescaped. CDATA sections are reported as text.
    Text(String),
    /// An element closed.
    End(String),
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Iterator over the events of an XML document.
///
/// Declarations, comments, processing instructions and doctypes are
/// skipped. The first error ends the iteration.
pub struct EventReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> EventReader<R> {
    #[must_use]
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        config.check_end_names = true;
        Self {
            reader,
            buf: Vec::new(),
            finished: false,
        }
    }

    /// Syntax errors carry their own position; decoding errors only have
    /// the reader's current offset.
    fn xml_error(&mut self, source: quick_xml::Error) -> PropertyError {
        self.finished = true;
        let position = match self.reader.error_position() {
            0 => self.reader.buffer_position(),
            position => position,
        };
        PropertyError::XmlParse { position, source }
    }
}

impl<'a> EventReader<&'a [u8]> {
    /// Read events from an in-memory document.
    #[must_use]
    pub fn from_xml_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<XmlEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            self.buf.clear();
            let outcome = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(start)) => StartTag::from_bytes(&start).map(XmlEvent::Start),
                Ok(Event::End(end)) => {
                    let name = decode(end.local_name().as_ref()).into_owned();
                    Ok(XmlEvent::End(name))
                }
                Ok(Event::Text(text)) => text.unescape().map(|t| XmlEvent::Text(t.into_owned())),
                Ok(Event::CData(cdata)) => {
                    let text = decode(&cdata.into_inner()).into_owned();
                    Ok(XmlEvent::Text(text))
                }
                Ok(Event::Eof) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => continue,
                Err(source) => Err(source),
            };
            return Some(outcome.map_err(|source| self.xml_error(source)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn events(xml: &str) -> Vec<XmlEvent> {
        EventReader::from_xml_str(xml)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_start_text_end() {
        let got = events(r#"<?xml version="1.0"?><a x="1"><!-- c -->hi &amp; bye</a>"#);
        assert_eq!(
            got,
            vec![
                XmlEvent::Start(StartTag::new("a").with_attribute("x", "1")),
                XmlEvent::Text("hi & bye".to_string()),
                XmlEvent::End("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_self_closing_expands() {
        let got = events("<a><b/></a>");
        assert_eq!(
            got,
            vec![
                XmlEvent::Start(StartTag::new("a")),
                XmlEvent::Start(StartTag::new("b")),
                XmlEvent::End("b".to_string()),
                XmlEvent::End("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_cdata_is_text() {
        let got = events("<a><![CDATA[<raw>]]></a>");
        assert_eq!(got[1], XmlEvent::Text("<raw>".to_string()));
    }

    #[test]
    fn test_mismatched_end_is_error() {
        let result: Result<Vec<_>> = EventReader::from_xml_str("<a><b></a>").collect();
        let err = result.unwrap_err();
        assert_eq!(err.message_key(), "ej.xml.parse_failed");
    }

    #[test]
    fn test_decoding_error_reports_offset() {
        let xml: &[u8] = b"<root><property>ok\xff\xfe</property></root>";
        let result: Result<Vec<_>> = EventReader::new(xml).collect();

        match result.unwrap_err() {
            PropertyError::XmlParse { position, .. } => assert!(position > 0),
            other => panic!("expected XmlParse, got {other:?}"),
        }
    }

    #[test]
    fn test_require_attribute() {
        let tag = StartTag::new("property").with_attribute("name", "xpos");
        assert_eq!(tag.require_attribute("name").unwrap(), "xpos");
        assert!(matches!(
            tag.require_attribute("propertyType"),
            Err(PropertyError::MissingAttribute { element, attribute })
                if element == "property" && attribute == "propertyType"
        ));
    }
}
