//! Deterministic XML output.
//!
//! Thin wrapper over `quick_xml::Writer` that keeps the writers honest
//! about the fixed conventions: tab indentation, attributes in the order
//! pushed, self-closing form for childless elements.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, Result};

/// Ordered attribute list for one element.
///
/// Writers push family attributes first, then `id`, `image`, `portrait`;
/// default-valued attributes are simply never pushed.
#[derive(Debug, Default)]
pub struct Attrs(Vec<(&'static str, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl ToString) {
        self.0.push((name, value.to_string()));
    }

    pub fn push_opt(&mut self, name: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.0.push((name, value.to_owned()));
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// Streaming writer for one document.
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b'\t', 1),
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Write(e.to_string()))
    }

    /// The XML declaration; written once at the top of a document.
    pub fn declaration(&mut self) -> Result<()> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
    }

    fn build(tag: &str, attrs: &Attrs) -> BytesStart<'static> {
        let mut element = BytesStart::new(tag.to_owned());
        for (name, value) in attrs.entries() {
            element.push_attribute((name, value));
        }
        element
    }

    /// A self-closing element.
    pub fn empty(&mut self, tag: &str, attrs: &Attrs) -> Result<()> {
        self.emit(Event::Empty(Self::build(tag, attrs)))
    }

    /// An opening tag; must be paired with [`XmlSink::end`].
    pub fn start(&mut self, tag: &str, attrs: &Attrs) -> Result<()> {
        self.emit(Event::Start(Self::build(tag, attrs)))
    }

    pub fn end(&mut self, tag: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(tag.to_owned())))
    }

    /// Escaped text content.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.emit(Event::Text(BytesText::new(text)))
    }

    /// Start or empty depending on whether children will follow.
    pub fn element(&mut self, tag: &str, attrs: &Attrs, has_children: bool) -> Result<()> {
        if has_children {
            self.start(tag, attrs)
        } else {
            self.empty(tag, attrs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut XmlSink<&mut Vec<u8>>)) -> String {
        let mut out = Vec::new();
        {
            let mut sink = XmlSink::new(&mut out);
            f(&mut sink);
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn attributes_keep_push_order() {
        let output = render(|sink| {
            let mut attrs = Attrs::new();
            attrs.push("kind", "gold");
            attrs.push("status", "active");
            attrs.push("id", 5);
            sink.empty("mine", &attrs).unwrap();
        });
        assert_eq!(output, "<mine kind=\"gold\" status=\"active\" id=\"5\"/>");
    }

    #[test]
    fn optional_attributes_are_omitted() {
        let output = render(|sink| {
            let mut attrs = Attrs::new();
            attrs.push("id", 1);
            attrs.push_opt("image", None);
            sink.empty("hill", &attrs).unwrap();
        });
        assert_eq!(output, "<hill id=\"1\"/>");
    }

    #[test]
    fn text_is_escaped() {
        let output = render(|sink| {
            sink.start("text", &Attrs::new()).unwrap();
            sink.text("fish & chips").unwrap();
            sink.end("text").unwrap();
        });
        assert_eq!(output, "<text>fish &amp; chips</text>");
    }
}
