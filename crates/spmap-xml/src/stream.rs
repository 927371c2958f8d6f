//! Pull-based XML event stream with line tracking and namespace tolerance.
//!
//! Wraps a `quick_xml::Reader` and converts borrowed events into owned
//! [`Node`]s so element readers can hold an [`Element`] while continuing
//! to pull child events. Self-closing elements are delivered as a start
//! node followed by a synthesized end node, so every start has a matching
//! end and recursive descent never special-cases the empty form.

use std::io::BufRead;

use memchr::memchr_iter;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use rustc_hash::FxHashSet;

use crate::{Error, ParseContext, Result, Warning};

/// The format's namespace URI. Tags and attributes are accepted both in
/// this namespace and unprefixed, to tolerate hand-edited files.
pub const SP_NAMESPACE: &str = "https://spmap.dev/schema/v2";

/// Tags reserved for forward compatibility: where a child element would
/// otherwise be rejected, these are warned about and skipped instead.
pub const FUTURE_TAGS: &[&str] = &["future"];

/// An attribute of an [`Element`], already decoded.
///
/// Namespace declarations and attributes under unrecognized prefixes are
/// filtered out before this point.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Local name.
    pub name: String,
    pub value: String,
    /// True when the attribute carried a prefix bound to the format
    /// namespace; lookup prefers these over unprefixed ones.
    pub prefixed: bool,
}

/// An owned start tag: name, decoded attributes, and source position.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    prefix: Option<String>,
    pub attributes: Vec<Attribute>,
    /// 1-based line of the start tag.
    pub line: u64,
    namespaced: bool,
}

impl Element {
    /// The local tag name.
    pub fn tag(&self) -> &str {
        &self.name
    }

    /// The namespace prefix as written, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Whether the tag is unprefixed or its prefix is bound to the format
    /// namespace.
    pub fn in_supported_namespace(&self) -> bool {
        self.namespaced
    }

    /// Tag-name check that also requires a supported namespace.
    pub fn is(&self, tag: &str) -> bool {
        self.namespaced && self.name == tag
    }

    /// Builds an element by hand; used by tests.
    #[cfg(test)]
    pub(crate) fn synthetic(name: &str, attributes: Vec<(&str, &str)>) -> Self {
        Self {
            name: name.to_owned(),
            prefix: None,
            attributes: attributes
                .into_iter()
                .map(|(name, value)| Attribute {
                    name: name.to_owned(),
                    value: value.to_owned(),
                    prefixed: false,
                })
                .collect(),
            line: 1,
            namespaced: true,
        }
    }
}

/// One owned event from the stream.
#[derive(Debug)]
pub enum Node {
    Start(Element),
    /// End tag, by local name. Synthesized for self-closing elements.
    End(String),
    Text(String),
    Eof,
}

/// Asserts that an element is one of a family's accepted tags.
pub fn expect_tag(element: &Element, allowed: &[&str]) -> Result<()> {
    if element.in_supported_namespace() && allowed.contains(&element.tag()) {
        Ok(())
    } else {
        Err(Error::UnsupportedTag {
            tag: element.tag().to_owned(),
            line: element.line,
        })
    }
}

/// Forward-only event stream over one document.
pub struct XmlSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    line: u64,
    pending_end: Option<String>,
    /// Prefixes bound to [`SP_NAMESPACE`]. Pre-seeded with `sp` so files
    /// that use the conventional prefix without declaring it still parse.
    prefixes: FxHashSet<String>,
}

impl<R: BufRead> XmlSource<R> {
    pub fn new(input: R) -> Self {
        let mut prefixes = FxHashSet::default();
        prefixes.insert("sp".to_owned());
        Self {
            reader: Reader::from_reader(input),
            buf: Vec::new(),
            line: 1,
            pending_end: None,
            prefixes,
        }
    }

    /// The next owned event. Declarations, comments, and processing
    /// instructions are consumed silently (their newlines still count).
    pub fn next_node(&mut self) -> Result<Node> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Node::End(name));
        }
        loop {
            self.buf.clear();
            let line = self.line;
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| Error::MalformedXml {
                    detail: e.to_string(),
                    line,
                })?
                .into_owned();
            let newlines = memchr_iter(b'\n', &self.buf).count() as u64;
            match event {
                Event::Start(ref e) => {
                    let element = element_from(&mut self.prefixes, line, e)?;
                    self.line += newlines;
                    return Ok(Node::Start(element));
                }
                Event::Empty(ref e) => {
                    let element = element_from(&mut self.prefixes, line, e)?;
                    self.line += newlines;
                    self.pending_end = Some(element.tag().to_owned());
                    return Ok(Node::Start(element));
                }
                Event::End(ref e) => {
                    let name = local_part(e.name());
                    self.line += newlines;
                    return Ok(Node::End(name));
                }
                Event::Text(ref t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::MalformedXml {
                            detail: e.to_string(),
                            line,
                        })?
                        .into_owned();
                    self.line += newlines;
                    return Ok(Node::Text(text));
                }
                Event::CData(t) => {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    self.line += newlines;
                    return Ok(Node::Text(text));
                }
                Event::Eof => return Ok(Node::Eof),
                _ => {
                    self.line += newlines;
                }
            }
        }
    }

    /// Bounded lookahead: the next start element in the current scope, or
    /// `None` when the scope (or document) ends first. Text is skipped.
    pub fn next_start(&mut self) -> Result<Option<Element>> {
        loop {
            match self.next_node()? {
                Node::Start(element) => return Ok(Some(element)),
                Node::End(_) | Node::Eof => return Ok(None),
                Node::Text(_) => {}
            }
        }
    }

    /// Consumes events up to the matching end tag of an already-consumed
    /// start tag, ignoring everything in between.
    pub fn skip_subtree(&mut self, element: &Element) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_node()? {
                Node::Start(_) => depth += 1,
                Node::End(name) => {
                    if depth == 0 {
                        debug_assert_eq!(name, element.tag());
                        return Ok(());
                    }
                    depth -= 1;
                }
                Node::Text(_) => {}
                Node::Eof => {
                    return Err(Error::UnexpectedEof {
                        tag: element.tag().to_owned(),
                    })
                }
            }
        }
    }

    /// Spins to the matching end tag of a leaf element, rejecting any
    /// child start tag in a supported namespace. Future tags are warned
    /// about and skipped instead of rejected.
    pub fn spin_to_end(&mut self, element: &Element, ctx: &mut ParseContext) -> Result<()> {
        loop {
            match self.next_node()? {
                Node::Start(child) => self.reject_child(element, child, "no children", ctx)?,
                Node::End(name) if name == element.tag() => return Ok(()),
                Node::End(_) | Node::Text(_) => {}
                Node::Eof => {
                    return Err(Error::UnexpectedEof {
                        tag: element.tag().to_owned(),
                    })
                }
            }
        }
    }

    /// Collects the trimmed text content of an element, rejecting child
    /// elements the same way [`XmlSource::spin_to_end`] does.
    pub fn text_content(&mut self, element: &Element, ctx: &mut ParseContext) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_node()? {
                Node::Text(t) => text.push_str(&t),
                Node::Start(child) => self.reject_child(element, child, "text content", ctx)?,
                Node::End(name) if name == element.tag() => return Ok(text.trim().to_owned()),
                Node::End(_) => {}
                Node::Eof => {
                    return Err(Error::UnexpectedEof {
                        tag: element.tag().to_owned(),
                    })
                }
            }
        }
    }

    /// Shared "unwanted child" handling: foreign-namespace children are
    /// skipped silently, future tags with a warning, anything else fails.
    pub fn reject_child(
        &mut self,
        parent: &Element,
        child: Element,
        expected: &str,
        ctx: &mut ParseContext,
    ) -> Result<()> {
        if !child.in_supported_namespace() {
            return self.skip_subtree(&child);
        }
        if FUTURE_TAGS.contains(&child.tag()) {
            ctx.warner.handle(Warning::FutureTag {
                tag: child.tag().to_owned(),
                line: child.line,
            })?;
            return self.skip_subtree(&child);
        }
        Err(Error::UnwantedChild {
            parent: parent.tag().to_owned(),
            child: child.tag().to_owned(),
            expected: expected.to_owned(),
            line: child.line,
        })
    }
}

fn local_part(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

fn prefix_part(name: QName<'_>) -> Option<String> {
    name.prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
}

fn element_from(
    prefixes: &mut FxHashSet<String>,
    line: u64,
    e: &BytesStart<'_>,
) -> Result<Element> {
    let malformed = |detail: String| Error::MalformedXml { detail, line };

    // First pass: namespace declarations, which may appear after the
    // attributes that use them.
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(err.to_string()))?;
        let prefix = prefix_part(attr.key);
        let local = local_part(attr.key);
        if prefix.as_deref() == Some("xmlns") {
            let value = String::from_utf8_lossy(&attr.value);
            if value == SP_NAMESPACE {
                prefixes.insert(local);
            }
        }
    }

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(err.to_string()))?;
        let prefix = prefix_part(attr.key);
        let local = local_part(attr.key);
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(err.to_string()))?
            .into_owned();
        match prefix.as_deref() {
            // Declarations were handled above; a bare `xmlns` sets the
            // default namespace, which is always tolerated.
            Some("xmlns") => {}
            None if local == "xmlns" => {}
            Some(p) if prefixes.contains(p) => attributes.push(Attribute {
                name: local,
                value,
                prefixed: true,
            }),
            // Attribute in an unrecognized namespace: invisible to the
            // accessor layer and to unknown-attribute warnings.
            Some(_) => {}
            None => attributes.push(Attribute {
                name: local,
                value,
                prefixed: false,
            }),
        }
    }

    let prefix = prefix_part(e.name());
    let namespaced = match prefix.as_deref() {
        None => true,
        Some(p) => prefixes.contains(p),
    };
    Ok(Element {
        name: local_part(e.name()),
        prefix,
        attributes,
        line,
        namespaced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(xml: &str) -> XmlSource<&[u8]> {
        XmlSource::new(xml.as_bytes())
    }

    #[test]
    fn empty_elements_get_synthesized_ends() {
        let mut src = source("<tile row=\"0\" column=\"0\"/>");
        let Node::Start(element) = src.next_node().unwrap() else {
            panic!("expected start");
        };
        assert_eq!(element.tag(), "tile");
        assert!(matches!(src.next_node().unwrap(), Node::End(name) if name == "tile"));
        assert!(matches!(src.next_node().unwrap(), Node::Eof));
    }

    #[test]
    fn line_numbers_track_newlines() {
        let mut src = source("<map>\n\t<row>\n\t\t<tile/>\n\t</row>\n</map>");
        let Node::Start(map) = src.next_node().unwrap() else {
            panic!()
        };
        assert_eq!(map.line, 1);
        loop {
            match src.next_node().unwrap() {
                Node::Start(e) if e.tag() == "tile" => {
                    assert_eq!(e.line, 3);
                    break;
                }
                Node::Eof => panic!("tile not found"),
                _ => {}
            }
        }
    }

    #[test]
    fn sp_prefix_is_recognized_without_declaration() {
        let mut src = source("<sp:map sp:rows=\"1\"/>");
        let Node::Start(element) = src.next_node().unwrap() else {
            panic!()
        };
        assert!(element.in_supported_namespace());
        assert!(element.is("map"));
        assert!(element.attributes[0].prefixed);
    }

    #[test]
    fn declared_prefix_becomes_recognized() {
        let xml = format!("<m:map xmlns:m=\"{}\" rows=\"1\"/>", SP_NAMESPACE);
        let mut src = source(&xml);
        let Node::Start(element) = src.next_node().unwrap() else {
            panic!()
        };
        assert!(element.in_supported_namespace());
    }

    #[test]
    fn foreign_prefix_is_not_recognized() {
        let mut src = source("<html:div/>");
        let Node::Start(element) = src.next_node().unwrap() else {
            panic!()
        };
        assert!(!element.in_supported_namespace());
    }

    #[test]
    fn skip_subtree_consumes_nested_content() {
        let mut src = source("<future><deep><deeper/></deep>text</future><next/>");
        let Node::Start(future) = src.next_node().unwrap() else {
            panic!()
        };
        src.skip_subtree(&future).unwrap();
        let Node::Start(next) = src.next_node().unwrap() else {
            panic!()
        };
        assert_eq!(next.tag(), "next");
    }

    #[test]
    fn spin_to_end_rejects_unexpected_children() {
        let mut src = source("<hill><boulder/></hill>");
        let mut ctx = ParseContext::permissive();
        let Node::Start(hill) = src.next_node().unwrap() else {
            panic!()
        };
        let result = src.spin_to_end(&hill, &mut ctx);
        assert!(matches!(result, Err(Error::UnwantedChild { .. })));
    }

    #[test]
    fn spin_to_end_skips_future_tags_with_warning() {
        let mut src = source("<hill><future kind=\"x\"/></hill>");
        let mut ctx = ParseContext::permissive();
        let Node::Start(hill) = src.next_node().unwrap() else {
            panic!()
        };
        src.spin_to_end(&hill, &mut ctx).unwrap();
        assert!(matches!(
            ctx.warner.recorded(),
            [Warning::FutureTag { .. }]
        ));
    }

    #[test]
    fn text_content_is_trimmed() {
        let mut src = source("<text turn=\"3\">\n\tsome note\n</text>");
        let mut ctx = ParseContext::permissive();
        let Node::Start(text) = src.next_node().unwrap() else {
            panic!()
        };
        assert_eq!(src.text_content(&text, &mut ctx).unwrap(), "some note");
    }
}
