//! Push-style XML event driver.
//!
//! [`EventDriver`] walks a document once with a namespace-aware `quick-xml`
//! reader and calls back into a [`ContentHandler`] for every element open,
//! run of character data, and element close. Names arrive already resolved
//! to (namespace URI, local name) pairs.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::ParseError;

/// A namespace-resolved element or attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    /// Namespace URI, `None` when the name is not in any namespace
    pub namespace: Option<String>,
    /// Local part of the name
    pub local_name: String,
}

impl XmlName {
    /// Whether this name has the given namespace and local name
    pub fn is(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local_name == local_name
    }
}

/// A resolved attribute with its unescaped value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Attribute name
    pub name: XmlName,
    /// Unescaped value
    pub value: String,
}

/// An element-open event with all of its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement {
    /// Element name
    pub name: XmlName,
    /// Attributes in document order, namespace declarations excluded
    pub attributes: Vec<XmlAttribute>,
}

impl StartElement {
    /// Value of the attribute with the given namespace and local name
    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(namespace, local_name))
            .map(|a| a.value.as_str())
    }
}

/// Receiver of document events
pub trait ContentHandler {
    /// Called once before the first event
    fn start_document(&mut self) -> Result<(), ParseError> {
        Ok(())
    }

    /// An element was opened
    fn start_element(&mut self, element: &StartElement) -> Result<(), ParseError>;

    /// Character data (text or CDATA) inside the current element
    fn characters(&mut self, text: &str) -> Result<(), ParseError>;

    /// An element was closed; empty elements produce an open and a close
    fn end_element(&mut self, name: &XmlName) -> Result<(), ParseError>;

    /// Called once after the root element closed
    fn end_document(&mut self) -> Result<(), ParseError> {
        Ok(())
    }
}

/// Drives a [`ContentHandler`] over one document
pub struct EventDriver<R: BufRead> {
    reader: NsReader<R>,
}

impl<R: BufRead> EventDriver<R> {
    /// Create a driver over a buffered source
    pub fn new(reader: R) -> Self {
        // Text is passed on untrimmed; handlers trim whole field values
        Self {
            reader: NsReader::from_reader(reader),
        }
    }

    /// Read the whole document, forwarding every event to `handler`
    ///
    /// The first error, whether from the XML reader or the handler, stops
    /// the walk and is returned.
    pub fn run<H: ContentHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), ParseError> {
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;

        handler.start_document()?;
        loop {
            let (ns, event) = self.reader.read_resolved_event_into(&mut buf)?;
            let namespace = namespace_uri(ns)?;
            match event {
                Event::Start(ref e) => {
                    check_single_root(seen_root, depth)?;
                    depth += 1;
                    seen_root = true;
                    let element = self.start_element(namespace, e)?;
                    handler.start_element(&element)?;
                }
                Event::Empty(ref e) => {
                    check_single_root(seen_root, depth)?;
                    seen_root = true;
                    let element = self.start_element(namespace, e)?;
                    handler.start_element(&element)?;
                    handler.end_element(&element.name)?;
                }
                Event::End(ref e) => {
                    depth = depth.saturating_sub(1);
                    let name = XmlName {
                        namespace,
                        local_name: utf8(e.local_name().as_ref())?,
                    };
                    handler.end_element(&name)?;
                }
                Event::Text(ref t) => {
                    if depth > 0 {
                        handler.characters(&t.unescape()?)?;
                    } else {
                        check_outside_text(t)?;
                    }
                }
                Event::CData(ref c) => {
                    if depth > 0 {
                        handler.characters(std::str::from_utf8(c)?)?;
                    } else {
                        return Err(outside_root());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        check_complete(seen_root, depth)?;
        handler.end_document()
    }

    fn start_element(
        &self,
        namespace: Option<String>,
        e: &BytesStart<'_>,
    ) -> Result<StartElement, ParseError> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let (ns, local) = self.reader.resolve_attribute(attr.key);
            attributes.push(XmlAttribute {
                name: XmlName {
                    namespace: namespace_uri(ns)?,
                    local_name: utf8(local.as_ref())?,
                },
                value: attr.unescape_value()?.into_owned(),
            });
        }

        Ok(StartElement {
            name: XmlName {
                namespace,
                local_name: utf8(e.local_name().as_ref())?,
            },
            attributes,
        })
    }
}

/// Turn a resolved namespace into an owned URI
pub(crate) fn namespace_uri(ns: ResolveResult<'_>) -> Result<Option<String>, ParseError> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(utf8(uri)?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

pub(crate) fn utf8(bytes: &[u8]) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}

/// Reject an element that starts after the root element closed
pub(crate) fn check_single_root(seen_root: bool, depth: usize) -> Result<(), ParseError> {
    if seen_root && depth == 0 {
        return Err(ParseError::InvalidStructure(
            "more than one root element".to_string(),
        ));
    }
    Ok(())
}

/// Only whitespace may appear outside the root element
pub(crate) fn check_outside_text(raw: &[u8]) -> Result<(), ParseError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        Ok(())
    } else {
        Err(outside_root())
    }
}

pub(crate) fn outside_root() -> ParseError {
    ParseError::InvalidStructure("text outside the root element".to_string())
}

/// Reject documents that end early or never open a root element
pub(crate) fn check_complete(seen_root: bool, depth: usize) -> Result<(), ParseError> {
    if !seen_root {
        return Err(ParseError::InvalidStructure(
            "document has no root element".to_string(),
        ));
    }
    if depth > 0 {
        return Err(ParseError::InvalidStructure(format!(
            "document ended with {} unclosed element(s)",
            depth
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl ContentHandler for Recorder {
        fn start_element(&mut self, element: &StartElement) -> Result<(), ParseError> {
            let attrs: Vec<_> = element
                .attributes
                .iter()
                .map(|a| format!("{}={}", a.name.local_name, a.value))
                .collect();
            self.log.push(format!(
                "start {:?} {} [{}]",
                element.name.namespace,
                element.name.local_name,
                attrs.join(",")
            ));
            Ok(())
        }

        fn characters(&mut self, text: &str) -> Result<(), ParseError> {
            self.log.push(format!("text {}", text));
            Ok(())
        }

        fn end_element(&mut self, name: &XmlName) -> Result<(), ParseError> {
            self.log.push(format!("end {}", name.local_name));
            Ok(())
        }
    }

    #[test]
    fn test_event_sequence() {
        let xml = r#"<root xmlns:f="urn:f"><f:a k="v &amp; w">x</f:a><b/></root>"#;
        let mut recorder = Recorder::default();
        EventDriver::new(xml.as_bytes()).run(&mut recorder).unwrap();

        assert_eq!(
            recorder.log,
            vec![
                "start None root []",
                "start Some(\"urn:f\") a [k=v & w]",
                "text x",
                "end a",
                "start None b []",
                "end b",
                "end root",
            ]
        );
    }

    #[test]
    fn test_resolved_attribute_lookup() {
        let xml = r#"<r xmlns:p="urn:p" p:x="1" x="2"/>"#;
        struct Check;
        impl ContentHandler for Check {
            fn start_element(&mut self, element: &StartElement) -> Result<(), ParseError> {
                assert_eq!(element.attribute(Some("urn:p"), "x"), Some("1"));
                assert_eq!(element.attribute(None, "x"), Some("2"));
                assert_eq!(element.attributes.len(), 2);
                Ok(())
            }
            fn characters(&mut self, _text: &str) -> Result<(), ParseError> {
                Ok(())
            }
            fn end_element(&mut self, _name: &XmlName) -> Result<(), ParseError> {
                Ok(())
            }
        }
        EventDriver::new(xml.as_bytes()).run(&mut Check).unwrap();
    }

    #[test]
    fn test_incomplete_documents() {
        let mut recorder = Recorder::default();
        let err = EventDriver::new("".as_bytes()).run(&mut recorder).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure(_)));

        let mut recorder = Recorder::default();
        let err = EventDriver::new("<a><b></b>".as_bytes())
            .run(&mut recorder)
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure(_) | ParseError::XmlError(_)));
    }

    #[test]
    fn test_content_after_root() {
        for xml in ["<a/><b/>", "<a></a><a></a>", "<a/>junk", "<a/><![CDATA[x]]>", "text<a/>"] {
            let mut recorder = Recorder::default();
            let err = EventDriver::new(xml.as_bytes())
                .run(&mut recorder)
                .unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidStructure(_) | ParseError::XmlError(_)),
                "{} accepted",
                xml
            );
        }

        let mut recorder = Recorder::default();
        EventDriver::new("<?xml version=\"1.0\"?>\n<a/>\n<!-- done -->\n".as_bytes())
            .run(&mut recorder)
            .unwrap();
        assert_eq!(recorder.log, vec!["start None a []", "end a"]);
    }

    #[test]
    fn test_undeclared_prefix() {
        let mut recorder = Recorder::default();
        let err = EventDriver::new("<x:a/>".as_bytes())
            .run(&mut recorder)
            .unwrap_err();
        assert!(matches!(err, ParseError::UnboundPrefix(_)));
    }
}
