//! Owned element tree for a single shape's XML.
//!
//! Slides are streamed with quick-xml; only the subtree of a shape that may be
//! rewritten is materialized here. Attribute values and text are kept in their
//! escaped (raw) form so an untouched subtree serializes back to equivalent
//! markup.

use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A node inside an element.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Escaped character data
    Text(String),
    /// Comment body, written back as `<!--...-->`
    Comment(String),
}

/// An XML element with its qualified name, raw attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element with a qualified name such as `a:pPr`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Read the subtree opened by `start` from `reader`, consuming events up to
    /// and including the matching end tag.
    pub fn read_subtree(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Self> {
        let mut root = Self::from_start(start)?;
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            let current = stack.last_mut().unwrap_or(&mut root);
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(Self::from_start(&e)?);
                },
                Ok(Event::Empty(e)) => {
                    let element = Self::from_start(&e)?;
                    current.children.push(XmlNode::Element(element));
                },
                Ok(Event::End(_)) => match stack.pop() {
                    Some(done) => {
                        let parent = stack.last_mut().unwrap_or(&mut root);
                        parent.children.push(XmlNode::Element(done));
                    },
                    None => return Ok(root),
                },
                Ok(Event::Text(e)) => {
                    current.push_raw_text(std::str::from_utf8(e.as_ref())?);
                },
                Ok(Event::GeneralRef(e)) => {
                    let name = std::str::from_utf8(e.as_ref())?;
                    current.push_raw_text(&format!("&{};", name));
                },
                Ok(Event::CData(e)) => {
                    let text = std::str::from_utf8(e.as_ref())?;
                    current.push_raw_text(&quick_xml::escape::escape(text));
                },
                Ok(Event::Comment(e)) => {
                    let body = std::str::from_utf8(e.as_ref())?.to_string();
                    current.children.push(XmlNode::Comment(body));
                },
                Ok(Event::Eof) => {
                    return Err(OoxmlError::Xml(format!(
                        "Unexpected end of document inside <{}>",
                        root.name
                    )));
                },
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let mut element = Self::new(std::str::from_utf8(e.name().as_ref())?);
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = std::str::from_utf8(&attr.value)?;
            element.attrs.push((key.to_string(), value.to_string()));
        }
        Ok(element)
    }

    fn push_raw_text(&mut self, raw: &str) {
        if let Some(XmlNode::Text(text)) = self.children.last_mut() {
            text.push_str(raw);
        } else {
            self.children.push(XmlNode::Text(raw.to_string()));
        }
    }

    /// Qualified name, e.g. `a:bodyPr`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix, e.g. `bodyPr`.
    #[inline]
    pub fn local_name(&self) -> &str {
        self.name.rsplit_once(':').map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Namespace prefix including the colon (`a:`), or empty.
    pub fn prefix(&self) -> &str {
        self.name.rsplit_once(':').map_or("", |(prefix, _)| &self.name[..prefix.len() + 1])
    }

    /// Raw (escaped) attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position when it already exists.
    ///
    /// `value` is written as-is and must already be escaped.
    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((key.to_string(), value.to_string())),
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Iterate over child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.local_name() == local_name)
    }

    /// Mutable first child element with the given local name.
    pub fn child_mut(&mut self, local_name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(e) if e.local_name() == local_name => Some(e),
            _ => None,
        })
    }

    /// Position of the first child element with the given local name.
    pub fn child_position(&self, local_name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.local_name() == local_name))
    }

    /// Follow a chain of local names down the tree.
    pub fn descendant(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |element, name| element.child(name))
    }

    /// Remove every child element whose local name is in `local_names`.
    pub fn remove_children(&mut self, local_names: &[&str]) {
        self.children.retain(
            |node| !matches!(node, XmlNode::Element(e) if local_names.contains(&e.local_name())),
        );
    }

    /// Insert a child element at `index` (clamped to the child count).
    pub fn insert_child(&mut self, index: usize, element: XmlElement) {
        let index = index.min(self.children.len());
        self.children.insert(index, XmlNode::Element(element));
    }

    pub fn push_child(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Unescaped concatenation of the direct text children.
    pub fn text(&self) -> Result<String> {
        let mut text = String::new();
        for node in &self.children {
            if let XmlNode::Text(raw) = node {
                text.push_str(&quick_xml::escape::unescape(raw)?);
            }
        }
        Ok(text)
    }

    /// Replace all children with a single text node; `text` is escaped here.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children
                .push(XmlNode::Text(quick_xml::escape::escape(text).into_owned()));
        }
    }

    /// Serialize this element and its subtree.
    pub fn to_xml(&self) -> Vec<u8> {
        let mut xml = Vec::with_capacity(256);
        self.write_to(&mut xml);
        xml
    }

    fn write_to(&self, xml: &mut Vec<u8>) {
        xml.push(b'<');
        xml.extend_from_slice(self.name.as_bytes());
        for (key, value) in &self.attrs {
            xml.push(b' ');
            xml.extend_from_slice(key.as_bytes());
            xml.extend_from_slice(b"=\"");
            // Values read from single-quoted attributes may hold a bare quote
            xml.extend_from_slice(value.replace('"', "&quot;").as_bytes());
            xml.push(b'"');
        }

        if self.children.is_empty() {
            xml.extend_from_slice(b"/>");
            return;
        }

        xml.push(b'>');
        for node in &self.children {
            match node {
                XmlNode::Element(e) => e.write_to(xml),
                XmlNode::Text(raw) => xml.extend_from_slice(raw.as_bytes()),
                XmlNode::Comment(body) => {
                    xml.extend_from_slice(b"<!--");
                    xml.extend_from_slice(body.as_bytes());
                    xml.extend_from_slice(b"-->");
                },
            }
        }
        xml.extend_from_slice(b"</");
        xml.extend_from_slice(self.name.as_bytes());
        xml.push(b'>');
    }
}
