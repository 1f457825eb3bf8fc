/// Top-level shapes of a slide's shape tree.
use crate::ooxml::pptx::shapes::placeholder::PlaceholderRef;
use crate::ooxml::pptx::shapes::textframe::{TextFrame, TextFrameMut};
use crate::ooxml::pptx::shapes::xml::XmlElement;
use crate::ooxml::units::Length;
use std::ops::Range;

/// Shape type enumeration.
///
/// Indicates what kind of shape this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// An auto shape or text box (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table or chart (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
    /// An ink or other content part (p:contentPart)
    ContentPart,
}

impl ShapeType {
    /// Map a shape-tree child's local name to its shape type.
    pub fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(Self::Shape),
            b"pic" => Some(Self::Picture),
            b"graphicFrame" => Some(Self::GraphicFrame),
            b"grpSp" => Some(Self::GroupShape),
            b"cxnSp" => Some(Self::Connector),
            b"contentPart" => Some(Self::ContentPart),
            _ => None,
        }
    }
}

/// A shape on a slide.
///
/// Only `p:sp` shapes carry their parsed XML; the others are recorded for
/// their position in the shape tree.
///
/// # Examples
///
/// ```rust,ignore
/// for shape in slide.shapes()? {
///     if let Some(frame) = shape.text_frame() {
///         println!("{}: {}", shape.index(), frame.text()?);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    /// Zero-based position among the shape tree's shapes
    index: usize,
    shape_type: ShapeType,
    /// Byte range of the shape element in the slide XML
    span: Range<usize>,
    element: Option<XmlElement>,
    modified: bool,
}

impl Shape {
    pub(crate) fn new(
        index: usize,
        shape_type: ShapeType,
        span: Range<usize>,
        element: Option<XmlElement>,
    ) -> Self {
        Self {
            index,
            shape_type,
            span,
            element,
            modified: false,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    #[inline]
    pub(crate) fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Whether the shape was changed through [`text_frame_mut`](Self::text_frame_mut).
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Width and height from `<p:spPr><a:xfrm><a:ext cx cy>`.
    ///
    /// Placeholders that inherit their geometry from the layout have none; see
    /// [`PlaceholderGeometry`](super::PlaceholderGeometry).
    pub fn extents(&self) -> Option<(Length, Length)> {
        let ext = self
            .element
            .as_ref()?
            .descendant(&["spPr", "xfrm", "ext"])?;
        let cx = atoi_simd::parse::<i64, false, false>(ext.attr("cx")?.as_bytes()).ok()?;
        let cy = atoi_simd::parse::<i64, false, false>(ext.attr("cy")?.as_bytes()).ok()?;
        Some((Length::emu(cx), Length::emu(cy)))
    }

    /// The `<p:nvPr><p:ph>` reference, for placeholder shapes.
    pub fn placeholder(&self) -> Option<PlaceholderRef> {
        let ph = self
            .element
            .as_ref()?
            .descendant(&["nvSpPr", "nvPr", "ph"])?;
        Some(PlaceholderRef::from_attrs(ph.attr("type"), ph.attr("idx")))
    }

    /// The shape's text frame (`p:txBody`), if it has one.
    pub fn text_frame(&self) -> Option<TextFrame<'_>> {
        self.element
            .as_ref()?
            .child("txBody")
            .map(TextFrame::new)
    }

    /// Mutable access to the text frame; marks the shape as modified.
    pub fn text_frame_mut(&mut self) -> Option<TextFrameMut<'_>> {
        let body = self.element.as_mut()?.child_mut("txBody")?;
        self.modified = true;
        Some(TextFrameMut::new(body))
    }

    /// Serialized shape XML, for shapes that carry a parsed element.
    pub(crate) fn to_xml(&self) -> Option<Vec<u8>> {
        self.element.as_ref().map(XmlElement::to_xml)
    }
}
