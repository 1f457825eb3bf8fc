/// Shapes on PowerPoint slides.
///
/// A slide's shape tree is walked once; each top-level `p:sp` keeps its XML
/// as an owned [`XmlElement`] so its text frame can be read and rewritten,
/// and all other shapes are recorded only for their position.
pub mod base;
pub mod placeholder;
pub mod textframe;
pub mod xml;

pub use base::{Shape, ShapeType};
pub use placeholder::{PlaceholderGeometry, PlaceholderRef};
pub use textframe::{BodyLayout, Paragraph, TextFrame, TextFrameMut, VERTICAL_TAB};
pub use xml::{XmlElement, XmlNode};
