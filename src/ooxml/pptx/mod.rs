//! PowerPoint (.pptx) presentation support.
//!
//! - `Package`: the .pptx file package
//! - `Presentation`: the slide list in presentation order
//! - `SlidePart`: a slide's top-level shapes, with in-place rewriting
//! - `shapes`: shapes and their text frames
//!
//! # Example
//!
//! ```rust,ignore
//! use contextmap::ooxml::pptx::Package;
//!
//! let mut package = Package::open("template.pptx")?;
//! let pres = package.presentation()?;
//!
//! for partname in pres.slide_partnames() {
//!     let slide = package.slide(partname)?;
//!     let mut shapes = slide.shapes()?;
//!     // ... edit text frames ...
//!     let xml = slide.splice(&shapes);
//!     package.set_slide_xml(partname, xml)?;
//! }
//! ```
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;

pub use package::Package;
pub use parts::{PresentationPart, SlidePart};
pub use presentation::Presentation;
pub use shapes::{Shape, ShapeType, TextFrame};
