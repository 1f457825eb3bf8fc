/// Parts for PowerPoint presentation documents.
///
/// Wrapper types over the XML of the parts a template pass reads and rewrites.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::SlidePart;
