//! Open Packaging Conventions (OPC) implementation.
//!
//! The subset of OPC a .pptx template pass needs:
//!
//! - Package structure (parts, relationships)
//! - Content type lookup
//! - ZIP-based physical packaging that preserves member order on save
//!
//! Uses `quick-xml` for streaming parsing of `[Content_Types].xml` and `.rels`
//! parts and the `zip` crate for the container.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
