//! Office Open XML (OOXML) support for PowerPoint templates.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **Shared Utilities** (`units`, `error`): EMU lengths and error types
//! 3. **PresentationML** (`pptx`): presentation, slides and shape text frames
//!
//! # Example
//!
//! ```rust,no_run
//! use contextmap::ooxml::pptx::Package;
//!
//! let pkg = Package::open("template.pptx")?;
//! let pres = pkg.presentation()?;
//! println!("Template has {} slides", pres.slide_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;
pub mod units;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
pub use units::Length;
