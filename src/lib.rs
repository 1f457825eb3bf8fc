//! contextmap - populate a context-map presentation template from JSON data.
//!
//! The template's shapes carry short placeholder tokens (`企業`, `あ`, `十一`,
//! ...). Each token is looked up in a [`PlaceholderMap`] built from the data
//! file and the company name; matching shapes get the replacement text,
//! line-broken and shrunk to fit.
//!
//! # Example
//!
//! ```no_run
//! use contextmap::config::Settings;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = contextmap::pipeline::run(&Settings::default(), "株式会社サンプル")?;
//! println!("{} shapes replaced", report.total());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`ooxml`]: the .pptx package, slides, shapes and text frames
//! - [`mapping`]: placeholder tokens and the token → text table
//! - [`format`]: line breaking and font size heuristics
//! - [`rewrite`]: replacement across all slides
//! - [`data`], [`config`], [`cli`]: inputs

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod mapping;
pub mod ooxml;
pub mod pipeline;
pub mod rewrite;

pub use error::{ContextMapError, Result};
pub use mapping::PlaceholderMap;
pub use rewrite::{RewriteReport, populate};
