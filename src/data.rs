//! JSON input: the five category sections of a context map.
//!
//! ```json
//! [
//!   {
//!     "code": "A",
//!     "section_name": "企業",
//!     "items": [{ "title": "品質管理" }],
//!     "social_trend": ["少子高齢化"]
//!   }
//! ]
//! ```
//!
//! Every field is optional and `null` reads as missing; nothing beyond the
//! JSON shape is validated.

use crate::error::{ContextMapError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One category section of the input document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub section_name: String,
    #[serde(deserialize_with = "null_entries_as_default")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "null_entries_as_default")]
    pub social_trend: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` list is empty; a `null` entry keeps its slot with the default value.
fn null_entries_as_default<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.into_iter().map(Option::unwrap_or_default).collect())
}

/// Parse sections from JSON text.
pub fn parse_sections(json: &str, path: &Path) -> Result<Vec<Section>> {
    serde_json::from_str(json).map_err(|source| ContextMapError::Data {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the sections file.
pub fn read_sections(path: &Path) -> Result<Vec<Section>> {
    let json = std::fs::read_to_string(path)?;
    parse_sections(&json, path)
}

/// Read the sections file, falling back to an empty dataset on any failure.
///
/// The failure is logged; the mapping then keeps only its company-name entries.
pub fn load_sections(path: &Path) -> Vec<Section> {
    match read_sections(path) {
        Ok(sections) => {
            tracing::info!(path = %path.display(), "Loaded JSON data: {} sections", sections.len());
            sections
        },
        Err(e) => {
            tracing::error!(path = %path.display(), "Failed to load JSON data: {}", e);
            Vec::new()
        },
    }
}
