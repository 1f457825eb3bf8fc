//! Run settings: defaults, optional YAML file, command-line overrides.
//!
//! ```yaml
//! template: templates/context_map.pptx
//! data: out/data.json
//! output: out/context_map.pptx
//! company: 株式会社サンプル
//! ```

use crate::error::{ContextMapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE: &str = "template.pptx";
pub const DEFAULT_DATA: &str = "data.json";
pub const DEFAULT_OUTPUT: &str = "generated_context_map.pptx";

/// Contents of a YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub template: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub company: Option<String>,
}

impl FileConfig {
    /// Parse a YAML config; an empty document is an empty config.
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml).map_err(|e| ContextMapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml, path)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub template: PathBuf,
    pub data: PathBuf,
    pub output: PathBuf,
    /// `None` means ask on stdin
    pub company: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            data: PathBuf::from(DEFAULT_DATA),
            output: PathBuf::from(DEFAULT_OUTPUT),
            company: None,
        }
    }
}

impl Settings {
    /// Layer `overrides` over `file` over the defaults.
    pub fn resolve(file: FileConfig, overrides: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            template: overrides.template.or(file.template).unwrap_or(defaults.template),
            data: overrides.data.or(file.data).unwrap_or(defaults.data),
            output: overrides.output.or(file.output).unwrap_or(defaults.output),
            company: overrides.company.or(file.company),
        }
    }
}
