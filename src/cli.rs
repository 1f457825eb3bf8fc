//! Command-line interface.
use crate::config::{FileConfig, Settings};
use crate::error::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prompt shown when no company name was given.
pub const COMPANY_PROMPT: &str = "企業名を入力してください: ";

#[derive(Parser, Debug, Default)]
#[command(name = "contextmap", version)]
#[command(about = "Populate a context map presentation template from JSON data")]
pub struct Cli {
    /// Presentation template [default: template.pptx]
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// JSON data file [default: data.json]
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Output presentation [default: generated_context_map.pptx]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Company name; prompted for when omitted
    #[arg(long, value_name = "NAME")]
    pub company: Option<String>,

    /// YAML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve against the config file (if any) and the defaults.
    pub fn into_settings(self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let overrides = FileConfig {
            template: self.template,
            data: self.data,
            output: self.output,
            company: self.company,
        };
        Ok(Settings::resolve(file, overrides))
    }
}

/// Ask for the company name.
///
/// Returns `None` at end of input. The line terminator is stripped; other
/// whitespace is kept.
pub fn prompt_company<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Option<String>> {
    output.write_all(COMPANY_PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let name = line.strip_suffix('\n').unwrap_or(&line);
    let name = name.strip_suffix('\r').unwrap_or(name);
    Ok(Some(name.to_string()))
}
