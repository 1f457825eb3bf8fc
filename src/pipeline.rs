//! One run: read the data, build the mapping, rewrite the template, save.
use crate::config::Settings;
use crate::data::load_sections;
use crate::error::{ContextMapError, Result};
use crate::mapping::PlaceholderMap;
use crate::ooxml::pptx::Package;
use crate::rewrite::{RewriteReport, populate};

/// Generate the context map described by `settings` for `company`.
///
/// A missing or malformed data file only leaves the data slots empty; a
/// template that cannot be read or an output that cannot be written fails the
/// run.
pub fn run(settings: &Settings, company: &str) -> Result<RewriteReport> {
    let sections = load_sections(&settings.data);
    let map = PlaceholderMap::build(&sections, company);
    tracing::debug!(
        "{} of {} placeholders have a replacement",
        map.populated_len(),
        map.tokens().count()
    );

    let mut package = Package::open(&settings.template).map_err(|source| {
        ContextMapError::Template {
            path: settings.template.clone(),
            source,
        }
    })?;
    let slide_count = package.presentation()?.slide_count();
    tracing::info!(path = %settings.template.display(), "Loaded template: {} slides", slide_count);

    let report = populate(&mut package, &map)?;

    package
        .save(&settings.output)
        .map_err(|source| ContextMapError::Output {
            path: settings.output.clone(),
            source,
        })?;
    tracing::info!("Saved context map to {}", settings.output.display());

    Ok(report)
}
