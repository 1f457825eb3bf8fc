//! Placeholder replacement across the slides of a presentation.
//!
//! A shape is replaced when its whole (trimmed) text is a token with a
//! non-empty mapping. The replacement is line-broken for the shape, its font
//! shrunk, and the text frame switched to centered, wrapped, shrink-on-overflow
//! text with 1 pt insets. Shapes that do not match are written back untouched.

use crate::format::{DEFAULT_FONT_SIZE, ShapeKind, adjust_font_size, format_text_for_shape};
use crate::mapping::{PlaceholderMap, TITLE_TOKEN};
use crate::ooxml::Result;
use crate::ooxml::pptx::Package;
use crate::ooxml::pptx::shapes::{BodyLayout, PlaceholderGeometry, Shape, ShapeType};
use crate::ooxml::units::Length;
use smallvec::SmallVec;

/// Body properties of every replaced shape.
pub const REPLACED_BODY_LAYOUT: BodyLayout = BodyLayout {
    word_wrap: true,
    shrink_text_on_overflow: true,
    inset: Length::pt(1),
};

/// `algn` value for centered paragraphs.
const ALIGN_CENTER: &str = "ctr";

/// One replaced shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    /// 1-based slide number
    pub slide: usize,
    /// 1-based position in the slide's shape tree
    pub shape: usize,
    pub token: String,
    pub text: String,
    /// Text as written, with line breaks
    pub formatted: String,
    pub font_size: Length,
}

/// Replacements made on one slide.
#[derive(Debug, Clone, Default)]
pub struct SlideReport {
    pub number: usize,
    pub replacements: Vec<Replacement>,
}

/// Outcome of a [`populate`] pass.
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
    pub slides: Vec<SlideReport>,
}

impl RewriteReport {
    pub fn total(&self) -> usize {
        self.slides.iter().map(|s| s.replacements.len()).sum()
    }

    pub fn replacements(&self) -> impl Iterator<Item = &Replacement> {
        self.slides.iter().flat_map(|s| s.replacements.iter())
    }
}

/// Replace placeholder shapes on every slide of `package`.
pub fn populate(package: &mut Package, map: &PlaceholderMap) -> Result<RewriteReport> {
    let presentation = package.presentation()?;
    let mut report = RewriteReport::default();

    for (idx, partname) in presentation.slide_partnames().iter().enumerate() {
        let number = idx + 1;
        tracing::info!(slide = number, part = %partname, "Processing slide");

        let geometry = package.placeholder_geometry(partname)?;
        let slide = package.slide(partname)?;
        let mut shapes = slide.shapes()?;
        let mut replacements = Vec::new();
        for shape in shapes.iter_mut() {
            if let Some(replacement) = rewrite_shape(shape, map, &geometry, number)? {
                tracing::info!(
                    slide = number,
                    shape = replacement.shape,
                    "'{}' -> '{}'",
                    replacement.token,
                    replacement.text
                );
                replacements.push(replacement);
            }
        }

        if !replacements.is_empty() {
            let xml = slide.splice(&shapes);
            package.set_slide_xml(partname, xml)?;
        }
        tracing::info!(slide = number, "Replacements on slide: {}", replacements.len());
        report.slides.push(SlideReport {
            number,
            replacements,
        });
    }

    tracing::info!("Total replacements: {}", report.total());
    Ok(report)
}

/// Rewrite one shape if its text is a populated token.
///
/// `geometry` supplies the size of placeholders that inherit it from the
/// slide layout.
pub fn rewrite_shape(
    shape: &mut Shape,
    map: &PlaceholderMap,
    geometry: &PlaceholderGeometry,
    slide: usize,
) -> Result<Option<Replacement>> {
    if shape.shape_type() != ShapeType::Shape {
        return Ok(None);
    }
    let Some(frame) = shape.text_frame() else {
        return Ok(None);
    };

    let text = frame.text()?;
    let token = text.trim();
    if token.is_empty() {
        return Ok(None);
    }
    let Some(new_text) = map.replacement(token) else {
        return Ok(None);
    };

    let is_title = shape.index() == 0 && token == TITLE_TOKEN;
    let extents = shape.extents().or_else(|| {
        shape
            .placeholder()
            .and_then(|ph| geometry.extents(&ph))
    });
    let kind = extents.map_or(ShapeKind::Rectangular, |(cx, cy)| ShapeKind::from_extents(cx, cy));

    let formatted = format_text_for_shape(new_text, kind, is_title);
    let font_size = adjust_font_size(&formatted, DEFAULT_FONT_SIZE, is_title);
    let token = token.to_string();

    let Some(mut frame) = shape.text_frame_mut() else {
        return Ok(None);
    };
    frame.set_body_layout(&REPLACED_BODY_LAYOUT);
    {
        let lines: SmallVec<[&str; 4]> = formatted.split('\n').collect();
        frame.set_first_paragraph(&lines, font_size, ALIGN_CENTER);
    }

    Ok(Some(Replacement {
        slide,
        shape: shape.index() + 1,
        token,
        text: new_text.to_string(),
        formatted,
        font_size,
    }))
}
