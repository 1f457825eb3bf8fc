//! Placeholder geometry inherited from slide layouts and masters.
//!
//! A slide placeholder without its own `<a:xfrm>` takes the size of the layout
//! placeholder with the same `idx`. A layout placeholder without one takes the
//! size of the master placeholder of its base type.

use crate::ooxml::pptx::shapes::base::Shape;
use crate::ooxml::units::Length;
use std::collections::HashMap;

/// Placeholder type when `<p:ph>` has no `type` attribute.
const DEFAULT_PLACEHOLDER_TYPE: &str = "obj";

/// The `<p:ph type idx>` reference of a placeholder shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRef {
    ph_type: String,
    idx: u32,
}

impl PlaceholderRef {
    pub(crate) fn from_attrs(ph_type: Option<&str>, idx: Option<&str>) -> Self {
        let idx = idx
            .and_then(|idx| atoi_simd::parse::<u32, false, false>(idx.as_bytes()).ok())
            .unwrap_or(0);
        Self {
            ph_type: ph_type.unwrap_or(DEFAULT_PLACEHOLDER_TYPE).to_string(),
            idx,
        }
    }

    #[inline]
    pub fn ph_type(&self) -> &str {
        &self.ph_type
    }

    #[inline]
    pub fn idx(&self) -> u32 {
        self.idx
    }

    /// Type of the master placeholder a layout placeholder of this type
    /// inherits from.
    pub fn master_type(&self) -> Option<&'static str> {
        match self.ph_type.as_str() {
            "title" | "ctrTitle" => Some("title"),
            "body" | "chart" | "clipArt" | "dgm" | "media" | "obj" | "pic" | "subTitle" | "tbl" => {
                Some("body")
            },
            "dt" => Some("dt"),
            "ftr" => Some("ftr"),
            "sldNum" => Some("sldNum"),
            _ => None,
        }
    }
}

/// Sizes a slide's placeholders inherit, keyed by layout placeholder `idx`.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGeometry {
    by_idx: HashMap<u32, (Length, Length)>,
}

impl PlaceholderGeometry {
    /// Resolve the layout's placeholder sizes, taking the master's size for
    /// layout placeholders that have none.
    ///
    /// The first placeholder wins when an `idx` or master type repeats.
    pub fn resolve(layout: &[Shape], master: &[Shape]) -> Self {
        let mut master_sizes: HashMap<String, (Length, Length)> = HashMap::new();
        for shape in master {
            if let (Some(ph), Some(extents)) = (shape.placeholder(), shape.extents()) {
                master_sizes.entry(ph.ph_type).or_insert(extents);
            }
        }

        let mut by_idx = HashMap::new();
        for shape in layout {
            let Some(ph) = shape.placeholder() else {
                continue;
            };
            let extents = shape.extents().or_else(|| {
                ph.master_type()
                    .and_then(|base| master_sizes.get(base).copied())
            });
            if let Some(extents) = extents {
                by_idx.entry(ph.idx).or_insert(extents);
            }
        }

        Self { by_idx }
    }

    /// Inherited width and height of a slide placeholder.
    #[inline]
    pub fn extents(&self, placeholder: &PlaceholderRef) -> Option<(Length, Length)> {
        self.by_idx.get(&placeholder.idx).copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_idx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::SlidePart;

    const LAYOUT: &str = r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Circle"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="1000000" cy="1050000"/></a:xfrm></p:spPr></p:sp><p:sp><p:nvSpPr><p:cNvPr id="4" name="Deco"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="5" cy="5"/></a:xfrm></p:spPr></p:sp></p:spTree></p:cSld></p:sldLayout>"#;

    const MASTER: &str = r#"<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="8000000" cy="1000000"/></a:xfrm></p:spPr></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Body"/><p:cNvSpPr/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="8000000" cy="4000000"/></a:xfrm></p:spPr></p:sp></p:spTree></p:cSld></p:sldMaster>"#;

    #[test]
    fn test_placeholder_ref_defaults() {
        let ph = PlaceholderRef::from_attrs(None, None);
        assert_eq!(ph.ph_type(), "obj");
        assert_eq!(ph.idx(), 0);
        assert_eq!(ph.master_type(), Some("body"));

        let ph = PlaceholderRef::from_attrs(Some("ctrTitle"), Some("12"));
        assert_eq!(ph.idx(), 12);
        assert_eq!(ph.master_type(), Some("title"));
        assert_eq!(PlaceholderRef::from_attrs(Some("hdr"), None).master_type(), None);
    }

    #[test]
    fn test_resolve_layout_then_master() {
        let layout = SlidePart::from_xml(LAYOUT.as_bytes()).shapes().unwrap();
        let master = SlidePart::from_xml(MASTER.as_bytes()).shapes().unwrap();
        let geometry = PlaceholderGeometry::resolve(&layout, &master);

        // Layout placeholder with its own size
        assert_eq!(
            geometry.extents(&PlaceholderRef::from_attrs(None, Some("1"))),
            Some((Length::emu(1_000_000), Length::emu(1_050_000)))
        );
        // Title has no layout size and falls back to the master title
        assert_eq!(
            geometry.extents(&PlaceholderRef::from_attrs(Some("title"), None)),
            Some((Length::emu(8_000_000), Length::emu(1_000_000)))
        );
        assert_eq!(geometry.extents(&PlaceholderRef::from_attrs(None, Some("7"))), None);
    }

    #[test]
    fn test_empty_without_layout() {
        let geometry = PlaceholderGeometry::resolve(&[], &[]);
        assert!(geometry.is_empty());
        assert_eq!(geometry.extents(&PlaceholderRef::from_attrs(None, None)), None);
    }
}
