/// Slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::base::{Shape, ShapeType};
use crate::ooxml::pptx::shapes::xml::XmlElement;
use quick_xml::Reader;
use quick_xml::events::Event;

/// A slide part backed by the slide's XML bytes.
///
/// Slide layouts and masters share the `<p:cSld><p:spTree>` structure and are
/// read through the same type.
pub struct SlidePart<'a> {
    xml: &'a [u8],
}

impl<'a> SlidePart<'a> {
    pub fn from_xml(xml: &'a [u8]) -> Self {
        Self { xml }
    }

    /// Parse the top-level shapes of the slide's `<p:spTree>`.
    ///
    /// Shapes nested in groups are not listed. Every listed shape records the
    /// byte range it occupies so that [`splice`](Self::splice) can write back
    /// only the shapes that changed.
    pub fn shapes(&self) -> Result<Vec<Shape>> {
        let mut reader = Reader::from_reader(self.xml);

        let mut shapes = Vec::new();
        let mut depth = 0usize;
        let mut c_sld_depth = None;
        let mut tree_depth = None;

        loop {
            let start = reader.buffer_position() as usize;
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let local_name = e.local_name();
                    let shape_type = ShapeType::from_local_name(local_name.as_ref());

                    match (tree_depth, shape_type) {
                        (Some(tree), Some(shape_type)) if depth == tree + 1 => {
                            let element = if shape_type == ShapeType::Shape {
                                Some(XmlElement::read_subtree(&mut reader, &e)?)
                            } else {
                                reader
                                    .read_to_end(e.name())
                                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                                None
                            };
                            let end = reader.buffer_position() as usize;
                            shapes.push(Shape::new(shapes.len(), shape_type, start..end, element));
                            continue;
                        },
                        _ => {},
                    }

                    match local_name.as_ref() {
                        b"cSld" if c_sld_depth.is_none() => c_sld_depth = Some(depth),
                        b"spTree" if tree_depth.is_none() && c_sld_depth == depth.checked_sub(1) => {
                            tree_depth = Some(depth)
                        },
                        _ => {},
                    }
                    depth += 1;
                },
                Ok(Event::Empty(e)) => {
                    let shape_type = ShapeType::from_local_name(e.local_name().as_ref());
                    if let (Some(tree), Some(shape_type)) = (tree_depth, shape_type) {
                        if depth == tree + 1 {
                            let end = reader.buffer_position() as usize;
                            shapes.push(Shape::new(shapes.len(), shape_type, start..end, None));
                        }
                    }
                },
                Ok(Event::End(_)) => {
                    depth = depth.saturating_sub(1);
                    if tree_depth == Some(depth) {
                        break;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(shapes)
    }

    /// Rebuild the slide XML with every modified shape re-serialized in place.
    ///
    /// Bytes outside the modified shapes are copied unchanged.
    pub fn splice(&self, shapes: &[Shape]) -> Vec<u8> {
        let mut modified: Vec<&Shape> = shapes.iter().filter(|s| s.is_modified()).collect();
        modified.sort_by_key(|s| s.span().start);

        let mut xml = Vec::with_capacity(self.xml.len() + modified.len() * 256);
        let mut cursor = 0;
        for shape in modified {
            let span = shape.span();
            let Some(shape_xml) = shape.to_xml() else {
                continue;
            };
            if span.start < cursor || span.end > self.xml.len() {
                continue;
            }
            xml.extend_from_slice(&self.xml[cursor..span.start]);
            xml.extend_from_slice(&shape_xml);
            cursor = span.end;
        }
        xml.extend_from_slice(&self.xml[cursor..]);
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::textframe::BodyLayout;
    use crate::ooxml::units::Length;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld name="Map">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="457200"/></a:xfrm></p:spPr>
        <p:txBody><a:bodyPr/><a:p><a:r><a:t>Title</a:t></a:r></a:p></p:txBody>
      </p:sp>
      <p:grpSp>
        <p:nvGrpSpPr><p:cNvPr id="3" name="Group"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
        <p:grpSpPr/>
        <p:sp><p:nvSpPr><p:cNvPr id="4" name="Nested"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>
      </p:grpSp>
      <p:cxnSp/>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="5" name="Oval &amp; Co"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        <p:spPr/>
        <p:txBody><a:bodyPr/><a:p><a:r><a:rPr sz="1400"/><a:t>A1</a:t></a:r></a:p></p:txBody>
      </p:sp>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#;

    #[test]
    fn test_top_level_shapes() {
        let part = SlidePart::from_xml(SLIDE.as_bytes());
        let shapes = part.shapes().unwrap();

        let types: Vec<_> = shapes.iter().map(|s| s.shape_type()).collect();
        assert_eq!(
            types,
            [ShapeType::Shape, ShapeType::GroupShape, ShapeType::Connector, ShapeType::Shape]
        );
        assert_eq!(shapes[3].index(), 3);
        assert!(shapes[0].placeholder().is_none());
        assert_eq!(
            shapes[0].extents(),
            Some((Length::emu(914_400), Length::emu(457_200)))
        );
        assert_eq!(shapes[3].extents(), None);
        assert_eq!(shapes[3].text_frame().unwrap().text().unwrap(), "A1");
        assert!(shapes[1].text_frame().is_none());

        for shape in &shapes {
            let span = shape.span();
            assert_eq!(SLIDE.as_bytes()[span.start], b'<');
            assert_eq!(SLIDE.as_bytes()[span.end - 1], b'>');
        }
    }

    #[test]
    fn test_splice_unmodified_is_identity() {
        let part = SlidePart::from_xml(SLIDE.as_bytes());
        let shapes = part.shapes().unwrap();
        assert_eq!(part.splice(&shapes), SLIDE.as_bytes());
    }

    #[test]
    fn test_splice_modified_shape() {
        let part = SlidePart::from_xml(SLIDE.as_bytes());
        let mut shapes = part.shapes().unwrap();
        {
            let mut frame = shapes[3].text_frame_mut().unwrap();
            frame.set_body_layout(&BodyLayout {
                word_wrap: true,
                shrink_text_on_overflow: true,
                inset: Length::pt(1),
            });
            frame.set_first_paragraph(&["企業"], Length::pt(12), "ctr");
        }

        let xml = String::from_utf8(part.splice(&shapes)).unwrap();
        assert!(xml.contains(r#"<a:r><a:rPr sz="1200"/><a:t>企業</a:t></a:r>"#));
        assert!(!xml.contains("A1"));
        assert!(xml.contains("<a:t>Title</a:t>"));
        assert!(xml.ends_with("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\n</p:sld>"));

        let reparsed = SlidePart::from_xml(xml.as_bytes()).shapes().unwrap();
        assert_eq!(reparsed.len(), 4);
        assert_eq!(reparsed[3].text_frame().unwrap().text().unwrap(), "企業");
        assert!(xml.contains(r#"name="Oval &amp; Co""#));
    }
}
