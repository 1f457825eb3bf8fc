/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::pkgreader::attr_value;
use quick_xml::Reader;
use quick_xml::events::Event;

/// The main presentation part.
///
/// Holds the slide list (`<p:sldIdLst>`).
///
/// # Example
///
/// ```rust,ignore
/// let pres_part = PresentationPart::from_xml(pkg.blob(&partname)?);
/// let r_ids = pres_part.slide_rids()?;
/// ```
pub struct PresentationPart<'a> {
    xml: &'a [u8],
}

impl<'a> PresentationPart<'a> {
    pub fn from_xml(xml: &'a [u8]) -> Self {
        Self { xml }
    }

    /// Get the relationship IDs of all slides in presentation order.
    ///
    /// Each `<p:sldId>` names its slide through a namespaced `id` attribute
    /// (normally `r:id`); the unprefixed `id` is the numeric slide ID.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.xml);
        reader.config_mut().trim_text(true);

        let mut rids = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldId" {
                        for attr in e.attributes() {
                            let attr = attr?;
                            if attr.key.prefix().is_some()
                                && attr.key.local_name().as_ref() == b"id"
                            {
                                rids.push(attr_value(&attr)?);
                                break;
                            }
                        }
                    }
                },
                Ok(Event::End(e)) if e.local_name().as_ref() == b"sldIdLst" => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(rids)
    }
}
