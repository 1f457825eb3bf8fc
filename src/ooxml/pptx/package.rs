/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::PackURI;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::pptx::parts::{PresentationPart, SlidePart};
use crate::ooxml::pptx::presentation::Presentation;
use crate::ooxml::pptx::shapes::PlaceholderGeometry;
use std::io::{Read, Seek};
use std::path::Path;

/// Main part content types accepted as a presentation.
const PRESENTATION_CONTENT_TYPES: [&str; 3] = [
    ct::PML_PRESENTATION_MAIN,
    ct::PML_PRES_MACRO_MAIN,
    ct::PML_TEMPLATE_MAIN,
];

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for working with PowerPoint presentations.
/// It wraps an OPC package and provides PowerPoint-specific functionality.
///
/// # Examples
///
/// ```rust,no_run
/// use contextmap::ooxml::pptx::Package;
///
/// // Open an existing presentation
/// let pkg = Package::open("template.pptx")?;
///
/// // Get the main presentation
/// let pres = pkg.presentation()?;
///
/// // Access slides
/// println!("Presentation has {} slides", pres.slide_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from a reader.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use contextmap::ooxml::pptx::Package;
    /// use std::io::Cursor;
    ///
    /// let data = std::fs::read("template.pptx")?;
    /// let pkg = Package::from_reader(Cursor::new(data))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Verify it's a PowerPoint presentation by checking the main part's content type.
    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = opc.content_type(&main)?;
        if !PRESENTATION_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: PRESENTATION_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// Get the main presentation with its slides resolved to partnames.
    pub fn presentation(&self) -> Result<Presentation> {
        let partname = self.opc.main_document_partname()?;
        let part = PresentationPart::from_xml(self.opc.blob(&partname)?);
        let rels = self.opc.part_rels(&partname)?;

        let mut slide_partnames = Vec::new();
        for r_id in part.slide_rids()? {
            let rel = rels.get(&r_id).ok_or_else(|| {
                OoxmlError::PartNotFound(format!("slide relationship {} in {}", r_id, partname))
            })?;
            if rel.reltype() != rt::SLIDE {
                return Err(OoxmlError::InvalidFormat(format!(
                    "relationship {} is not a slide: {}",
                    r_id,
                    rel.reltype()
                )));
            }
            slide_partnames.push(rel.target_partname()?);
        }

        Ok(Presentation::new(slide_partnames))
    }

    /// Borrow a slide part by partname.
    pub fn slide(&self, partname: &PackURI) -> Result<SlidePart<'_>> {
        let content_type = self.opc.content_type(partname)?;
        if content_type != ct::PML_SLIDE {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::PML_SLIDE.to_string(),
                got: content_type.to_string(),
            });
        }
        Ok(SlidePart::from_xml(self.opc.blob(partname)?))
    }

    /// Placeholder sizes the slide inherits from its layout and master.
    ///
    /// Empty when the slide has no layout relationship.
    pub fn placeholder_geometry(&self, slide: &PackURI) -> Result<PlaceholderGeometry> {
        let Some(layout_partname) = self.related_part(slide, rt::SLIDE_LAYOUT)? else {
            return Ok(PlaceholderGeometry::default());
        };
        let layout = SlidePart::from_xml(self.opc.blob(&layout_partname)?).shapes()?;

        let master = match self.related_part(&layout_partname, rt::SLIDE_MASTER)? {
            Some(master_partname) => SlidePart::from_xml(self.opc.blob(&master_partname)?).shapes()?,
            None => Vec::new(),
        };

        Ok(PlaceholderGeometry::resolve(&layout, &master))
    }

    /// Target of the single relationship of `reltype` from `partname`, if any.
    fn related_part(&self, partname: &PackURI, reltype: &str) -> Result<Option<PackURI>> {
        let rels = self.opc.part_rels(partname)?;
        match rels.part_with_reltype(reltype) {
            Ok(rel) => Ok(Some(rel.target_partname()?)),
            Err(OpcError::RelationshipNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace a slide's XML.
    pub fn set_slide_xml(&mut self, partname: &PackURI, xml: Vec<u8>) -> Result<()> {
        Ok(self.opc.set_blob(partname, xml)?)
    }

    /// Save the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(self.opc.save(path)?)
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}
