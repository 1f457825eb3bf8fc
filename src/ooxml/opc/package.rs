/// In-memory OPC package.
///
/// Holds every archive member in its original order together with the parsed
/// content-type map and package-level relationships. Parts are addressed by
/// PackURI and may be replaced in place before the package is saved again.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{Member, PhysPkgReader, PhysPkgWriter};
use crate::ooxml::opc::pkgreader::{ContentTypeMap, relationships_from_xml};
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

/// Main API class for working with OPC packages.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// Content types from [Content_Types].xml
    content_types: ContentTypeMap,

    /// Archive members in original order
    members: Vec<Member>,

    /// Member name -> index into `members`
    index: HashMap<String, usize>,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use contextmap::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("template.pptx").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::from_phys_reader(phys_reader)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let phys_reader = PhysPkgReader::new(reader)?;
        Self::from_phys_reader(phys_reader)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let content_types = ContentTypeMap::from_xml(phys_reader.content_types_xml()?)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels = match phys_reader.rels_xml_for(&package_uri)? {
            Some(xml) => relationships_from_xml(xml, &package_uri)?,
            None => Relationships::new(PACKAGE_URI.to_string()),
        };

        let members = phys_reader.into_members();
        let index = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();

        Ok(Self {
            rels,
            content_types,
            members,
            index,
        })
    }

    /// Get the partname of the main document part.
    ///
    /// For PowerPoint, this is the presentation.xml part.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// Get the content type of a part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.get(partname)
    }

    /// Get the binary content of a part.
    pub fn blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.index
            .get(partname.membername())
            .map(|&i| self.members[i].data.as_slice())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Replace the binary content of an existing part.
    pub fn set_blob(&mut self, partname: &PackURI, blob: Vec<u8>) -> Result<()> {
        let i = *self
            .index
            .get(partname.membername())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?;
        self.members[i].data = blob;
        Ok(())
    }

    /// Load the relationships whose source is `partname`.
    ///
    /// A part without a .rels member has an empty collection.
    pub fn part_rels(&self, partname: &PackURI) -> Result<Relationships> {
        let rels_uri = partname.rels_uri().map_err(OpcError::InvalidPackUri)?;
        match self.blob(&rels_uri) {
            Ok(xml) => relationships_from_xml(xml, partname),
            Err(OpcError::PartNotFound(_)) => Ok(Relationships::new(partname.base_uri().to_string())),
            Err(e) => Err(e),
        }
    }

    /// Serialize the package to ZIP bytes, members in original order.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PhysPkgWriter::new();
        for member in &self.members {
            writer.write_member(member)?;
        }
        writer.finish_to_bytes()
    }

    /// Serialize the package and write it to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_minimal_pptx() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#).unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#).unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_main_document_part() {
        let pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();

        let main = pkg.main_document_partname().unwrap();
        assert_eq!(main.as_str(), "/ppt/presentation.xml");
        assert_eq!(
            pkg.content_type(&main).unwrap(),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"
        );
        assert!(pkg.part_rels(&main).unwrap().is_empty());
    }

    #[test]
    fn test_set_blob_round_trip() {
        let mut pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();
        let main = pkg.main_document_partname().unwrap();
        pkg.set_blob(&main, b"<changed/>".to_vec()).unwrap();

        let reopened = OpcPackage::from_reader(Cursor::new(pkg.to_bytes().unwrap())).unwrap();
        assert_eq!(reopened.blob(&main).unwrap(), b"<changed/>");

        let missing = PackURI::new("/ppt/slides/slide9.xml").unwrap();
        assert!(reopened.blob(&missing).is_err());
        assert!(pkg.set_blob(&missing, Vec::new()).is_err());
    }
}
