//! Physical (ZIP) side of an OPC package.
//!
//! The reader decompresses every member up front and keeps the archive's
//! member order, so a package can be written back with the same layout it was
//! read with: `[Content_Types].xml` first, media stored, XML deflated.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// One member of the ZIP archive.
#[derive(Debug, Clone)]
pub struct Member {
    /// ZIP member name, without leading slash
    pub name: String,
    /// Decompressed contents
    pub data: Vec<u8>,
    /// Whether the member was stored without compression
    pub stored: bool,
}

/// Physical package reader holding the decompressed archive members.
pub struct PhysPkgReader {
    members: Vec<Member>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::new(Cursor::new(data))
    }

    /// Read every member of the archive behind `reader`.
    pub fn new<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut members = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }

            let stored = entry.compression() == CompressionMethod::Stored;
            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;

            members.push(Member { name, data, stored });
        }

        Ok(Self { members })
    }

    /// Get the binary content for a part by its PackURI.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        let membername = pack_uri.membername();
        self.members
            .iter()
            .find(|m| m.name == membername)
            .map(|m| m.data.as_slice())
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Get the [Content_Types].xml content.
    pub fn content_types_xml(&self) -> Result<&[u8]> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        self.blob_for(&content_types_uri)
    }

    /// Get the relationships XML for a source URI, `None` when it has none.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;

        match self.blob_for(&rels_uri) {
            Ok(blob) => Ok(Some(blob)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Consume the reader, yielding the members in archive order.
    pub fn into_members(self) -> Vec<Member> {
        self.members
    }
}

/// Physical package writer for creating OPC packages.
pub struct PhysPkgWriter<W: Write + Seek> {
    archive: ZipWriter<W>,
}

impl PhysPkgWriter<Cursor<Vec<u8>>> {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self::with_writer(Cursor::new(Vec::new()))
    }

    /// Finish writing and return the package bytes.
    pub fn finish_to_bytes(self) -> Result<Vec<u8>> {
        Ok(self.finish()?.into_inner())
    }
}

impl<W: Write + Seek> PhysPkgWriter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            archive: ZipWriter::new(writer),
        }
    }

    /// Write a member with Deflate compression.
    pub fn write(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        self.write_with(membername, blob, CompressionMethod::Deflated)
    }

    /// Write a member without compression.
    pub fn write_stored(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        self.write_with(membername, blob, CompressionMethod::Stored)
    }

    /// Write a member, keeping its original compression choice.
    pub fn write_member(&mut self, member: &Member) -> Result<()> {
        if member.stored {
            self.write_stored(&member.name, &member.data)
        } else {
            self.write(&member.name, &member.data)
        }
    }

    fn write_with(&mut self, membername: &str, blob: &[u8], method: CompressionMethod) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(method);
        self.archive.start_file(membername, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write the central directory and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.archive.finish()?)
    }
}
