//! Whole DDS files: magic, header and surface payload.

use std::fs;
use std::io::Write;
use std::path::Path;

use texport_common::BinaryReader;

use crate::{Error, Header, Result, DDS_MAGIC};

/// Whether a serialized file starts with the `DDS ` magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicMode {
    /// The stream begins with the 4-byte magic, which is verified.
    Expect,
    /// The magic was stripped by the game's packer (separate alpha surfaces).
    Trimmed,
}

/// A DDS file held in memory.
///
/// `data` holds every surface level, concatenated largest mip first.
/// Serialization always emits the magic, so a trimmed input comes back out
/// as a standard DDS stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsFile {
    header: Header,
    data: Vec<u8>,
    magic: MagicMode,
}

impl DdsFile {
    /// Create a file from a header and payload.
    pub fn new(header: Header, data: Vec<u8>) -> Self {
        Self {
            header,
            data,
            magic: MagicMode::Expect,
        }
    }

    /// Parse a DDS file from bytes.
    pub fn parse(bytes: &[u8], magic: MagicMode) -> Result<Self> {
        let mut reader = BinaryReader::new(bytes);

        if magic == MagicMode::Expect {
            let actual = reader.read_u32()?;
            if actual != DDS_MAGIC {
                return Err(Error::CorruptHeader {
                    field: "magic",
                    expected: DDS_MAGIC,
                    actual,
                });
            }
        }

        let header = Header::read(&mut reader)?;
        let data = reader.read_to_end().to_vec();

        Ok(Self {
            header,
            data,
            magic,
        })
    }

    /// Read and parse a DDS file from disk.
    pub fn open<P: AsRef<Path>>(path: P, magic: MagicMode) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::parse(&bytes, magic)
    }

    /// Get the parsed header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get the surface payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// How the magic was handled when this file was parsed.
    pub fn magic_mode(&self) -> MagicMode {
        self.magic
    }

    /// Replace the payload, producing a new file value.
    pub fn with_payload(self, data: Vec<u8>) -> Self {
        Self { data, ..self }
    }

    /// Serialized length in bytes.
    pub fn encoded_len(&self) -> usize {
        4 + self.header.encoded_len() + self.data.len()
    }

    /// Write magic, header and payload.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&DDS_MAGIC.to_le_bytes())?;
        self.header.write(writer)?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    /// Serialize to an in-memory buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&DDS_MAGIC.to_le_bytes());
        self.header.encode_into(&mut out);
        out.extend_from_slice(&self.data);
        out
    }

    /// Serialize to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}
