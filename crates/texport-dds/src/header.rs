//! DDS header structures.

use std::io::Write;

use texport_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{DxgiFormat, Error, Result};

/// Legacy DDS file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (must be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Required value of the `size` field.
    pub const SIZE: u32 = 124;

    /// Check if a DX10 extended header follows.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }
}

/// DDS pixel format block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (must be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Required value of the `size` field.
    pub const SIZE: u32 = 32;

    /// Map the legacy FourCC to a block-compressed format.
    pub fn legacy_format(&self) -> DxgiFormat {
        match self.four_cc {
            FourCC::DXT1 => DxgiFormat::BC1_UNORM,
            FourCC::DXT2 | FourCC::DXT3 => DxgiFormat::BC2_UNORM,
            FourCC::DXT4 | FourCC::DXT5 => DxgiFormat::BC3_UNORM,
            _ => DxgiFormat::UNKNOWN,
        }
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const DXT1: Self = Self(*b"DXT1");
    pub const DXT2: Self = Self(*b"DXT2");
    pub const DXT3: Self = Self(*b"DXT3");
    pub const DXT4: Self = Self(*b"DXT4");
    pub const DXT5: Self = Self(*b"DXT5");
    /// Signals a DX10 extended header (0x30315844).
    pub const DX10: Self = Self(*b"DX10");

    /// The code as a little-endian u32.
    pub fn as_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: DxgiFormat,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

/// A parsed header: the legacy block plus the DX10 extension when the
/// FourCC asks for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub legacy: DdsHeader,
    pub dx10: Option<DdsHeaderDxt10>,
}

impl Header {
    /// Read a header (without the file magic).
    ///
    /// Fails with [`Error::CorruptHeader`] when either declared size field is
    /// wrong.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let legacy: DdsHeader = reader.read_struct()?;

        let size = legacy.size;
        if size != DdsHeader::SIZE {
            return Err(Error::CorruptHeader {
                field: "header size",
                expected: DdsHeader::SIZE,
                actual: size,
            });
        }

        let pf_size = legacy.pixel_format.size;
        if pf_size != DdsPixelFormat::SIZE {
            return Err(Error::CorruptHeader {
                field: "pixel format size",
                expected: DdsPixelFormat::SIZE,
                actual: pf_size,
            });
        }

        let dx10 = if legacy.is_dx10() {
            Some(reader.read_struct()?)
        } else {
            None
        };

        Ok(Self { legacy, dx10 })
    }

    /// Append the header to `out` in exactly the layout [`Header::read`]
    /// consumes.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.legacy.as_bytes());
        if self.legacy.is_dx10() {
            let dx10 = self.dx10.unwrap_or(DdsHeaderDxt10 {
                dxgi_format: DxgiFormat::UNKNOWN,
                resource_dimension: 0,
                misc_flag: 0,
                array_size: 0,
                misc_flags2: 0,
            });
            out.extend_from_slice(dx10.as_bytes());
        }
    }

    /// Write the header to a stream.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut bytes);
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Serialized length in bytes.
    pub fn encoded_len(&self) -> usize {
        let dx10 = if self.legacy.is_dx10() {
            std::mem::size_of::<DdsHeaderDxt10>()
        } else {
            0
        };
        std::mem::size_of::<DdsHeader>() + dx10
    }

    /// The effective pixel format.
    ///
    /// DX10 files carry a DXGI code directly; legacy files are mapped from
    /// their FourCC, with anything unrecognized reported as unknown.
    pub fn pixel_format(&self) -> DxgiFormat {
        if self.legacy.is_dx10() {
            return self
                .dx10
                .map(|h| h.dxgi_format)
                .unwrap_or(DxgiFormat::UNKNOWN);
        }
        self.legacy.pixel_format.legacy_format()
    }

    pub fn width(&self) -> u32 {
        self.legacy.width
    }

    pub fn height(&self) -> u32 {
        self.legacy.height
    }

    pub fn mipmap_count(&self) -> u32 {
        self.legacy.mipmap_count
    }
}
