//! DXGI pixel format codes.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// A DXGI format code as stored in the DX10 extended header.
///
/// Only the formats this crate reasons about get named constants; any other
/// code round-trips untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct DxgiFormat(pub u32);

impl DxgiFormat {
    pub const UNKNOWN: Self = Self(0);
    pub const R32G32B32A32_FLOAT: Self = Self(2);
    pub const R16G16B16A16_FLOAT: Self = Self(10);
    pub const R16G16B16A16_UNORM: Self = Self(11);
    pub const R8G8B8A8_UNORM: Self = Self(28);
    pub const R8G8B8A8_UNORM_SRGB: Self = Self(29);
    pub const R32_FLOAT: Self = Self(41);
    pub const R8G8_UNORM: Self = Self(49);
    pub const R8G8_SNORM: Self = Self(51);
    pub const R8_UNORM: Self = Self(61);
    pub const R8_SNORM: Self = Self(63);
    pub const BC1_UNORM: Self = Self(71);
    pub const BC1_UNORM_SRGB: Self = Self(72);
    pub const BC2_UNORM: Self = Self(74);
    pub const BC2_UNORM_SRGB: Self = Self(75);
    pub const BC3_UNORM: Self = Self(77);
    pub const BC3_UNORM_SRGB: Self = Self(78);
    pub const BC4_UNORM: Self = Self(80);
    pub const BC4_SNORM: Self = Self(81);
    pub const BC5_UNORM: Self = Self(83);
    pub const BC5_SNORM: Self = Self(84);
    pub const B8G8R8A8_UNORM: Self = Self(87);
    pub const B8G8R8A8_UNORM_SRGB: Self = Self(91);
    pub const BC6H_UF16: Self = Self(95);
    pub const BC6H_SF16: Self = Self(96);
    pub const BC7_UNORM: Self = Self(98);
    pub const BC7_UNORM_SRGB: Self = Self(99);

    /// Human-readable name, if this is one of the named formats.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::UNKNOWN => "UNKNOWN",
            Self::R32G32B32A32_FLOAT => "R32G32B32A32_FLOAT",
            Self::R16G16B16A16_FLOAT => "R16G16B16A16_FLOAT",
            Self::R16G16B16A16_UNORM => "R16G16B16A16_UNORM",
            Self::R8G8B8A8_UNORM => "R8G8B8A8_UNORM",
            Self::R8G8B8A8_UNORM_SRGB => "R8G8B8A8_UNORM_SRGB",
            Self::R32_FLOAT => "R32_FLOAT",
            Self::R8G8_UNORM => "R8G8_UNORM",
            Self::R8G8_SNORM => "R8G8_SNORM",
            Self::R8_UNORM => "R8_UNORM",
            Self::R8_SNORM => "R8_SNORM",
            Self::BC1_UNORM => "BC1_UNORM",
            Self::BC1_UNORM_SRGB => "BC1_UNORM_SRGB",
            Self::BC2_UNORM => "BC2_UNORM",
            Self::BC2_UNORM_SRGB => "BC2_UNORM_SRGB",
            Self::BC3_UNORM => "BC3_UNORM",
            Self::BC3_UNORM_SRGB => "BC3_UNORM_SRGB",
            Self::BC4_UNORM => "BC4_UNORM",
            Self::BC4_SNORM => "BC4_SNORM",
            Self::BC5_UNORM => "BC5_UNORM",
            Self::BC5_SNORM => "BC5_SNORM",
            Self::B8G8R8A8_UNORM => "B8G8R8A8_UNORM",
            Self::B8G8R8A8_UNORM_SRGB => "B8G8R8A8_UNORM_SRGB",
            Self::BC6H_UF16 => "BC6H_UF16",
            Self::BC6H_SF16 => "BC6H_SF16",
            Self::BC7_UNORM => "BC7_UNORM",
            Self::BC7_UNORM_SRGB => "BC7_UNORM_SRGB",
            _ => return None,
        })
    }

    /// Bits per pixel, or 0 for formats without a known size.
    ///
    /// Block-compressed formats report their average rate (4 or 8).
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::R32G32B32A32_FLOAT => 128,
            Self::R16G16B16A16_FLOAT | Self::R16G16B16A16_UNORM => 64,
            Self::R8G8B8A8_UNORM
            | Self::R8G8B8A8_UNORM_SRGB
            | Self::B8G8R8A8_UNORM
            | Self::B8G8R8A8_UNORM_SRGB
            | Self::R32_FLOAT => 32,
            Self::R8G8_UNORM | Self::R8G8_SNORM => 16,
            Self::R8_UNORM | Self::R8_SNORM => 8,
            Self::BC1_UNORM | Self::BC1_UNORM_SRGB | Self::BC4_UNORM | Self::BC4_SNORM => 4,
            Self::BC2_UNORM
            | Self::BC2_UNORM_SRGB
            | Self::BC3_UNORM
            | Self::BC3_UNORM_SRGB
            | Self::BC5_UNORM
            | Self::BC5_SNORM
            | Self::BC6H_UF16
            | Self::BC6H_SF16
            | Self::BC7_UNORM
            | Self::BC7_UNORM_SRGB => 8,
            _ => 0,
        }
    }

    /// Whether this is a block-compressed format.
    pub fn is_compressed(self) -> bool {
        matches!(self.0, 70..=84 | 94..=99)
    }

    /// Whether the stored color values are sRGB-encoded.
    pub fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::R8G8B8A8_UNORM_SRGB
                | Self::BC1_UNORM_SRGB
                | Self::BC2_UNORM_SRGB
                | Self::BC3_UNORM_SRGB
                | Self::B8G8R8A8_UNORM_SRGB
                | Self::BC7_UNORM_SRGB
        )
    }

    /// Whether this is a two-channel block format (tangent-space normals).
    pub fn is_two_channel_block(self) -> bool {
        matches!(self, Self::BC5_UNORM | Self::BC5_SNORM)
    }
}

impl fmt::Debug for DxgiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "DxgiFormat::{name}"),
            None => write!(f, "DxgiFormat({})", self.0),
        }
    }
}

impl fmt::Display for DxgiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_formats_are_compressed() {
        assert!(DxgiFormat::BC1_UNORM.is_compressed());
        assert!(DxgiFormat::BC5_SNORM.is_compressed());
        assert!(DxgiFormat::BC7_UNORM_SRGB.is_compressed());
        assert!(!DxgiFormat::R8G8B8A8_UNORM.is_compressed());
        assert!(!DxgiFormat::R32G32B32A32_FLOAT.is_compressed());
    }

    #[test]
    fn test_srgb_flags() {
        assert!(DxgiFormat::BC1_UNORM_SRGB.is_srgb());
        assert!(DxgiFormat::R8G8B8A8_UNORM_SRGB.is_srgb());
        assert!(!DxgiFormat::BC1_UNORM.is_srgb());
        assert!(!DxgiFormat::BC5_UNORM.is_srgb());
    }

    #[test]
    fn test_display_unknown_code() {
        assert_eq!(DxgiFormat::BC3_UNORM.to_string(), "BC3_UNORM");
        assert_eq!(DxgiFormat(250).to_string(), "250");
        assert_eq!(DxgiFormat(250).bits_per_pixel(), 0);
    }
}
