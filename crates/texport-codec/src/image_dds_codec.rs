//! Codec backed by `image_dds` for decoding and `image` for containers.

use std::io::Cursor;
use std::path::Path;

use image_dds::ddsfile::Dds;
use texport_dds::DxgiFormat;
use texport_pixel::{bytes_to_f32s, f32s_to_bytes};
use tracing::debug;

use crate::color::{linear_to_srgb, srgb_to_linear, unorm8};
use crate::{ContainerFormat, Error, Result, Texture, TextureCodec};

/// The stock [`TextureCodec`].
///
/// sRGB sources are linearized on decode and sRGB targets re-encoded on
/// conversion, so a decode/convert pair through the same color space is
/// lossless up to 8-bit rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDdsCodec;

impl ImageDdsCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decode any supported texture into linear RGBA floats.
    fn to_rgba_f32(&self, image: &Texture) -> Result<Vec<f32>> {
        let format = image.format();
        let mut rgba = match format {
            DxgiFormat::R32G32B32A32_FLOAT => bytes_to_f32s(image.pixels()),
            DxgiFormat::R32_FLOAT => bytes_to_f32s(image.pixels())
                .into_iter()
                .flat_map(|r| [r, 0.0, 0.0, 1.0])
                .collect(),
            _ => {
                let image_format = to_image_format(format).ok_or(Error::UnsupportedFormat {
                    format,
                    operation: "decode",
                })?;
                let surface = image_dds::Surface {
                    width: image.width(),
                    height: image.height(),
                    depth: 1,
                    layers: 1,
                    mipmaps: 1,
                    image_format,
                    data: image.pixels(),
                };
                surface
                    .decode_rgbaf32()
                    .map_err(|e| Error::Surface(format!("{e:?}")))?
                    .data
            }
        };

        if format.is_srgb() {
            for pixel in rgba.chunks_exact_mut(4) {
                for c in &mut pixel[..3] {
                    *c = srgb_to_linear(*c);
                }
            }
        }

        let expected = image.pixel_count() * 4;
        if rgba.len() < expected {
            return Err(Error::InvalidPixelBuffer {
                expected: expected * 4,
                actual: rgba.len() * 4,
            });
        }
        rgba.truncate(expected);
        Ok(rgba)
    }

    /// Encode linear RGBA floats into `target`.
    fn from_rgba_f32(&self, rgba: &[f32], target: DxgiFormat) -> Result<Vec<u8>> {
        let pixels = match target {
            DxgiFormat::R32G32B32A32_FLOAT => f32s_to_bytes(rgba),
            DxgiFormat::R32_FLOAT => {
                let red: Vec<f32> = rgba.chunks_exact(4).map(|p| p[0]).collect();
                f32s_to_bytes(&red)
            }
            DxgiFormat::R8_UNORM => rgba.chunks_exact(4).map(|p| unorm8(p[0])).collect(),
            DxgiFormat::R8G8B8A8_UNORM => rgba.iter().map(|&c| unorm8(c)).collect(),
            DxgiFormat::R8G8B8A8_UNORM_SRGB => rgba
                .chunks_exact(4)
                .flat_map(|p| {
                    [
                        unorm8(linear_to_srgb(p[0])),
                        unorm8(linear_to_srgb(p[1])),
                        unorm8(linear_to_srgb(p[2])),
                        unorm8(p[3]),
                    ]
                })
                .collect(),
            _ => {
                return Err(Error::UnsupportedFormat {
                    format: target,
                    operation: "convert",
                })
            }
        };
        Ok(pixels)
    }

    fn transcode(&self, image: &Texture, target: DxgiFormat) -> Result<Texture> {
        let rgba = self.to_rgba_f32(image)?;
        let pixels = self.from_rgba_f32(&rgba, target)?;
        debug!(
            from = %image.format(),
            to = %target,
            width = image.width(),
            height = image.height(),
            "converted texture"
        );
        Ok(Texture::new(image.width(), image.height(), target, pixels))
    }
}

impl TextureCodec for ImageDdsCodec {
    fn load_dds(&self, bytes: &[u8]) -> Result<Option<Texture>> {
        let dds = Dds::read(&mut Cursor::new(bytes)).map_err(|e| Error::Dds(format!("{e:?}")))?;

        let image_format =
            image_dds::dds_image_format(&dds).map_err(|e| Error::Dds(format!("{e:?}")))?;
        let format = from_image_format(image_format).ok_or(Error::UnsupportedFormat {
            format: DxgiFormat::UNKNOWN,
            operation: "load",
        })?;

        let width = dds.header.width;
        let height = dds.header.height;
        let top_level = top_level_size(format, width, height);
        if top_level == 0 || dds.data.len() < top_level {
            return Ok(None);
        }

        Ok(Some(Texture::new(
            width,
            height,
            format,
            dds.data[..top_level].to_vec(),
        )))
    }

    fn decompress(&self, image: &Texture, target: DxgiFormat) -> Result<Texture> {
        if !image.format().is_compressed() {
            return Err(Error::NotCompressed(image.format()));
        }
        self.transcode(image, target)
    }

    fn convert(&self, image: &Texture, target: DxgiFormat) -> Result<Texture> {
        self.transcode(image, target)
    }

    fn encode_to_container(
        &self,
        image: &Texture,
        container: ContainerFormat,
        path: &Path,
    ) -> Result<()> {
        let format = match container {
            ContainerFormat::Tiff => image::ImageFormat::Tiff,
            ContainerFormat::Png => image::ImageFormat::Png,
        };
        let (width, height) = (image.width(), image.height());
        let expected = image.pixel_count() * image.format().bits_per_pixel() as usize / 8;
        let invalid = || Error::InvalidPixelBuffer {
            expected,
            actual: image.pixels().len(),
        };

        match image.format() {
            DxgiFormat::R8G8B8A8_UNORM | DxgiFormat::R8G8B8A8_UNORM_SRGB => {
                image::RgbaImage::from_raw(width, height, image.pixels().to_vec())
                    .ok_or_else(invalid)?
                    .save_with_format(path, format)?;
            }
            DxgiFormat::R8_UNORM => {
                image::GrayImage::from_raw(width, height, image.pixels().to_vec())
                    .ok_or_else(invalid)?
                    .save_with_format(path, format)?;
            }
            DxgiFormat::R32G32B32A32_FLOAT => {
                // Float working images are stored at 16 bits per channel.
                let floats = bytes_to_f32s(image.pixels());
                let floats = image::Rgba32FImage::from_raw(width, height, floats)
                    .ok_or_else(invalid)?;
                image::DynamicImage::ImageRgba32F(floats)
                    .to_rgba16()
                    .save_with_format(path, format)?;
            }
            other => {
                return Err(Error::UnsupportedFormat {
                    format: other,
                    operation: "encode",
                })
            }
        }

        debug!(path = %path.display(), format = %image.format(), "encoded texture");
        Ok(())
    }
}

/// Byte size of the top surface.
fn top_level_size(format: DxgiFormat, width: u32, height: u32) -> usize {
    let (width, height) = (width as usize, height as usize);
    let bpp = format.bits_per_pixel() as usize;
    if format.is_compressed() {
        // 4x4 blocks, 16 pixels per block
        let block_bytes = bpp * 16 / 8;
        width.div_ceil(4).max(1) * height.div_ceil(4).max(1) * block_bytes
    } else {
        width * height * bpp / 8
    }
}

fn to_image_format(format: DxgiFormat) -> Option<image_dds::ImageFormat> {
    use image_dds::ImageFormat as F;

    Some(match format {
        DxgiFormat::R8_UNORM => F::R8Unorm,
        DxgiFormat::R8G8_UNORM => F::Rg8Unorm,
        DxgiFormat::R8G8_SNORM => F::Rg8Snorm,
        DxgiFormat::R8G8B8A8_UNORM => F::Rgba8Unorm,
        DxgiFormat::R8G8B8A8_UNORM_SRGB => F::Rgba8UnormSrgb,
        DxgiFormat::B8G8R8A8_UNORM => F::Bgra8Unorm,
        DxgiFormat::B8G8R8A8_UNORM_SRGB => F::Bgra8UnormSrgb,
        DxgiFormat::R16G16B16A16_FLOAT => F::Rgba16Float,
        DxgiFormat::R32G32B32A32_FLOAT => F::Rgba32Float,
        DxgiFormat::BC1_UNORM => F::BC1RgbaUnorm,
        DxgiFormat::BC1_UNORM_SRGB => F::BC1RgbaUnormSrgb,
        DxgiFormat::BC2_UNORM => F::BC2RgbaUnorm,
        DxgiFormat::BC2_UNORM_SRGB => F::BC2RgbaUnormSrgb,
        DxgiFormat::BC3_UNORM => F::BC3RgbaUnorm,
        DxgiFormat::BC3_UNORM_SRGB => F::BC3RgbaUnormSrgb,
        DxgiFormat::BC4_UNORM => F::BC4RUnorm,
        DxgiFormat::BC4_SNORM => F::BC4RSnorm,
        DxgiFormat::BC5_UNORM => F::BC5RgUnorm,
        DxgiFormat::BC5_SNORM => F::BC5RgSnorm,
        DxgiFormat::BC6H_UF16 => F::BC6hRgbUfloat,
        DxgiFormat::BC6H_SF16 => F::BC6hRgbSfloat,
        DxgiFormat::BC7_UNORM => F::BC7RgbaUnorm,
        DxgiFormat::BC7_UNORM_SRGB => F::BC7RgbaUnormSrgb,
        _ => return None,
    })
}

fn from_image_format(format: image_dds::ImageFormat) -> Option<DxgiFormat> {
    use image_dds::ImageFormat as F;

    Some(match format {
        F::R8Unorm => DxgiFormat::R8_UNORM,
        F::Rg8Unorm => DxgiFormat::R8G8_UNORM,
        F::Rg8Snorm => DxgiFormat::R8G8_SNORM,
        F::Rgba8Unorm => DxgiFormat::R8G8B8A8_UNORM,
        F::Rgba8UnormSrgb => DxgiFormat::R8G8B8A8_UNORM_SRGB,
        F::Bgra8Unorm => DxgiFormat::B8G8R8A8_UNORM,
        F::Bgra8UnormSrgb => DxgiFormat::B8G8R8A8_UNORM_SRGB,
        F::Rgba16Float => DxgiFormat::R16G16B16A16_FLOAT,
        F::Rgba32Float => DxgiFormat::R32G32B32A32_FLOAT,
        F::BC1RgbaUnorm => DxgiFormat::BC1_UNORM,
        F::BC1RgbaUnormSrgb => DxgiFormat::BC1_UNORM_SRGB,
        F::BC2RgbaUnorm => DxgiFormat::BC2_UNORM,
        F::BC2RgbaUnormSrgb => DxgiFormat::BC2_UNORM_SRGB,
        F::BC3RgbaUnorm => DxgiFormat::BC3_UNORM,
        F::BC3RgbaUnormSrgb => DxgiFormat::BC3_UNORM_SRGB,
        F::BC4RUnorm => DxgiFormat::BC4_UNORM,
        F::BC4RSnorm => DxgiFormat::BC4_SNORM,
        F::BC5RgUnorm => DxgiFormat::BC5_UNORM,
        F::BC5RgSnorm => DxgiFormat::BC5_SNORM,
        F::BC6hRgbUfloat => DxgiFormat::BC6H_UF16,
        F::BC6hRgbSfloat => DxgiFormat::BC6H_SF16,
        F::BC7RgbaUnorm => DxgiFormat::BC7_UNORM,
        F::BC7RgbaUnormSrgb => DxgiFormat::BC7_UNORM_SRGB,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_size() {
        assert_eq!(top_level_size(DxgiFormat::BC1_UNORM, 16, 16), 128);
        assert_eq!(top_level_size(DxgiFormat::BC3_UNORM, 16, 16), 256);
        assert_eq!(top_level_size(DxgiFormat::BC1_UNORM, 2, 2), 8);
        assert_eq!(top_level_size(DxgiFormat::R8G8B8A8_UNORM, 3, 5), 60);
        assert_eq!(top_level_size(DxgiFormat::UNKNOWN, 16, 16), 0);
    }

    #[test]
    fn test_format_tables_agree() {
        for code in 0..=120u32 {
            let format = DxgiFormat(code);
            if let Some(image_format) = to_image_format(format) {
                assert_eq!(from_image_format(image_format), Some(format));
            }
        }
    }

    #[test]
    fn test_convert_float_to_rgba8() {
        let codec = ImageDdsCodec::new();
        let source = Texture::new(
            2,
            1,
            DxgiFormat::R32G32B32A32_FLOAT,
            f32s_to_bytes(&[1.0, 0.0, 0.5, 1.0, 0.0, 1.0, 0.0, 0.0]),
        );

        let out = codec.convert(&source, DxgiFormat::R8G8B8A8_UNORM).unwrap();
        assert_eq!(out.format(), DxgiFormat::R8G8B8A8_UNORM);
        assert_eq!(out.pixels(), &[255, 0, 128, 255, 0, 255, 0, 0]);
    }

    #[test]
    fn test_convert_float_to_single_channel() {
        let codec = ImageDdsCodec::new();
        let source = Texture::new(
            2,
            1,
            DxgiFormat::R32G32B32A32_FLOAT,
            f32s_to_bytes(&[0.25, 9.0, 9.0, 9.0, 0.75, 9.0, 9.0, 9.0]),
        );

        let r32 = codec.convert(&source, DxgiFormat::R32_FLOAT).unwrap();
        assert_eq!(bytes_to_f32s(r32.pixels()), vec![0.25, 0.75]);

        let r8 = codec.convert(&source, DxgiFormat::R8_UNORM).unwrap();
        assert_eq!(r8.pixels(), &[64, 191]);
    }

    #[test]
    fn test_srgb_round_trip_through_float() {
        let codec = ImageDdsCodec::new();
        let source = Texture::new(
            1,
            1,
            DxgiFormat::R8G8B8A8_UNORM_SRGB,
            vec![10, 128, 250, 77],
        );

        let linear = codec.convert(&source, DxgiFormat::R32G32B32A32_FLOAT).unwrap();
        let back = codec
            .convert(&linear, DxgiFormat::R8G8B8A8_UNORM_SRGB)
            .unwrap();
        assert_eq!(back.pixels(), &[10, 128, 250, 77]);
    }

    #[test]
    fn test_decompress_requires_block_format() {
        let codec = ImageDdsCodec::new();
        let source = Texture::new(1, 1, DxgiFormat::R8G8B8A8_UNORM, vec![0; 4]);

        assert!(matches!(
            codec.decompress(&source, DxgiFormat::R32G32B32A32_FLOAT),
            Err(Error::NotCompressed(_))
        ));
    }

    #[test]
    fn test_decompress_bc1_block() {
        let codec = ImageDdsCodec::new();
        // Both endpoints white, all indices 0.
        let block = vec![0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0];
        let source = Texture::new(4, 4, DxgiFormat::BC1_UNORM, block);

        let out = codec
            .decompress(&source, DxgiFormat::R8G8B8A8_UNORM)
            .unwrap();
        assert_eq!(out.pixels().len(), 64);
        assert!(out.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let codec = ImageDdsCodec::new();
        let image = Texture::new(4, 4, DxgiFormat::R8G8B8A8_UNORM, vec![0; 10]);

        assert!(matches!(
            codec.encode_to_container(&image, ContainerFormat::Tiff, &dir.path().join("x.tif")),
            Err(Error::InvalidPixelBuffer { expected: 64, actual: 10 })
        ));
    }

    #[test]
    fn test_encode_rgba8_tiff() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tif");
        let codec = ImageDdsCodec::new();
        let pixels: Vec<u8> = (0..16).collect();
        let image = Texture::new(2, 2, DxgiFormat::R8G8B8A8_UNORM, pixels.clone());

        codec
            .encode_to_container(&image, ContainerFormat::Tiff, &path)
            .unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }
}
