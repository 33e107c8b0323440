//! Owned texture surfaces.

use texport_dds::DxgiFormat;

/// The top surface of a loaded or converted texture.
///
/// A `Texture` owns its pixel storage; dropping it releases everything, on
/// success and error paths alike.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    format: DxgiFormat,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wrap raw pixel (or block) storage.
    pub fn new(width: u32, height: u32, format: DxgiFormat, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> DxgiFormat {
        self.format
    }

    /// Number of pixels in the surface.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access for in-place pixel transforms.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
