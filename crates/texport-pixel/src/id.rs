//! Identifier map quantization.

use byteorder::{ByteOrder, LittleEndian};

use crate::buffer::RGBA_F32_STRIDE;

const INVERSE_GAMMA: f32 = 1.0 / 2.2;

/// Quantize an RGBA32F identifier map to RGBA8.
///
/// Identifier values must never drift into a neighbouring ID, so the linear
/// path floors every channel. For sRGB sources the color channels are first
/// raised to `1/2.2` and then rounded up, while alpha is still floored.
/// Results saturate to `0..=255`.
pub fn quantize_id(pixels: &[u8], srgb: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() / RGBA_F32_STRIDE * 4);

    for pixel in pixels.chunks_exact(RGBA_F32_STRIDE) {
        let r = LittleEndian::read_f32(&pixel[0..4]);
        let g = LittleEndian::read_f32(&pixel[4..8]);
        let b = LittleEndian::read_f32(&pixel[8..12]);
        let a = LittleEndian::read_f32(&pixel[12..16]);

        if srgb {
            out.extend_from_slice(&[
                (r.powf(INVERSE_GAMMA) * 255.0).ceil() as u8,
                (g.powf(INVERSE_GAMMA) * 255.0).ceil() as u8,
                (b.powf(INVERSE_GAMMA) * 255.0).ceil() as u8,
                (a * 255.0).floor() as u8,
            ]);
        } else {
            out.extend_from_slice(&[
                (r * 255.0).floor() as u8,
                (g * 255.0).floor() as u8,
                (b * 255.0).floor() as u8,
                (a * 255.0).floor() as u8,
            ]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::f32s_to_bytes;

    #[test]
    fn test_linear_floors_every_channel() {
        let input = f32s_to_bytes(&[0.004, 0.004, 0.004, 0.004]);
        assert_eq!(quantize_id(&input, false), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_linear_never_rounds_up() {
        // 0.999 * 255 = 254.745
        let input = f32s_to_bytes(&[0.999, 0.5, 0.0, 1.0]);
        assert_eq!(quantize_id(&input, false), vec![254, 127, 0, 255]);
    }

    #[test]
    fn test_srgb_applies_inverse_gamma_then_ceiling() {
        let input = f32s_to_bytes(&[0.5, 0.5, 0.5, 0.5]);
        let out = quantize_id(&input, true);

        // 0.5^(1/2.2) * 255 = 186.07..., rounded up
        assert_eq!(out, vec![187, 187, 187, 127]);
        assert_ne!(out, quantize_id(&input, false));
    }

    #[test]
    fn test_srgb_exact_values_stay_put() {
        let input = f32s_to_bytes(&[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(quantize_id(&input, true), vec![0, 255, 0, 255]);
    }

    #[test]
    fn test_out_of_range_saturates() {
        let input = f32s_to_bytes(&[1.5, -0.25, 2.0, -1.0]);
        assert_eq!(quantize_id(&input, false), vec![255, 0, 255, 0]);
    }

    #[test]
    fn test_output_is_one_byte_per_channel() {
        let input = f32s_to_bytes(&[0.0; 12]);
        assert_eq!(quantize_id(&input, false).len(), 12);
    }
}
