//! Normal map Z reconstruction.

use byteorder::{ByteOrder, LittleEndian};

use crate::buffer::RGBA_F32_STRIDE;

/// Exponent of the storage curve applied to packed normals.
const PACK_GAMMA: f32 = 2.2;

fn pack_component(v: f32) -> f32 {
    ((v + 1.0) / 2.0).powf(PACK_GAMMA)
}

/// Rebuild the Z component of a two-channel normal map in place.
///
/// Each RGBA32F pixel is read as `(x, y, _, _)` and rewritten as
/// `(y, x, z, 1.0)` with `z = sqrt(max(0, 1 - x² - y²))`, so vectors outside
/// the unit disc get `z = 0` instead of NaN.
///
/// With `pack`, the three components are remapped from `[-1, 1]` to
/// `[0, 1]` and raised to the power 2.2 before being stored. Alpha is always
/// a literal 1.0.
pub fn reconstruct_normal_z(pixels: &mut [u8], pack: bool) {
    for pixel in pixels.chunks_exact_mut(RGBA_F32_STRIDE) {
        let x = LittleEndian::read_f32(&pixel[0..4]);
        let y = LittleEndian::read_f32(&pixel[4..8]);
        let z = (1.0 - x * x - y * y).max(0.0).sqrt();

        let (r, g, b) = if pack {
            (pack_component(y), pack_component(x), pack_component(z))
        } else {
            (y, x, z)
        };

        LittleEndian::write_f32(&mut pixel[0..4], r);
        LittleEndian::write_f32(&mut pixel[4..8], g);
        LittleEndian::write_f32(&mut pixel[8..12], b);
        LittleEndian::write_f32(&mut pixel[12..16], 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bytes_to_f32s, f32s_to_bytes};

    const EPSILON: f32 = 1e-6;

    fn run(input: &[f32], pack: bool) -> Vec<f32> {
        let mut bytes = f32s_to_bytes(input);
        reconstruct_normal_z(&mut bytes, pack);
        bytes_to_f32s(&bytes)
    }

    #[test]
    fn test_unit_disc_reconstruction_swaps_xy() {
        let out = run(&[0.6, 0.0, 123.0, -7.0, 0.0, 0.8, 0.0, 0.0], false);

        assert!((out[0] - 0.0).abs() < EPSILON);
        assert!((out[1] - 0.6).abs() < EPSILON);
        assert!((out[2] - 0.8).abs() < EPSILON);
        assert_eq!(out[3], 1.0);

        assert!((out[4] - 0.8).abs() < EPSILON);
        assert!((out[5] - 0.0).abs() < EPSILON);
        assert!((out[6] - 0.6).abs() < EPSILON);
        assert_eq!(out[7], 1.0);
    }

    #[test]
    fn test_flat_normal_points_up() {
        let out = run(&[0.0, 0.0, 0.0, 0.0], false);
        assert_eq!(out, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_outside_unit_disc_clamps_to_zero() {
        let out = run(&[0.9, 0.9, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0], false);

        assert_eq!(out[2], 0.0);
        assert_eq!(out[6], 0.0);
        assert!(out.iter().all(|v| !v.is_nan()));
        assert_eq!(&out[0..2], &[0.9, 0.9]);
        assert_eq!(&out[4..6], &[1.0, -1.0]);
    }

    #[test]
    fn test_packed_output() {
        let out = run(&[0.6, 0.0, 0.0, 0.0], true);

        let expected_r = 0.5f32.powf(2.2);
        let expected_g = 0.8f32.powf(2.2);
        let expected_b = 0.9f32.powf(2.2);
        assert!((out[0] - expected_r).abs() < EPSILON);
        assert!((out[1] - expected_g).abs() < EPSILON);
        assert!((out[2] - expected_b).abs() < EPSILON);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_packed_extremes() {
        let out = run(&[-1.0, 0.0, 0.0, 0.0], true);

        // y = 0 -> 0.5^2.2, x = -1 -> 0, z = 0 -> 0.5^2.2
        assert!((out[0] - 0.5f32.powf(2.2)).abs() < EPSILON);
        assert_eq!(out[1], 0.0);
        assert!((out[2] - 0.5f32.powf(2.2)).abs() < EPSILON);
    }

    #[test]
    fn test_trailing_partial_pixel_untouched() {
        let mut bytes = f32s_to_bytes(&[0.0, 0.0, 5.0, 5.0]);
        bytes.extend_from_slice(&[9, 9, 9]);
        reconstruct_normal_z(&mut bytes, false);

        assert_eq!(&bytes[16..], &[9, 9, 9]);
        assert_eq!(bytes_to_f32s(&bytes[..16]), vec![0.0, 0.0, 1.0, 1.0]);
    }
}
