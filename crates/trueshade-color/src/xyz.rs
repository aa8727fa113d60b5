//! Linear sRGB <-> CIE XYZ (D65).

use glam::{Mat3, Vec3};

/// D65 reference white in XYZ, normalized to Y = 1.
pub const D65_WHITE: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

// glam matrices are column-major; each Vec3 below is one column.

/// Linear sRGB to XYZ (D65) matrix.
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_cols(
    Vec3::new(0.4124564, 0.2126729, 0.0193339),
    Vec3::new(0.3575761, 0.7151522, 0.1191920),
    Vec3::new(0.1804375, 0.0721750, 0.9503041),
);

/// XYZ (D65) to linear sRGB matrix.
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_cols(
    Vec3::new(3.2404542, -0.9692660, 0.0556434),
    Vec3::new(-1.5371385, 1.8760108, -0.2040259),
    Vec3::new(-0.4985314, 0.0415560, 1.0572252),
);

/// Converts linear sRGB to XYZ.
#[inline]
pub fn rgb_to_xyz(linear: [f32; 3]) -> Vec3 {
    SRGB_TO_XYZ * Vec3::from_array(linear)
}

/// Converts XYZ to linear sRGB. The result may fall outside [0, 1].
#[inline]
pub fn xyz_to_rgb(xyz: Vec3) -> [f32; 3] {
    (XYZ_TO_SRGB * xyz).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_white_maps_to_d65() {
        let xyz = rgb_to_xyz([1.0, 1.0, 1.0]);
        assert_abs_diff_eq!(xyz.x, D65_WHITE.x, epsilon = 1e-4);
        assert_abs_diff_eq!(xyz.y, D65_WHITE.y, epsilon = 1e-4);
        assert_abs_diff_eq!(xyz.z, D65_WHITE.z, epsilon = 1e-4);
    }

    #[test]
    fn test_matrices_are_inverse() {
        let id = XYZ_TO_SRGB * SRGB_TO_XYZ;
        assert!(id.abs_diff_eq(Mat3::IDENTITY, 1e-5));
    }

    #[test]
    fn test_red_luminance() {
        // Y row of the matrix is the Rec.709 luma weighting
        let xyz = rgb_to_xyz([1.0, 0.0, 0.0]);
        assert_abs_diff_eq!(xyz.y, 0.2126729, epsilon = 1e-6);
    }
}
