//! CIE XYZ <-> CIELAB and the composed sRGB <-> LAB conversions.
//!
//! # Formula
//!
//! ```text
//! f(t) = t^(1/3)                    if t > (6/29)^3
//!        t / (3 (6/29)^2) + 4/29    otherwise
//!
//! L = 116 f(Y/Yn) - 16
//! a = 500 (f(X/Xn) - f(Y/Yn))
//! b = 200 (f(Y/Yn) - f(Z/Zn))
//! ```

use glam::Vec3;
use trueshade_core::LabColor;

use crate::srgb;
use crate::xyz::{D65_WHITE, rgb_to_xyz, xyz_to_rgb};

const DELTA: f32 = 6.0 / 29.0;
const DELTA_SQ: f32 = DELTA * DELTA;
const DELTA_CUBE: f32 = DELTA_SQ * DELTA;

#[inline]
fn f(t: f32) -> f32 {
    if t > DELTA_CUBE {
        t.cbrt()
    } else {
        t / (3.0 * DELTA_SQ) + 4.0 / 29.0
    }
}

#[inline]
fn f_inv(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA_SQ * (t - 4.0 / 29.0)
    }
}

/// Converts XYZ (D65, Y normalized to 1) to CIELAB.
#[inline]
pub fn xyz_to_lab(xyz: Vec3) -> LabColor {
    let n = xyz / D65_WHITE;
    let (fx, fy, fz) = (f(n.x), f(n.y), f(n.z));
    LabColor::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Converts CIELAB back to XYZ (D65).
#[inline]
pub fn lab_to_xyz(lab: LabColor) -> Vec3 {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    Vec3::new(f_inv(fx), f_inv(fy), f_inv(fz)) * D65_WHITE
}

/// Converts an 8-bit sRGB triplet to CIELAB.
///
/// # Example
///
/// ```rust
/// use trueshade_color::rgb_to_lab;
///
/// let white = rgb_to_lab([255, 255, 255]);
/// assert!((white.l - 100.0).abs() < 0.01);
/// assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);
/// ```
#[inline]
pub fn rgb_to_lab(rgb: [u8; 3]) -> LabColor {
    xyz_to_lab(rgb_to_xyz(srgb::decode_u8(rgb)))
}

/// Converts CIELAB to an 8-bit sRGB triplet, clamping out-of-gamut colors.
#[inline]
pub fn lab_to_rgb(lab: LabColor) -> [u8; 3] {
    srgb::encode_u8(xyz_to_rgb(lab_to_xyz(lab)))
}

/// CIE76 color difference between two LAB colors.
#[inline]
pub fn delta_e_76(a: LabColor, b: LabColor) -> f32 {
    a.delta_e(b)
}
