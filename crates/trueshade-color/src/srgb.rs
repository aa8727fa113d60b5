//! sRGB transfer function.
//!
//! Piecewise curve with a linear segment near black and a 2.4 power segment
//! above it.
//!
//! # Range
//!
//! - Input/Output: [0, 1]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

/// sRGB EOTF: decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use trueshade_color::srgb::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: encodes linear light to sRGB.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes an 8-bit sRGB triplet to linear [0, 1].
#[inline]
pub fn decode_u8(rgb: [u8; 3]) -> [f32; 3] {
    rgb.map(|c| eotf(c as f32 / 255.0))
}

/// Encodes linear light to an 8-bit sRGB triplet.
///
/// Out-of-gamut values are clamped to [0, 1] before encoding.
#[inline]
pub fn encode_u8(linear: [f32; 3]) -> [u8; 3] {
    linear.map(|c| {
        let v = oetf(c.clamp(0.0, 1.0)) * 255.0;
        v.round().clamp(0.0, 255.0) as u8
    })
}
