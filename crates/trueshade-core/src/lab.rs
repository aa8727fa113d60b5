//! CIELAB value type.
//!
//! [`LabColor`] is the perceptual color currency of the engine: samples are
//! clustered in LAB, the representative skin tone is a LAB centroid and
//! catalog shades are ranked by Euclidean distance in LAB (CIE76).
//!
//! # Ranges
//!
//! | Channel | Range | Meaning |
//! |---------|-------|---------|
//! | `l` | [0, 100] | Lightness |
//! | `a` | [-128, 127] | Green (-) to red (+) |
//! | `b` | [-128, 127] | Blue (-) to yellow (+) |
//!
//! Every constructor clamps into these ranges, so a `LabColor` always
//! satisfies them. NaN components collapse to 0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the lightness channel.
pub const L_MIN: f32 = 0.0;
/// Upper bound of the lightness channel.
pub const L_MAX: f32 = 100.0;
/// Lower bound of the chromaticity channels.
pub const AB_MIN: f32 = -128.0;
/// Upper bound of the chromaticity channels.
pub const AB_MAX: f32 = 127.0;

/// A CIELAB color (D65 reference white).
///
/// Serialized as a `[L, A, B]` array.
///
/// # Example
///
/// ```rust
/// use trueshade_core::LabColor;
///
/// let skin = LabColor::new(65.2, 12.4, 18.6);
/// let shade = LabColor::new(64.0, 13.0, 20.0);
/// assert!(skin.delta_e(shade) < 2.0);
///
/// // Out-of-range input is clamped
/// assert_eq!(LabColor::new(140.0, 0.0, 0.0).l, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct LabColor {
    /// Lightness in [0, 100]
    pub l: f32,
    /// Green-red axis in [-128, 127]
    pub a: f32,
    /// Blue-yellow axis in [-128, 127]
    pub b: f32,
}

#[inline]
fn clamp_channel(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(lo, hi) }
}

impl LabColor {
    /// Creates a LAB color, clamping each channel into its valid range.
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self {
            l: clamp_channel(l, L_MIN, L_MAX),
            a: clamp_channel(a, AB_MIN, AB_MAX),
            b: clamp_channel(b, AB_MIN, AB_MAX),
        }
    }

    /// Creates a LAB color from an `[L, A, B]` array.
    #[inline]
    pub fn from_array(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Returns the color as an `[L, A, B]` array.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.l, self.a, self.b]
    }

    /// Squared Euclidean distance in LAB.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// CIE76 color difference: Euclidean distance in LAB.
    #[inline]
    pub fn delta_e(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Chroma, the magnitude of the (A, B) vector.
    #[inline]
    pub fn chroma(self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Same lightness with both chromaticity axes zeroed.
    #[inline]
    pub fn lightness_only(self) -> Self {
        Self::new(self.l, 0.0, 0.0)
    }
}

impl From<[f32; 3]> for LabColor {
    fn from(v: [f32; 3]) -> Self {
        Self::from_array(v)
    }
}

impl From<LabColor> for [f32; 3] {
    fn from(lab: LabColor) -> Self {
        lab.to_array()
    }
}

impl fmt::Display for LabColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L*{:.2} a*{:.2} b*{:.2}", self.l, self.a, self.b)
    }
}
