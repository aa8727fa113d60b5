//! Region-tagged pixel samples.
//!
//! The face/landmark collaborator masks a handful of skin regions and hands
//! over raw 8-bit sRGB pixels, each tagged with the region it came from.
//! These are the only input of an analysis request.
//!
//! # Types
//!
//! - [`Region`] - Facial region a sample was taken from
//! - [`PixelSample`] - One 8-bit sRGB pixel plus its region
//! - [`WeightedSample`] - A sample kept by the aggregator, with its weight

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ============================================================================
// Rec.709 Luminance
// ============================================================================

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Rec.709 luma of an RGB triplet, in the same scale as the input.
///
/// # Example
/// ```
/// use trueshade_core::luminance_rec709;
/// let luma = luminance_rec709([255.0, 255.0, 255.0]);
/// assert!((luma - 255.0).abs() < 0.01);
/// ```
#[inline]
pub fn luminance_rec709(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA[0] + rgb[1] * REC709_LUMA[1] + rgb[2] * REC709_LUMA[2]
}

/// Facial region a pixel sample was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Forehead, above the brow line
    Forehead,
    /// Left cheek
    LeftCheek,
    /// Right cheek
    RightCheek,
    /// Bridge of the nose, prone to specular highlights
    NoseBridge,
    /// Chin, prone to specular highlights and shadow
    Chin,
}

impl Region {
    /// All regions in a stable order.
    pub const ALL: [Region; 5] = [
        Region::Forehead,
        Region::LeftCheek,
        Region::RightCheek,
        Region::NoseBridge,
        Region::Chin,
    ];

    /// Wire name of the region.
    pub const fn as_str(self) -> &'static str {
        match self {
            Region::Forehead => "forehead",
            Region::LeftCheek => "left_cheek",
            Region::RightCheek => "right_cheek",
            Region::NoseBridge => "nose_bridge",
            Region::Chin => "chin",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == key)
            .ok_or_else(|| Error::parse(format!("unknown region '{s}'")))
    }
}

/// One 8-bit sRGB pixel sampled from a masked skin region.
///
/// # Example
///
/// ```rust
/// use trueshade_core::{PixelSample, Region};
///
/// let px = PixelSample::new([200, 150, 120], Region::LeftCheek);
/// assert!(px.luminance() > 150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSample {
    /// Red, green, blue in [0, 255]
    pub rgb: [u8; 3],
    /// Region the pixel came from
    pub region: Region,
}

impl PixelSample {
    /// Creates a sample.
    #[inline]
    pub const fn new(rgb: [u8; 3], region: Region) -> Self {
        Self { rgb, region }
    }

    /// Rec.709 luma on the encoded 8-bit values, in [0, 255].
    #[inline]
    pub fn luminance(&self) -> f32 {
        luminance_rec709([self.rgb[0] as f32, self.rgb[1] as f32, self.rgb[2] as f32])
    }
}

/// A sample accepted by the aggregator together with its clustering weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSample {
    /// The accepted pixel
    pub sample: PixelSample,
    /// Positive weight honored by clustering
    pub weight: f32,
}

impl WeightedSample {
    /// Creates a weighted sample.
    #[inline]
    pub const fn new(sample: PixelSample, weight: f32) -> Self {
        Self { sample, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_roundtrip() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
        }
        assert_eq!("Left-Cheek".parse::<Region>().unwrap(), Region::LeftCheek);
        assert!("ear".parse::<Region>().is_err());
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(PixelSample::new([0, 0, 0], Region::Chin).luminance(), 0.0);
        let white = PixelSample::new([255, 255, 255], Region::Chin).luminance();
        assert!((white - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_sample_json() {
        let px: PixelSample =
            serde_json::from_str(r#"{"rgb":[200,150,120],"region":"nose_bridge"}"#).unwrap();
        assert_eq!(px, PixelSample::new([200, 150, 120], Region::NoseBridge));
    }
}
