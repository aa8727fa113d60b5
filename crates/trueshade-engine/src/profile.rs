//! Skin profile assembled from the representative color.

use serde::{Deserialize, Serialize};
use trueshade_color::lab_to_rgb;
use trueshade_core::{LabColor, Undertone};

use crate::classify::{ToneCode, classify};

/// Display colors for the representative tone and its LAB channels.
///
/// Each channel view keeps the lightness so the swatch stays visible:
///
/// | View | LAB rendered |
/// |------|--------------|
/// | `combined` | (L, A, B) |
/// | `l_channel` | (L, 0, 0) |
/// | `a_channel` | (L, A, 0) |
/// | `b_channel` | (L, 0, B) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelColors {
    /// Full representative color
    pub combined: [u8; 3],
    /// Lightness only, a neutral gray
    #[serde(rename = "l_channel")]
    pub l_only: [u8; 3],
    /// Lightness plus the green-red axis
    #[serde(rename = "a_channel")]
    pub a_only: [u8; 3],
    /// Lightness plus the blue-yellow axis
    #[serde(rename = "b_channel")]
    pub b_only: [u8; 3],
}

impl ChannelColors {
    /// Renders the channel views of `lab` as 8-bit sRGB.
    pub fn from_lab(lab: LabColor) -> Self {
        Self {
            combined: lab_to_rgb(lab),
            l_only: lab_to_rgb(lab.lightness_only()),
            a_only: lab_to_rgb(LabColor::new(lab.l, lab.a, 0.0)),
            b_only: lab_to_rgb(LabColor::new(lab.l, 0.0, lab.b)),
        }
    }
}

/// Descriptive result of one analysis. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinProfile {
    /// Representative skin color
    pub representative: LabColor,
    /// Display colors
    pub visualization: ChannelColors,
    /// Undertone class
    pub undertone: Undertone,
    /// `[Depth][Letter][Value]` code
    pub code: ToneCode,
}

impl SkinProfile {
    /// Classifies and renders a representative color.
    pub fn from_lab(representative: LabColor) -> Self {
        let (undertone, code) = classify(representative);
        Self {
            representative,
            visualization: ChannelColors::from_lab(representative),
            undertone,
            code,
        }
    }
}
