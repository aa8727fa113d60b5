//! Catalog shade records and undertone classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, LabColor};

/// Coarse undertone class derived from the A/B chromaticity channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    /// Yellow/golden leaning
    Warm,
    /// Pink/blue leaning
    Cool,
    /// Balanced
    #[default]
    Neutral,
}

impl Undertone {
    /// Wire name of the undertone.
    pub const fn as_str(self) -> &'static str {
        match self {
            Undertone::Warm => "warm",
            Undertone::Cool => "cool",
            Undertone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Undertone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warm" => Ok(Undertone::Warm),
            "cool" => Ok(Undertone::Cool),
            "neutral" => Ok(Undertone::Neutral),
            other => Err(Error::parse(format!("unknown undertone '{other}'"))),
        }
    }
}

/// One product shade as held by a catalog snapshot.
///
/// Records are read-only once a snapshot is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeRecord {
    /// Brand display name, e.g. "Fenty"
    pub brand: String,
    /// Product line, e.g. "Fenty Pro Filt'r Foundation"
    pub product_line: String,
    /// Shade name as printed on the product
    pub shade_name: String,
    /// Display color as `#RRGGBB`
    pub hex: String,
    /// Perceptual color used for matching
    pub lab: LabColor,
    /// Undertone declared by the catalog
    pub undertone: Undertone,
}
