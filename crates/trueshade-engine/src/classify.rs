//! Undertone classification and the `[Depth][Letter][Value]` tone code.
//!
//! # Undertone
//!
//! Evaluated in order on the A/B channels:
//!
//! | Undertone | Rule |
//! |-----------|------|
//! | warm | `B > 15 && A > 8` |
//! | cool | `B < 10 && A < 8` |
//! | neutral | anything else |
//!
//! # Tone code
//!
//! Four characters, e.g. `3Y26`:
//!
//! - **Depth** `1`-`7`: seven equal-width lightness buckets over [0, 100].
//!   `1` is the lightest, `7` the deepest.
//! - **Letter**: `Y` warm, `P` cool, `N` neutral. `R` (red-dominant) is part
//!   of the scheme and accepted by the parser, but the undertone rules never
//!   produce it.
//! - **Value** `00`-`99`: `round(sqrt(A² + B²))`, the chroma, clamped and
//!   zero-padded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use trueshade_core::{Error, LabColor, Undertone};

/// Number of depth buckets.
pub const DEPTH_LEVELS: u8 = 7;

const WARM_MIN_B: f32 = 15.0;
const WARM_MIN_A: f32 = 8.0;
const COOL_MAX_B: f32 = 10.0;
const COOL_MAX_A: f32 = 8.0;

/// Classifies the undertone of a LAB color.
#[inline]
pub fn undertone(lab: LabColor) -> Undertone {
    if lab.b > WARM_MIN_B && lab.a > WARM_MIN_A {
        Undertone::Warm
    } else if lab.b < COOL_MAX_B && lab.a < COOL_MAX_A {
        Undertone::Cool
    } else {
        Undertone::Neutral
    }
}

/// Classifies a LAB color into its undertone and tone code.
///
/// # Example
///
/// ```rust
/// use trueshade_core::{LabColor, Undertone};
/// use trueshade_engine::classify;
///
/// let (undertone, code) = classify(LabColor::new(66.1, 14.9, 23.1));
/// assert_eq!(undertone, Undertone::Warm);
/// assert_eq!(code.to_string(), "3Y27");
/// ```
pub fn classify(lab: LabColor) -> (Undertone, ToneCode) {
    let undertone = undertone(lab);
    (undertone, ToneCode::new(lab, undertone))
}

/// Depth bucket for a lightness value, `1` lightest to `7` deepest.
#[inline]
pub fn depth(l: f32) -> u8 {
    let width = 100.0 / DEPTH_LEVELS as f32;
    let bucket = (l.clamp(0.0, 100.0) / width).floor() as u8;
    DEPTH_LEVELS - bucket.min(DEPTH_LEVELS - 1)
}

/// Undertone letter of a tone code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneLetter {
    /// Yellow, warm
    Y,
    /// Red-dominant; reserved
    R,
    /// Pink, cool
    P,
    /// Neutral
    N,
}

impl ToneLetter {
    /// Letter assigned to an undertone.
    pub const fn for_undertone(undertone: Undertone) -> Self {
        match undertone {
            Undertone::Warm => ToneLetter::Y,
            Undertone::Cool => ToneLetter::P,
            Undertone::Neutral => ToneLetter::N,
        }
    }

    /// The letter as a char.
    pub const fn as_char(self) -> char {
        match self {
            ToneLetter::Y => 'Y',
            ToneLetter::R => 'R',
            ToneLetter::P => 'P',
            ToneLetter::N => 'N',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'Y' => Some(ToneLetter::Y),
            'R' => Some(ToneLetter::R),
            'P' => Some(ToneLetter::P),
            'N' => Some(ToneLetter::N),
            _ => None,
        }
    }
}

/// A `[Depth][Letter][Value]` tone code such as `3Y26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ToneCode {
    /// Depth bucket, 1-7
    pub depth: u8,
    /// Undertone letter
    pub letter: ToneLetter,
    /// Chroma value, 0-99
    pub value: u8,
}

impl ToneCode {
    /// Encodes a LAB color with an already classified undertone.
    pub fn new(lab: LabColor, undertone: Undertone) -> Self {
        Self {
            depth: depth(lab.l),
            letter: ToneLetter::for_undertone(undertone),
            value: lab.chroma().round().clamp(0.0, 99.0) as u8,
        }
    }
}

impl fmt::Display for ToneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:02}", self.depth, self.letter.as_char(), self.value)
    }
}

impl FromStr for ToneCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::parse(format!("invalid tone code '{s}'"));
        let chars: Vec<char> = s.trim().chars().collect();
        let [d, l, v1, v2] = chars[..] else {
            return Err(bad());
        };
        let depth = d.to_digit(10).filter(|d| (1..=7).contains(d)).ok_or_else(bad)? as u8;
        let letter = ToneLetter::from_char(l.to_ascii_uppercase()).ok_or_else(bad)?;
        let value = match (v1.to_digit(10), v2.to_digit(10)) {
            (Some(a), Some(b)) => (a * 10 + b) as u8,
            _ => return Err(bad()),
        };
        Ok(Self { depth, letter, value })
    }
}

impl From<ToneCode> for String {
    fn from(code: ToneCode) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for ToneCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undertone_rules() {
        assert_eq!(undertone(LabColor::new(60.0, 12.0, 20.0)), Undertone::Warm);
        assert_eq!(undertone(LabColor::new(60.0, 5.0, 5.0)), Undertone::Cool);
        assert_eq!(undertone(LabColor::new(60.0, 10.0, 12.0)), Undertone::Neutral);
        // Boundaries are strict
        assert_eq!(undertone(LabColor::new(60.0, 8.0, 20.0)), Undertone::Neutral);
        assert_eq!(undertone(LabColor::new(60.0, 12.0, 15.0)), Undertone::Neutral);
        assert_eq!(undertone(LabColor::new(60.0, 7.9, 10.0)), Undertone::Neutral);
    }

    #[test]
    fn test_undertone_partition() {
        // Exactly one class per point; warm and cool never overlap
        for a in -40..=40 {
            for b in -40..=40 {
                let (a, b) = (a as f32 * 0.5, b as f32 * 0.5);
                let warm = b > 15.0 && a > 8.0;
                let cool = b < 10.0 && a < 8.0;
                assert!(!(warm && cool));
                let expected = if warm {
                    Undertone::Warm
                } else if cool {
                    Undertone::Cool
                } else {
                    Undertone::Neutral
                };
                assert_eq!(undertone(LabColor::new(50.0, a, b)), expected);
            }
        }
    }

    #[test]
    fn test_depth_buckets() {
        assert_eq!(depth(100.0), 1);
        assert_eq!(depth(90.0), 1);
        assert_eq!(depth(85.0), 2);
        assert_eq!(depth(50.0), 4);
        assert_eq!(depth(14.0), 7);
        assert_eq!(depth(0.0), 7);
    }

    #[test]
    fn test_depth_monotone() {
        let mut prev = depth(0.0);
        for i in 0..=1000 {
            let d = depth(i as f32 / 10.0);
            assert!((1..=7).contains(&d));
            assert!(d <= prev, "depth rose at L={}", i as f32 / 10.0);
            prev = d;
        }
    }

    #[test]
    fn test_code_format() {
        let (u, code) = classify(LabColor::new(66.1, 14.9, 23.1));
        assert_eq!(u, Undertone::Warm);
        assert_eq!(code.depth, 3);
        assert_eq!(code.value, 27);
        assert_eq!(code.to_string(), "3Y27");

        let (_, pale) = classify(LabColor::new(95.0, 0.6, 0.8));
        assert_eq!(pale.to_string(), "1P01");

        let (_, vivid) = classify(LabColor::new(40.0, 127.0, 127.0));
        assert_eq!(vivid.value, 99);
    }

    #[test]
    fn test_parse() {
        let code: ToneCode = "3Y27".parse().unwrap();
        assert_eq!(code.letter, ToneLetter::Y);
        assert_eq!(code.value, 27);

        let reserved: ToneCode = "4R05".parse().unwrap();
        assert_eq!(reserved.letter, ToneLetter::R);
        assert_eq!(reserved.to_string(), "4R05");

        for bad in ["", "3Y2", "8Y10", "0N10", "3X10", "3Y1a", "3Y100"] {
            assert!(bad.parse::<ToneCode>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let code: ToneCode = "2N08".parse().unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"2N08\"");
        let back: ToneCode = serde_json::from_str("\"2N08\"").unwrap();
        assert_eq!(back, code);
    }
}
