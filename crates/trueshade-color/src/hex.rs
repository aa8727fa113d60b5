//! `#RRGGBB` parsing and formatting.

use trueshade_core::{Error, LabColor, Result};

use crate::lab::{lab_to_rgb, rgb_to_lab};

/// Parses `#RRGGBB` or `RRGGBB` (case-insensitive) into an 8-bit triplet.
///
/// # Example
///
/// ```rust
/// use trueshade_color::parse_hex;
///
/// assert_eq!(parse_hex("#C89678").unwrap(), [200, 150, 120]);
/// assert_eq!(parse_hex("c89678").unwrap(), [200, 150, 120]);
/// assert!(parse_hex("#C8967").is_err());
/// ```
pub fn parse_hex(value: &str) -> Result<[u8; 3]> {
    let digits = value.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::invalid_hex(value));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::invalid_hex(value))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Formats an 8-bit triplet as uppercase `#RRGGBB`.
#[inline]
pub fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Parses a hex color and converts it to LAB.
pub fn hex_to_lab(value: &str) -> Result<LabColor> {
    parse_hex(value).map(rgb_to_lab)
}

/// Converts a LAB color to its nearest displayable `#RRGGBB`.
#[inline]
pub fn lab_to_hex(lab: LabColor) -> String {
    format_hex(lab_to_rgb(lab))
}
