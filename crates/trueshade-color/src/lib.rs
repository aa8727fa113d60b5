//! # trueshade-color
//!
//! Pure, total conversions between 8-bit sRGB and CIELAB (D65).
//!
//! # Pipeline
//!
//! ```text
//! sRGB u8 --decode--> linear RGB --matrix--> XYZ --f(t)--> LAB
//!         <-encode--             <-matrix--      <-f^-1--
//! ```
//!
//! Every stage is public so callers can inspect intermediate values. The
//! composed [`rgb_to_lab`] / [`lab_to_rgb`] pair round-trips every 8-bit
//! color within one code value per channel. [`lab_to_rgb`] clamps colors
//! outside the sRGB gamut.
//!
//! # Usage
//!
//! ```rust
//! use trueshade_color::{rgb_to_lab, lab_to_rgb, delta_e_76};
//!
//! let skin = rgb_to_lab([200, 150, 120]);
//! let back = lab_to_rgb(skin);
//! assert!(back.iter().zip([200u8, 150, 120]).all(|(a, b)| a.abs_diff(b) <= 1));
//!
//! let other = rgb_to_lab([198, 148, 121]);
//! assert!(delta_e_76(skin, other) < 2.0);
//! ```
//!
//! # Dependencies
//!
//! - [`trueshade-core`] - [`LabColor`](trueshade_core::LabColor) and errors
//! - [`glam`] - 3x3 matrix math

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod hex;
pub mod lab;
pub mod srgb;
pub mod xyz;

pub use hex::{format_hex, hex_to_lab, lab_to_hex, parse_hex};
pub use lab::{delta_e_76, lab_to_rgb, lab_to_xyz, rgb_to_lab, xyz_to_lab};
pub use xyz::{rgb_to_xyz, xyz_to_rgb, D65_WHITE, SRGB_TO_XYZ, XYZ_TO_SRGB};
