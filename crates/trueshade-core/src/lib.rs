//! # trueshade-core
//!
//! Core types for skin tone analysis and shade matching.
//!
//! This crate provides the foundational types used throughout the TrueShade workspace:
//!
//! - [`PixelSample`], [`Region`] - Region-tagged RGB samples from the face collaborator
//! - [`LabColor`] - Clamped CIELAB value type
//! - [`ShadeRecord`], [`Undertone`] - Catalog shade records
//! - [`Error`] - Unified error type for the engine
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other TrueShade crates depend on it:
//!
//! ```text
//! trueshade-core (this crate)
//!    ^
//!    |
//!    +-- trueshade-color (sRGB <-> LAB conversion)
//!    +-- trueshade-engine (aggregation, clustering, classification, matching)
//!    +-- trueshade-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod lab;
pub mod sample;
pub mod shade;

pub use error::*;
pub use lab::LabColor;
pub use sample::{luminance_rec709, PixelSample, Region, WeightedSample, REC709_LUMA};
pub use shade::{ShadeRecord, Undertone};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use trueshade_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::lab::LabColor;
    pub use crate::sample::{PixelSample, Region, WeightedSample};
    pub use crate::shade::{ShadeRecord, Undertone};
}
