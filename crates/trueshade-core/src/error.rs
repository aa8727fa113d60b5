//! Error types for TrueShade operations.
//!
//! This module provides a unified error handling system for the analysis
//! pipeline and the catalog layer.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of:
//! - Sample quality checks (too few usable pixels)
//! - Catalog loading and validation
//! - Configuration loading
//!
//! Color conversion has no error path: conversions clamp instead of failing.
//! Degenerate sample sets (every pixel identical) are not an error either;
//! the extractor short-circuits and reports them.
//!
//! # Usage
//!
//! ```rust
//! use trueshade_core::{Error, Result};
//!
//! fn check(valid: usize, required: usize) -> Result<()> {
//!     if valid < required {
//!         return Err(Error::insufficient_sample(valid, required));
//!     }
//!     Ok(())
//! }
//! assert!(check(5, 20).unwrap_err().is_sample_error());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during skin tone analysis and shade matching.
///
/// # Categories
///
/// - **Sample errors**: [`InsufficientSample`](Error::InsufficientSample)
/// - **Catalog errors**: [`EmptyCatalog`](Error::EmptyCatalog), [`InvalidRecord`](Error::InvalidRecord),
///   [`CatalogSource`](Error::CatalogSource)
/// - **Input errors**: [`InvalidHex`](Error::InvalidHex), [`Parse`](Error::Parse)
/// - **Configuration errors**: [`InvalidConfig`](Error::InvalidConfig)
/// - **I/O errors**: [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer usable pixels than the configured minimum survived filtering.
    ///
    /// Detected by the aggregator before clustering runs.
    #[error("insufficient sample: {valid} usable pixels, at least {required} required")]
    InsufficientSample {
        /// Pixels left after luminance filtering
        valid: usize,
        /// Configured minimum
        required: usize,
    },

    /// The catalog, or one requested brand, has no shade records.
    ///
    /// With `brand: None` the whole catalog is empty, which is fatal for
    /// matching. With a brand name only that brand is missing.
    #[error(
        "empty catalog{}",
        .brand.as_ref().map(|b| format!(" for brand '{b}'")).unwrap_or_default()
    )]
    EmptyCatalog {
        /// Brand that had no records, `None` for the whole catalog
        brand: Option<String>,
    },

    /// A hex color string could not be parsed.
    #[error("invalid hex color '{value}': expected #RRGGBB")]
    InvalidHex {
        /// Offending input
        value: String,
    },

    /// A catalog row failed validation.
    #[error("invalid catalog record #{index}: {reason}")]
    InvalidRecord {
        /// Zero-based row index in the source
        index: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// The catalog source could not produce rows.
    #[error("catalog source '{origin}' failed: {message}")]
    CatalogSource {
        /// Source name
        origin: String,
        /// Failure description
        message: String,
    },

    /// Configuration values are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Structured input (JSON, YAML, codes) could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::InsufficientSample`] error.
    #[inline]
    pub fn insufficient_sample(valid: usize, required: usize) -> Self {
        Self::InsufficientSample { valid, required }
    }

    /// Creates an [`Error::EmptyCatalog`] error for the whole catalog.
    #[inline]
    pub fn empty_catalog() -> Self {
        Self::EmptyCatalog { brand: None }
    }

    /// Creates an [`Error::EmptyCatalog`] error for a single brand.
    #[inline]
    pub fn empty_brand(brand: impl Into<String>) -> Self {
        Self::EmptyCatalog {
            brand: Some(brand.into()),
        }
    }

    /// Creates an [`Error::InvalidHex`] error.
    #[inline]
    pub fn invalid_hex(value: impl Into<String>) -> Self {
        Self::InvalidHex {
            value: value.into(),
        }
    }

    /// Creates an [`Error::InvalidRecord`] error.
    #[inline]
    pub fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::CatalogSource`] error.
    #[inline]
    pub fn catalog_source(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CatalogSource {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Creates an [`Error::InvalidConfig`] error.
    #[inline]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates an [`Error::Parse`] error.
    #[inline]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Returns `true` if the error comes from poor input samples.
    #[inline]
    pub fn is_sample_error(&self) -> bool {
        matches!(self, Self::InsufficientSample { .. })
    }

    /// Returns `true` if the error comes from the catalog layer.
    #[inline]
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCatalog { .. } | Self::InvalidRecord { .. } | Self::CatalogSource { .. }
        )
    }

    /// Short message suitable for an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientSample { .. } => {
                "Not enough clear skin was visible. Please retake the photo in better light."
                    .to_string()
            }
            Self::EmptyCatalog { brand: Some(brand) } => {
                format!("No shades are available for {brand}.")
            }
            Self::EmptyCatalog { brand: None }
            | Self::InvalidRecord { .. }
            | Self::CatalogSource { .. } => {
                "The shade catalog is currently unavailable. Please try again later.".to_string()
            }
            _ => "Skin tone analysis failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_sample() {
        let err = Error::insufficient_sample(5, 20);
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("20"));
        assert!(err.is_sample_error());
        assert!(!err.is_catalog_error());
        assert!(err.user_message().contains("better light"));
    }

    #[test]
    fn test_empty_catalog_messages() {
        assert_eq!(Error::empty_catalog().to_string(), "empty catalog");
        let err = Error::empty_brand("Nars");
        assert_eq!(err.to_string(), "empty catalog for brand 'Nars'");
        assert!(err.is_catalog_error());
        assert!(err.user_message().contains("Nars"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_sample_error());
    }

    #[test]
    fn test_record_error() {
        let err = Error::invalid_record(3, "missing shade name");
        assert!(err.to_string().contains("#3"));
        assert!(err.is_catalog_error());
    }
}
