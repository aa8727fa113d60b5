//! # trueshade-engine
//!
//! Skin tone analysis and foundation shade matching.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Filter and weight samples | [`aggregate`] | `Vec<WeightedSample>` |
//! | Weighted k-means in LAB | [`cluster`] | representative [`LabColor`](trueshade_core::LabColor) |
//! | Undertone and tone code | [`classify`] | [`Undertone`](trueshade_core::Undertone), [`ToneCode`] |
//! | CIE76 ranking per brand | [`matcher`] | [`MatchResult`] |
//! | Catalog snapshots | [`catalog`] | [`CatalogSnapshot`] |
//!
//! [`ShadeEngine`] runs the whole pipeline and [`AnalysisResponse`] is the
//! wire format.
//!
//! # Usage
//!
//! ```rust
//! use trueshade_core::{PixelSample, Region};
//! use trueshade_engine::{EngineConfig, ShadeEngine};
//!
//! let engine = ShadeEngine::from_config(EngineConfig::default())?;
//! let samples = vec![PixelSample::new([200, 150, 120], Region::Forehead); 30];
//! let response = engine.analyze(&samples)?.response();
//! assert_eq!(response.pantone_family.to_string(), "3Y27");
//! # Ok::<(), trueshade_core::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`trueshade-core`] - Shared types and errors
//! - [`trueshade-color`] - sRGB <-> LAB
//! - [`rand`] - Seeded k-means++ initialization
//! - [`rayon`] - Parallel assignment and batch analysis
//! - [`serde_yaml`], [`serde_json`] - Configuration and catalog files
//! - [`tracing`] - Structured logging

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod profile;
pub mod response;

pub use aggregate::aggregate;
pub use catalog::{
    BuiltinSource, CatalogRow, CatalogSnapshot, CatalogSource, CatalogStore, JsonFileSource,
    StaticSource,
};
pub use classify::{ToneCode, ToneLetter, classify};
pub use cluster::{Cluster, Extraction, extract, extract_detailed};
pub use config::{ConfigHandle, EngineConfig, load_config};
pub use engine::{Analysis, ShadeEngine};
pub use matcher::{MatchResult, ShadeMatch, match_brand, match_shades};
pub use profile::{ChannelColors, SkinProfile};
pub use response::{AnalysisRequest, AnalysisResponse, DebugResponse};
