//! The analysis pipeline.
//!
//! ```text
//! samples -> aggregate -> extract -> SkinProfile (undertone, code, swatches)
//!                                \-> match_shades (current snapshot)
//! ```
//!
//! Each analysis is independent and side-effect free. The catalog snapshot
//! is taken once per analysis, so a concurrent reload never changes the
//! catalog a request is matched against.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};
use trueshade_core::{PixelSample, Result};

use crate::aggregate::aggregate;
use crate::catalog::{BuiltinSource, CatalogStore, JsonFileSource};
use crate::cluster::{Extraction, extract_detailed, fresh_seed};
use crate::config::EngineConfig;
use crate::matcher::{MatchResult, match_shades};
use crate::profile::SkinProfile;
use crate::response::{AnalysisRequest, AnalysisResponse, DebugDetails, DebugResponse};

/// Outcome of one analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Representative color with undertone, code and swatches
    pub profile: SkinProfile,
    /// Ranked shades per brand
    pub matches: MatchResult,
    /// Clustering details, including the seed used
    pub extraction: Extraction,
    /// Samples received
    pub samples_total: usize,
    /// Samples kept after filtering
    pub samples_kept: usize,
    /// Catalog snapshot version matched against
    pub catalog_version: u64,
}

impl Analysis {
    /// Wire response.
    pub fn response(&self) -> AnalysisResponse {
        AnalysisResponse {
            skin_lab: self.profile.representative.to_array(),
            undertone: self.profile.undertone,
            pantone_family: self.profile.code,
            colors: self.profile.visualization,
            brands: self.matches.shade_names(),
        }
    }

    /// Wire response with diagnostics attached.
    pub fn debug_response(&self) -> DebugResponse {
        DebugResponse {
            response: self.response(),
            debug: DebugDetails {
                samples_total: self.samples_total,
                samples_kept: self.samples_kept,
                extraction: self.extraction.clone(),
                matches: self.matches.clone(),
                catalog_version: self.catalog_version,
            },
        }
    }

    /// Seed that drove clustering.
    pub fn seed(&self) -> u64 {
        self.extraction.seed
    }
}

/// Skin tone analysis and shade matching engine.
///
/// # Example
///
/// ```rust
/// use trueshade_core::{PixelSample, Region};
/// use trueshade_engine::{EngineConfig, ShadeEngine};
///
/// let engine = ShadeEngine::from_config(EngineConfig::default()).unwrap();
/// let samples = vec![PixelSample::new([200, 150, 120], Region::LeftCheek); 40];
/// let analysis = engine.analyze(&samples).unwrap();
/// assert_eq!(analysis.profile.code.to_string(), "3Y27");
/// ```
#[derive(Debug, Clone)]
pub struct ShadeEngine {
    config: EngineConfig,
    catalog: Arc<CatalogStore>,
}

impl ShadeEngine {
    /// Creates an engine over an existing catalog store.
    pub fn new(config: EngineConfig, catalog: Arc<CatalogStore>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, catalog })
    }

    /// Creates an engine, loading the catalog named by `config.catalog.path`
    /// or the built-in catalog.
    ///
    /// A path that fails to load is an error unless
    /// `config.catalog.fallback_builtin` is set, in which case the built-in
    /// catalog is served instead.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let store = match &config.catalog.path {
            Some(path) => match CatalogStore::load(JsonFileSource::new(path)) {
                Ok(store) => store,
                Err(err) if config.catalog.fallback_builtin => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "catalog unavailable, falling back to the built-in catalog"
                    );
                    CatalogStore::load(BuiltinSource)?
                }
                Err(err) => return Err(err),
            },
            None => CatalogStore::load(BuiltinSource)?,
        };
        Self::new(config, Arc::new(store))
    }

    /// Effective configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Catalog store, for reloads and summaries.
    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Analyzes samples with the configured seed, or a fresh one.
    pub fn analyze(&self, samples: &[PixelSample]) -> Result<Analysis> {
        let seed = self.config.clustering.seed.unwrap_or_else(fresh_seed);
        self.analyze_with_seed(samples, seed)
    }

    /// Analyzes samples with an explicit clustering seed.
    pub fn analyze_with_seed(&self, samples: &[PixelSample], seed: u64) -> Result<Analysis> {
        let kept = aggregate(samples, &self.config.sampling)?;
        let extraction = extract_detailed(&kept, &self.config.clustering, seed)?;
        let profile = SkinProfile::from_lab(extraction.representative);

        let snapshot = self.catalog.current();
        let matches = match_shades(profile.representative, &snapshot, self.config.matching.top_n)?;

        debug!(
            seed,
            code = %profile.code,
            undertone = %profile.undertone,
            catalog_version = snapshot.version(),
            "analysis complete"
        );

        Ok(Analysis {
            profile,
            matches,
            extraction,
            samples_total: samples.len(),
            samples_kept: kept.len(),
            catalog_version: snapshot.version(),
        })
    }

    /// Analyzes one request, honoring its seed override.
    pub fn analyze_request(&self, request: &AnalysisRequest) -> Result<Analysis> {
        match request.seed {
            Some(seed) => self.analyze_with_seed(&request.samples, seed),
            None => self.analyze(&request.samples),
        }
    }

    /// Analyzes independent requests on the rayon pool.
    ///
    /// Results keep request order. Each request uses its own seed, so a
    /// batch result equals the result of analyzing that request alone.
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<Result<Analysis>> {
        info!(requests = requests.len(), "batch analysis");
        requests.par_iter().map(|r| self.analyze_request(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRow, StaticSource};
    use trueshade_color::rgb_to_lab;
    use trueshade_core::{Error, Region, Undertone};

    fn engine() -> ShadeEngine {
        ShadeEngine::from_config(EngineConfig::default()).unwrap()
    }

    fn uniform(rgb: [u8; 3], n: usize) -> Vec<PixelSample> {
        Region::ALL
            .iter()
            .cycle()
            .take(n)
            .map(|&r| PixelSample::new(rgb, r))
            .collect()
    }

    #[test]
    fn test_uniform_samples_degenerate_path() {
        let analysis = engine().analyze(&uniform([200, 150, 120], 40)).unwrap();
        assert!(analysis.extraction.degenerate);
        assert_eq!(analysis.profile.representative, rgb_to_lab([200, 150, 120]));
        assert_eq!(analysis.profile.undertone, Undertone::Warm);
        assert_eq!(analysis.profile.code.to_string(), "3Y27");
        assert_eq!(analysis.samples_kept, 40);
    }

    #[test]
    fn test_insufficient_samples() {
        let err = engine().analyze(&uniform([200, 150, 120], 5)).unwrap_err();
        assert!(matches!(err, Error::InsufficientSample { valid: 5, required: 20 }));
    }

    #[test]
    fn test_response_has_every_brand() {
        let response = engine().analyze(&uniform([200, 150, 120], 40)).unwrap().response();
        let brands: Vec<&str> = response.brands.keys().map(String::as_str).collect();
        assert_eq!(brands, ["fenty", "nars", "tooFaced"]);
        assert!(response.brands.values().all(|v| v.len() == 3));
    }

    #[test]
    fn test_exact_catalog_shade_first() {
        let rows = vec![
            CatalogRow::new("house", "light", "#F0D0C0"),
            CatalogRow::new("house", "match", "#C89678"),
            CatalogRow::new("house", "deep", "#603020"),
        ];
        let store = CatalogStore::load(StaticSource::new("test", rows)).unwrap();
        let engine = ShadeEngine::new(EngineConfig::default(), Arc::new(store)).unwrap();
        let analysis = engine.analyze(&uniform([200, 150, 120], 25)).unwrap();
        let house = analysis.matches.brand("house").unwrap();
        assert_eq!(house[0].shade.shade_name, "match");
        assert_eq!(house[0].delta_e, 0.0);
    }

    #[test]
    fn test_fresh_seed_reported() {
        let mut config = EngineConfig::default();
        config.clustering.seed = None;
        let engine = ShadeEngine::from_config(config).unwrap();
        let mut samples = uniform([200, 150, 120], 30);
        samples.extend(uniform([150, 100, 80], 30));
        let a = engine.analyze(&samples).unwrap();
        let b = engine.analyze_with_seed(&samples, a.seed()).unwrap();
        assert_eq!(a.profile, b.profile);
    }

    #[test]
    fn test_batch_matches_individual() {
        let engine = engine();
        let mut mixed = uniform([200, 150, 120], 30);
        mixed.extend(uniform([120, 85, 60], 25));
        let requests = vec![
            AnalysisRequest::new(mixed.clone()).with_seed(11),
            AnalysisRequest::new(uniform([200, 150, 120], 3)),
            AnalysisRequest::new(mixed.clone()).with_seed(12),
        ];
        let results = engine.analyze_batch(&requests);
        assert_eq!(results.len(), 3);
        assert!(results[1].as_ref().unwrap_err().is_sample_error());

        let solo = engine.analyze_with_seed(&mixed, 11).unwrap();
        let batched = results[0].as_ref().unwrap();
        assert_eq!(batched.profile, solo.profile);
        assert_eq!(batched.response(), solo.response());
    }

    #[test]
    fn test_missing_catalog_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EngineConfig::default();
        config.catalog.path = Some(dir.path().join("missing.json"));
        let err = ShadeEngine::from_config(config.clone()).unwrap_err();
        assert!(err.is_catalog_error());

        config.catalog.fallback_builtin = true;
        let engine = ShadeEngine::from_config(config).unwrap();
        assert_eq!(engine.catalog().source_name(), "builtin");
        assert_eq!(engine.catalog().current().len(), 89);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.matching.top_n = 0;
        assert!(matches!(ShadeEngine::from_config(config), Err(Error::InvalidConfig(_))));
    }
}
