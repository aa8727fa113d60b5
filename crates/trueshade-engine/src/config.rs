//! Engine configuration.
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration. Files are looked up in this order:
//!
//! 1. An explicit path (errors are fatal)
//! 2. `$TRUESHADE_CONFIG`
//! 3. `trueshade.yml` / `trueshade.yaml` in the working directory
//!
//! Unreadable or malformed candidates found by the search are skipped with a
//! warning and the built-in defaults apply.
//!
//! ```yaml
//! sampling:
//!   min_samples: 20
//!   luminance_min: 5.0
//!   luminance_max: 250.0
//! clustering:
//!   k: 3
//!   seed: 42        # null draws a fresh seed per request
//! matching:
//!   top_n: 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trueshade_core::{Error, Region, Result};

/// Candidate config file names searched in the working directory.
pub const CONFIG_FILENAMES: &[&str] = &["trueshade.yml", "trueshade.yaml"];

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "TRUESHADE_CONFIG";

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sample filtering and weighting
    pub sampling: SamplingConfig,
    /// Dominant tone extraction
    pub clustering: ClusteringConfig,
    /// Shade ranking
    pub matching: MatchingConfig,
    /// Catalog source selection
    pub catalog: CatalogConfig,
}

/// Aggregator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Minimum number of samples that must survive filtering
    pub min_samples: usize,
    /// Lowest accepted Rec.709 luma on the 0-255 scale
    pub luminance_min: f32,
    /// Highest accepted Rec.709 luma on the 0-255 scale
    pub luminance_max: f32,
    /// Clustering weight per facial region
    pub region_weights: RegionWeights,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            min_samples: 20,
            luminance_min: 5.0,
            luminance_max: 250.0,
            region_weights: RegionWeights::default(),
        }
    }
}

/// Per-region sample weights.
///
/// Forehead and cheeks are the most reliable skin areas; the nose bridge and
/// chin pick up highlights and shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionWeights {
    #[allow(missing_docs)]
    pub forehead: f32,
    #[allow(missing_docs)]
    pub left_cheek: f32,
    #[allow(missing_docs)]
    pub right_cheek: f32,
    #[allow(missing_docs)]
    pub nose_bridge: f32,
    #[allow(missing_docs)]
    pub chin: f32,
}

impl Default for RegionWeights {
    fn default() -> Self {
        Self {
            forehead: 1.5,
            left_cheek: 1.5,
            right_cheek: 1.5,
            nose_bridge: 1.0,
            chin: 1.0,
        }
    }
}

impl RegionWeights {
    /// Same weight for every region.
    pub const fn uniform(weight: f32) -> Self {
        Self {
            forehead: weight,
            left_cheek: weight,
            right_cheek: weight,
            nose_bridge: weight,
            chin: weight,
        }
    }

    /// Weight configured for `region`.
    #[inline]
    pub fn weight(&self, region: Region) -> f32 {
        match region {
            Region::Forehead => self.forehead,
            Region::LeftCheek => self.left_cheek,
            Region::RightCheek => self.right_cheek,
            Region::NoseBridge => self.nose_bridge,
            Region::Chin => self.chin,
        }
    }
}

/// K-means settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Requested cluster count, reduced to the number of distinct colors
    pub k: usize,
    /// Iteration cap
    pub max_iterations: usize,
    /// Convergence threshold on the largest centroid movement (LAB units)
    pub epsilon: f32,
    /// Fixed seed; `None` draws a fresh seed per request
    pub seed: Option<u64>,
    /// Lower L bound for a cluster to count as skin
    pub skin_lightness_min: f32,
    /// Upper L bound for a cluster to count as skin
    pub skin_lightness_max: f32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iterations: 50,
            epsilon: 1e-3,
            seed: Some(42),
            skin_lightness_min: 20.0,
            skin_lightness_max: 90.0,
        }
    }
}

/// Matcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Number of shades kept per brand
    pub top_n: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

/// Catalog settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in catalog is used when unset
    pub path: Option<PathBuf>,
    /// Serve the built-in catalog when `path` cannot be loaded.
    /// Off by default: an explicit path that fails to load is an error.
    pub fallback_builtin: bool,
}

impl EngineConfig {
    /// Parses a YAML document and validates it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| Error::parse(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
            .map_err(|e| Error::invalid_config(format!("{}: {e}", path.display())))
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::parse(e.to_string()))
    }

    /// Checks ranges and consistency.
    pub fn validate(&self) -> Result<()> {
        let s = &self.sampling;
        if s.min_samples == 0 {
            return Err(Error::invalid_config("sampling.min_samples must be at least 1"));
        }
        if !(s.luminance_min < s.luminance_max) {
            return Err(Error::invalid_config(format!(
                "sampling luminance range [{}, {}] is empty",
                s.luminance_min, s.luminance_max
            )));
        }
        for region in Region::ALL {
            let w = s.region_weights.weight(region);
            if !(w > 0.0 && w.is_finite()) {
                return Err(Error::invalid_config(format!(
                    "weight for {region} must be positive, got {w}"
                )));
            }
        }

        let c = &self.clustering;
        if c.k == 0 {
            return Err(Error::invalid_config("clustering.k must be at least 1"));
        }
        if c.max_iterations == 0 {
            return Err(Error::invalid_config("clustering.max_iterations must be at least 1"));
        }
        if !(c.epsilon > 0.0) {
            return Err(Error::invalid_config("clustering.epsilon must be positive"));
        }
        if !(c.skin_lightness_min <= c.skin_lightness_max) {
            return Err(Error::invalid_config(format!(
                "skin lightness range [{}, {}] is inverted",
                c.skin_lightness_min, c.skin_lightness_max
            )));
        }

        if self.matching.top_n == 0 {
            return Err(Error::invalid_config("matching.top_n must be at least 1"));
        }
        Ok(())
    }
}

/// Loaded configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    /// Effective configuration
    pub config: EngineConfig,
    /// File it was read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    /// Problems with skipped candidates
    pub warnings: Vec<String>,
}

/// Loads the configuration, searching the default locations.
///
/// An explicit `custom_path` must exist and be valid.
pub fn load_config(custom_path: Option<&Path>) -> Result<ConfigHandle> {
    if let Some(path) = custom_path {
        let config = EngineConfig::from_yaml_file(path)?;
        return Ok(ConfigHandle {
            config,
            source: Some(path.to_path_buf()),
            warnings: Vec::new(),
        });
    }

    let mut warnings = Vec::new();
    for candidate in config_candidates() {
        if !candidate.is_file() {
            continue;
        }
        match EngineConfig::from_yaml_file(&candidate) {
            Ok(config) => {
                let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                return Ok(ConfigHandle {
                    config,
                    source: Some(source),
                    warnings,
                });
            }
            Err(err) => warnings.push(format!("skipping {}: {err}", candidate.display())),
        }
    }

    Ok(ConfigHandle {
        config: EngineConfig::default(),
        source: None,
        warnings,
    })
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        candidates.push(PathBuf::from(env_path));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILENAMES.iter().map(|name| cwd.join(name)));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sampling.min_samples, 20);
        assert_eq!(config.clustering.k, 3);
        assert_eq!(config.clustering.seed, Some(42));
        assert_eq!(config.matching.top_n, 3);
        assert_eq!(config.sampling.region_weights.weight(Region::LeftCheek), 1.5);
        assert_eq!(config.sampling.region_weights.weight(Region::Chin), 1.0);
    }

    #[test]
    fn test_partial_yaml() {
        let config = EngineConfig::from_yaml_str(
            "clustering:\n  k: 5\n  seed: null\nmatching:\n  top_n: 1\n",
        )
        .unwrap();
        assert_eq!(config.clustering.k, 5);
        assert_eq!(config.clustering.seed, None);
        assert_eq!(config.clustering.max_iterations, 50);
        assert_eq!(config.matching.top_n, 1);
        assert_eq!(config.sampling, SamplingConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EngineConfig::from_yaml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = EngineConfig::default();
        config.catalog.path = Some(PathBuf::from("shades.json"));
        config.catalog.fallback_builtin = true;
        let yaml = config.to_yaml_string().unwrap();
        assert!(yaml.contains("fallback_builtin: true"));
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_validation_failures() {
        let bad = [
            "clustering:\n  k: 0\n",
            "matching:\n  top_n: 0\n",
            "sampling:\n  min_samples: 0\n",
            "sampling:\n  luminance_min: 200\n  luminance_max: 100\n",
            "sampling:\n  region_weights:\n    chin: 0\n",
            "clustering:\n  epsilon: 0\n",
            "clustering:\n  skin_lightness_min: 80\n  skin_lightness_max: 30\n",
        ];
        for yaml in bad {
            let err = EngineConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_malformed_yaml() {
        let err = EngineConfig::from_yaml_str("clustering: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        fs::write(&path, "matching:\n  top_n: 7\n").unwrap();
        let handle = load_config(Some(&path)).unwrap();
        assert_eq!(handle.config.matching.top_n, 7);
        assert_eq!(handle.source.as_deref(), Some(path.as_path()));

        let missing = dir.path().join("missing.yml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
