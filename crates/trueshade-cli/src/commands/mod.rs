//! CLI command implementations

pub mod analyze;
pub mod batch;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod convert;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use trueshade_engine::{AnalysisRequest, EngineConfig, ShadeEngine};

/// Applies command line overrides and builds the engine.
pub fn build_engine(
    mut config: EngineConfig,
    catalog: Option<PathBuf>,
    top_n: Option<usize>,
) -> Result<ShadeEngine> {
    if let Some(path) = catalog {
        config.catalog.path = Some(path);
    }
    if let Some(n) = top_n {
        config.matching.top_n = n;
    }
    let source = config
        .catalog
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());
    ShadeEngine::from_config(config)
        .with_context(|| format!("Failed to initialize engine with catalog '{source}'"))
}

/// Reads a sample file.
pub fn read_request(path: &Path) -> Result<AnalysisRequest> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    AnalysisRequest::from_json(&text).with_context(|| format!("Failed to parse: {}", path.display()))
}

/// Writes pretty JSON to `output`, or stdout.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, text + "\n")
                .with_context(|| format!("Failed to write: {}", path.display()))
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_request_bare_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("face.json");
        fs::write(&path, r#"[{"rgb": [200, 150, 120], "region": "chin"}]"#).unwrap();
        let request = read_request(&path).unwrap();
        assert_eq!(request.samples.len(), 1);
        assert_eq!(request.seed, None);
    }

    #[test]
    fn test_read_request_errors_name_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        let err = read_request(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        assert!(read_request(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_build_engine_overrides() {
        let engine = build_engine(EngineConfig::default(), None, Some(1)).unwrap();
        assert_eq!(engine.config().matching.top_n, 1);
        assert!(build_engine(EngineConfig::default(), None, Some(0)).is_err());
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&vec![1, 2, 3], Some(&path)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("]\n"));
    }
}
