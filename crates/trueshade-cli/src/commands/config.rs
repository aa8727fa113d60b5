//! Effective configuration command

use crate::ConfigArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use std::path::PathBuf;
use trueshade_engine::EngineConfig;

pub fn run(args: ConfigArgs, config: EngineConfig, source: Option<PathBuf>) -> Result<()> {
    trace!(output = ?args.output, "config::run");

    let origin = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    let yaml = config.to_yaml_string()?;
    let text = format!("# trueshade configuration (from {origin})\n{yaml}");

    match args.output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!(path = %path.display(), "wrote configuration");
        }
        None => print!("{text}"),
    }
    Ok(())
}
