//! Batch analysis command

use crate::BatchArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use trueshade_engine::{Analysis, AnalysisRequest, EngineConfig};

pub fn run(args: BatchArgs, config: EngineConfig, verbose: u8) -> Result<()> {
    trace!(pattern = %args.input, "batch::run");

    // Find matching files
    let files: Vec<PathBuf> = glob::glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    info!(files = files.len(), pattern = %args.input, "Starting batch analysis");

    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create: {}", args.output_dir.display()))?;

    let engine = super::build_engine(config, args.catalog, args.top_n)?;

    // Unreadable files fail individually; the rest run as one parallel batch
    let mut loaded: Vec<(usize, AnalysisRequest)> = Vec::with_capacity(files.len());
    let mut failures: Vec<(usize, anyhow::Error)> = Vec::new();
    for (i, path) in files.iter().enumerate() {
        match super::read_request(path) {
            Ok(request) => loaded.push((i, request)),
            Err(e) => failures.push((i, e)),
        }
    }

    let requests: Vec<AnalysisRequest> = loaded.iter().map(|(_, r)| r.clone()).collect();
    let results = engine.analyze_batch(&requests);

    let mut success = 0;
    for ((i, _), result) in loaded.iter().zip(results) {
        let input = &files[*i];
        let written = result
            .with_context(|| format!("Analysis failed: {}", input.display()))
            .and_then(|analysis| write_result(input, &args.output_dir, &analysis, args.debug, verbose));
        match written {
            Ok(()) => success += 1,
            Err(e) => failures.push((*i, e)),
        }
    }

    failures.sort_by_key(|(i, _)| *i);
    for (_, e) in &failures {
        eprintln!("Error: {e:#}");
    }
    let failed = failures.len();

    info!(success = success, failed = failed, "Batch analysis complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }

    Ok(())
}

fn write_result(
    input: &Path,
    output_dir: &Path,
    analysis: &Analysis,
    debug: bool,
    verbose: u8,
) -> Result<()> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let output = output_dir.join(format!("{stem}.result.json"));

    if verbose > 0 {
        println!(
            "{} -> {} ({})",
            input.display(),
            output.display(),
            analysis.profile.code
        );
    }

    if debug {
        super::write_json(&analysis.debug_response(), Some(&output))
    } else {
        super::write_json(&analysis.response(), Some(&output))
    }
}
