//! Single file analysis

use crate::AnalyzeArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use trueshade_engine::EngineConfig;

pub fn run(args: AnalyzeArgs, config: EngineConfig, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "analyze::run");

    let engine = super::build_engine(config, args.catalog, args.top_n)?;
    let request = super::read_request(&args.input)?;

    let seed = args.seed.or(request.seed);
    let result = match seed {
        Some(seed) => engine.analyze_with_seed(&request.samples, seed),
        None => engine.analyze(&request.samples),
    };
    let analysis = result
        .inspect_err(|e| {
            if e.is_sample_error() {
                eprintln!("{}", e.user_message());
            }
        })
        .with_context(|| format!("Analysis failed: {}", args.input.display()))?;

    info!(
        code = %analysis.profile.code,
        undertone = %analysis.profile.undertone,
        seed = analysis.seed(),
        "analyzed {}",
        args.input.display()
    );
    if verbose > 0 {
        eprintln!(
            "{}: {} kept of {} samples, seed {}",
            args.input.display(),
            analysis.samples_kept,
            analysis.samples_total,
            analysis.seed()
        );
    }

    if args.debug {
        super::write_json(&analysis.debug_response(), args.output.as_deref())
    } else {
        super::write_json(&analysis.response(), args.output.as_deref())
    }
}
