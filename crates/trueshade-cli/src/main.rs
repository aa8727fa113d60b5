//! trueshade - skin tone analysis and foundation shade matching CLI
//!
//! Drives the analysis engine on region-tagged pixel samples exported by a
//! face/landmark detector.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "trueshade")]
#[command(author, version, about = "Skin tone analysis and foundation shade matching")]
#[command(long_about = "
Estimates a representative skin tone from region-tagged pixel samples,
classifies its undertone and tone code, and ranks foundation shades per brand.

Sample files are JSON: {\"samples\": [{\"rgb\": [200,150,120], \"region\": \"left_cheek\"}], \"seed\": 42}
or a bare array of samples.

Examples:
  trueshade analyze face.json                 # Response JSON on stdout
  trueshade analyze face.json --debug         # Add clustering details
  trueshade analyze face.json --catalog shades.json --top-n 5
  trueshade batch 'captures/*.json' -o results/
  trueshade classify 66.1 14.9 23.1           # Undertone and tone code
  trueshade convert '#C89678'                 # Hex/RGB/LAB conversions
  trueshade convert lab:62.5,14.2,20.1
  trueshade catalog --brand fenty             # Inspect the catalog
  trueshade config -o trueshade.yml           # Write effective config
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Configuration file (default: $TRUESHADE_CONFIG, ./trueshade.yml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one sample file
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Analyze many sample files in parallel
    Batch(BatchArgs),

    /// Classify a LAB color
    Classify(ClassifyArgs),

    /// Convert between RGB, hex and LAB
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Show the shade catalog
    Catalog(CatalogArgs),

    /// Print or write the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Sample file (JSON)
    input: PathBuf,

    /// JSON catalog file (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Clustering seed (overrides request and config)
    #[arg(long)]
    seed: Option<u64>,

    /// Shades kept per brand
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Include clustering and distance details
    #[arg(long)]
    debug: bool,

    /// Write the response here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    /// Input glob pattern (e.g. "captures/*.json")
    input: String,

    /// Output directory, one `<stem>.result.json` per input
    #[arg(short, long)]
    output_dir: PathBuf,

    /// JSON catalog file (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Shades kept per brand
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Include clustering and distance details
    #[arg(long)]
    debug: bool,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Lightness [0, 100]
    l: f32,

    /// Green-red axis
    #[arg(allow_hyphen_values = true)]
    a: f32,

    /// Blue-yellow axis
    #[arg(allow_hyphen_values = true)]
    b: f32,

    /// JSON output
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Color: `200,150,120`, `#C89678` or `lab:62.5,14.2,20.1`
    #[arg(allow_hyphen_values = true)]
    color: String,

    /// JSON output
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CatalogArgs {
    /// JSON catalog file (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// List the shades of one brand
    #[arg(short, long)]
    brand: Option<String>,

    /// JSON output
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Write to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let handle = trueshade_engine::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    for w in &handle.warnings {
        warn!("{w}");
    }
    let config = handle.config;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, config, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, config, cli.verbose),
        Commands::Classify(args) => commands::classify::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Catalog(args) => commands::catalog::run(args, config, cli.verbose),
        Commands::Config(args) => commands::config::run(args, config, handle.source),
    }
}
