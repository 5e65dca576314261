//! Karst CLI binary.
//!
//! Reads a CSV panel, computes the momentum factor with its standardized and
//! neutralized forms, and writes the augmented panel back to CSV.
//!
//! Usage: `karst --input panel.csv --output factors.csv [--config karst.json]`

use std::{fs::File, path::PathBuf, process};

use clap::Parser;
use karst::{
    pipeline::{FactorPipeline, PipelineConfig},
    primitives::IndustrySource,
    utils::{read_panel_csv, write_panel_csv},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "karst")]
#[command(about = "Vol-adjusted momentum with per-date standardization and neutralization", long_about = None)]
#[command(version)]
struct Cli {
    /// Input panel (CSV with a header row)
    #[arg(long)]
    input: PathBuf,

    /// Output path for the augmented panel
    #[arg(long)]
    output: PathBuf,

    /// JSON pipeline configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Momentum look-back in observations
    #[arg(long)]
    lookback: Option<usize>,

    /// MADs kept on each side of the median
    #[arg(long)]
    mad_multiple: Option<f64>,

    /// Minimum valid rows per regression date
    #[arg(long)]
    min_observations: Option<usize>,

    /// Categorical industry label column
    #[arg(long, conflicts_with = "industry_prefix")]
    industry_column: Option<String>,

    /// Prefix of 0/1 industry indicator columns
    #[arg(long)]
    industry_prefix: Option<String>,

    /// Entity identifier column
    #[arg(long)]
    entity_column: Option<String>,

    /// Date column
    #[arg(long)]
    date_column: Option<String>,

    /// Close price column
    #[arg(long)]
    close_column: Option<String>,

    /// Market capitalization column
    #[arg(long)]
    market_cap_column: Option<String>,

    /// Fit dates on one thread
    #[arg(long)]
    sequential: bool,

    /// Fail when industry indicators are not one-hot
    #[arg(long)]
    strict_one_hot: bool,
}

fn main() {
    setup_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let panel = read_panel_csv(&cli.input, &config.schema.entity)?;
    info!(path = %cli.input.display(), rows = panel.height(), "loaded panel");

    let pipeline = FactorPipeline::new(config)?;
    let (mut panel, report) = pipeline.run(panel)?;

    write_panel_csv(&mut panel, &cli.output)?;
    info!(path = %cli.output.display(), "wrote panel");

    println!("{report}");
    Ok(())
}

/// Load the JSON configuration, if any, and apply flag overrides.
fn build_config(cli: &Cli) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => PipelineConfig::default(),
    };

    if let Some(lookback) = cli.lookback {
        config.momentum.lookback = lookback;
    }
    if let Some(multiple) = cli.mad_multiple {
        config.standardize.mad_multiple = multiple;
    }
    if let Some(min) = cli.min_observations {
        config.neutralize.min_observations = min;
    }

    let schema = &mut config.schema;
    if let Some(column) = &cli.industry_column {
        schema.industry = IndustrySource::categorical(column.clone());
    }
    if let Some(prefix) = &cli.industry_prefix {
        schema.industry = IndustrySource::prefix(prefix.clone());
    }
    if let Some(column) = &cli.entity_column {
        schema.entity.clone_from(column);
    }
    if let Some(column) = &cli.date_column {
        schema.date.clone_from(column);
    }
    if let Some(column) = &cli.close_column {
        schema.close.clone_from(column);
    }
    if let Some(column) = &cli.market_cap_column {
        schema.market_cap.clone_from(column);
    }

    if cli.sequential {
        config.neutralize.parallel = false;
    }
    if cli.strict_one_hot {
        config.strict_one_hot = true;
    }

    Ok(config)
}
