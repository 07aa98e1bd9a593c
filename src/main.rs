//! Binary entrypoint for readable-color.
//!
//! Decodes an image, samples a region and prints a readable foreground color.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use readable_color::config::{self, Configuration};
use readable_color::processing::color::load_image;
use readable_color::{Color, MatchStrategy, Region, match_region};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Linear,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Linear => Self::Linear,
        }
    }
}

/// Simple CLI
#[derive(Debug, Parser)]
#[command(
    name = "readable-color",
    about = "Find a foreground color readable on an image region"
)]
struct Cli {
    /// Image to sample the background from
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Region to sample as X,Y,W,H (defaults to the whole image)
    #[arg(short, long, value_name = "X,Y,W,H")]
    region: Option<Region>,

    /// Starting foreground color, e.g. #336699 (defaults to the background)
    #[arg(short, long, value_name = "HEX")]
    preferred: Option<Color>,

    /// Channel stepping strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Log every search step
    #[arg(long)]
    trace: bool,

    /// Print the full outcome as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("readable_color={}", level).parse()?)
        .add_directive("image=warn".parse()?);
    // stdout carries only the result
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => config::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(region) = cli.region {
        cfg.region = Some(region);
    }
    if let Some(color) = cli.preferred {
        cfg.preferred_color = Some(color);
    }
    if let Some(strategy) = cli.strategy {
        cfg.strategy = strategy.into();
    }
    cfg.verbose |= cli.trace;
    cfg.validate().context("validating configuration")?;

    let img = load_image(&cli.image)
        .with_context(|| format!("decoding {}", cli.image.display()))?;
    let region = cfg
        .region
        .unwrap_or_else(|| Region::covering(img.width(), img.height()));

    let outcome = match_region(&img, region, cfg.preferred_color, &cfg.matcher(), cfg.verbose)
        .with_context(|| format!("sampling region {region} of {}", cli.image.display()))?;
    info!(
        background = %outcome.background,
        steps = outcome.steps,
        readable = outcome.readable,
        "search complete"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.color);
    }
    Ok(())
}
