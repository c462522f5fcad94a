//! Twister CLI - Command Line Operations for Independent Random Streams
//!
//! # Commands
//!
//! - `twister draw --kind gaussian --count 5` - Draw values, optionally resuming from
//!   and writing checkpoint files
//! - `twister state --kind uniform --skip 100` - Print the checkpoint text of a stream
//! - `twister streams --kind uniform --streams 8` - Run independent streams in parallel
//! - `twister check` - Verify golden vectors and checkpoint round trips
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate is the only place where
//! checkpoint text touches the file system; `twister_core` stays pure.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod stream;

pub use error::{CliError, Result};

use config::{build_config, CliArgs as ConfigCliArgs, TwisterConfig};
use stream::{GeneratorParams, Kind};

/// Deterministic, checkpointable random streams
#[derive(Parser)]
#[command(name = "twister")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Generator selection shared by all drawing commands
#[derive(Args, Debug)]
struct GeneratorArgs {
    /// Kind of values to draw
    #[arg(short, long, value_enum, default_value = "uniform")]
    kind: Kind,

    /// Seed (overrides config)
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i32>,

    /// Uniform lower bound
    #[arg(long, allow_negative_numbers = true)]
    lower: Option<f64>,

    /// Uniform upper bound
    #[arg(long, allow_negative_numbers = true)]
    upper: Option<f64>,

    /// Gaussian mean
    #[arg(long, allow_negative_numbers = true)]
    mean: Option<f64>,

    /// Gaussian standard deviation
    #[arg(long, allow_negative_numbers = true)]
    stddev: Option<f64>,
}

impl GeneratorArgs {
    fn resolve(&self, config: &TwisterConfig) -> GeneratorParams {
        let defaults = GeneratorParams::from_config(config);
        GeneratorParams {
            seed: self.seed.unwrap_or(defaults.seed),
            lower: self.lower.unwrap_or(defaults.lower),
            upper: self.upper.unwrap_or(defaults.upper),
            mean: self.mean.unwrap_or(defaults.mean),
            stddev: self.stddev.unwrap_or(defaults.stddev),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Draw values from a stream
    Draw {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// Number of values (overrides config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Resume from a checkpoint file instead of seeding
        #[arg(short, long, value_name = "FILE")]
        resume: Option<PathBuf>,

        /// Write the final state to this file
        #[arg(long, value_name = "FILE")]
        checkpoint: Option<PathBuf>,

        /// Output format (plain, json)
        #[arg(short, long, default_value = "plain")]
        format: String,
    },

    /// Print the checkpoint text of a seeded stream
    State {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// Number of draws to skip before encoding
        #[arg(long, default_value = "0")]
        skip: usize,
    },

    /// Run many independently seeded streams in parallel
    Streams {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// Number of streams; stream i is seeded with seed + i
        #[arg(long, default_value = "4")]
        streams: usize,

        /// Values per stream (overrides config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Verify golden vectors and checkpoint round trips
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&ConfigCliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
    })?;

    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!(
            seed = config.seed,
            count = config.count,
            log_level = %config.log_level,
            "Configuration loaded"
        );
    }

    match cli.command {
        Commands::Draw {
            generator,
            count,
            resume,
            checkpoint,
            format,
        } => commands::draw::run(
            generator.kind,
            &generator.resolve(&config),
            config.resolve_count(count)?,
            resume.as_deref(),
            checkpoint.as_deref(),
            &format,
        ),
        Commands::State { generator, skip } => {
            commands::state::run(generator.kind, &generator.resolve(&config), skip)
        }
        Commands::Streams {
            generator,
            streams,
            count,
        } => commands::streams::run(
            generator.kind,
            &generator.resolve(&config),
            streams,
            config.resolve_count(count)?,
        ),
        Commands::Check => commands::check::run(),
    }
}
