//! flockgen - Command Line Sampling of Heterogeneous Flocking Agents
//!
//! Spawns populations whose per-agent traits are drawn from bounded, skewed
//! normal distributions, and inspects how individual traits are distributed.
//!
//! # Commands
//!
//! - `flockgen spawn` - Spawn a population and print every agent
//! - `flockgen inspect <trait>` - Sample one trait and summarise the draws
//! - `flockgen check` - Validate configuration and print derived parameters
//!
//! Settings are resolved from CLI flags, then `FLOCKGEN_*` environment
//! variables, then the `--config` TOML file, then built-in defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel};

/// Bounded trait sampling for flocking agents
#[derive(Parser)]
#[command(name = "flockgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn a population and print it
    Spawn {
        /// Number of agents (defaults to the configured population)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Root seed (defaults to the configured seed, else entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Spawn on all cores
        #[arg(short, long)]
        parallel: bool,
    },

    /// Sample one trait many times and summarise the draws
    Inspect {
        /// Trait name (e.g. radius, field_of_view)
        #[arg(value_name = "TRAIT")]
        trait_name: String,

        /// Number of samples
        #[arg(short = 'n', long, default_value = "10000")]
        samples: usize,

        /// Root seed (defaults to the configured seed, else entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Histogram bins
        #[arg(short, long, default_value = "20")]
        bins: usize,
    },

    /// Validate configuration and print derived parameters per trait
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            verbose: self.verbose,
            ..Default::default()
        };
        match &self.command {
            Commands::Spawn {
                count,
                seed,
                parallel,
                ..
            } => {
                args.population = *count;
                args.seed = *seed;
                args.parallel = *parallel;
            }
            Commands::Inspect { seed, .. } => args.seed = *seed,
            Commands::Check => {}
        }
        args
    }
}

fn init_tracing(level: LogLevel) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Spawn { format, .. } => commands::spawn::run(&config, &format),
        Commands::Inspect {
            trait_name,
            samples,
            bins,
            ..
        } => commands::inspect::run(&config, &trait_name, samples, bins),
        Commands::Check => commands::check::run(&config),
    }
}
