//! CLI module for the tour guide orchestrator
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `run` - Enrich a route and print the results
//! - `config` - Configuration utilities (init)
//!
//! # Example
//!
//! ```bash
//! # Enrich the built-in sample route with default config
//! tourguide run
//!
//! # Enrich a route from a JSON file, emit JSON
//! tourguide run --route route.json --json
//!
//! # Write a starter configuration file
//! tourguide config init -o tourguide.toml
//! ```

pub mod config;
pub mod output;
pub mod run;

pub use config::handle_config_init;
pub use run::run_enrich;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tourguide - Concurrent waypoint enrichment engine
#[derive(Parser, Debug)]
#[command(
    name = "tourguide",
    version,
    about = "Concurrent waypoint-enrichment engine for navigation routes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enrich a route with contextual content
    Run(RunArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "tourguide.toml")]
    pub config: PathBuf,

    /// Route JSON file (origin, destination, waypoints); omit for the
    /// built-in sample route
    #[arg(short, long)]
    pub route: Option<PathBuf>,

    /// Output the enriched route as JSON
    #[arg(long)]
    pub json: bool,

    /// Override waypoint batch size
    #[arg(short, long, env = "TOURGUIDE_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TOURGUIDE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "tourguide.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}
