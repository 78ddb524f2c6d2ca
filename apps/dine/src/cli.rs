//! Command line interface definition

use clap::{Parser, Subcommand};
use dine_types::ColorChoice;
use std::path::PathBuf;

/// dine - concurrent dining simulation over a ring of shared resources
#[derive(Parser)]
#[command(name = "dine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent dining simulation over a ring of shared resources")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Narrate every agent step while running
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a simulation and print per-agent and per-resource statistics
    Run {
        /// Number of agents seated around the ring (at least 2)
        #[arg(short, long, value_name = "N")]
        agents: Option<usize>,

        /// Total servings the producer will offer
        #[arg(short, long, value_name = "S")]
        servings: Option<u64>,

        /// Pause after each meal in milliseconds (0 = yield only)
        #[arg(long, value_name = "MS")]
        think_ms: Option<u64>,

        /// Runtime worker threads (0 = one per CPU)
        #[arg(short, long, value_name = "W")]
        workers: Option<usize>,

        /// Servings buffered ahead of consumption (default: all of them)
        #[arg(long, value_name = "N")]
        bowl: Option<usize>,
    },

    /// Print the ring wiring without running anything
    Topology {
        /// Number of agents seated around the ring (at least 2)
        #[arg(short, long, value_name = "N")]
        agents: Option<usize>,
    },

    /// Print the effective configuration
    Config,
}
