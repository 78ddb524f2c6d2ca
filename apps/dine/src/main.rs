//! dine - concurrent dining simulation over a ring of shared resources
//!
//! Loads layered configuration, builds the async runtime sized from it and
//! drives the table crate while rendering its event stream.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use dine_config::{Config, TableConfig};
use dine_table::Ring;
use dine_types::{OutputFormat, RunReport};
use std::process;
use tokio::runtime::Runtime;
use tokio::select;
use tracing::{debug, error, info};

fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli) {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting dine v{}", env!("CARGO_PKG_VERSION"));

    // Configuration precedence: file (or defaults), then environment, then flags
    let mut config = load_config(&cli.global)?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global, &cli.command);

    let format = if cli.global.json {
        OutputFormat::Json
    } else {
        config.general.default_output
    };
    let renderer = OutputRenderer::new(format, config.general.color);

    match cli.command {
        Commands::Run { .. } => {
            let runtime = build_runtime(config.worker_threads())?;
            // JSON mode keeps stdout for the report alone
            let verbose = cli.global.verbose && format != OutputFormat::Json;
            let mut event_handler = EventHandler::new(verbose);

            let report = runtime.block_on(execute_run_with_events(
                config.table.clone(),
                &mut event_handler,
            ))?;
            renderer.render_report(&report)?;
        }
        Commands::Topology { .. } => {
            let ring = Ring::build(&config.table)?;
            renderer.render_topology(&ring.seats(), &ring.slot_topology())?;
        }
        Commands::Config => renderer.render_config(&config)?,
    }

    info!("Command completed successfully");
    Ok(())
}

/// Read the config file on a throwaway single-threaded runtime
///
/// The real runtime can only be sized once the configuration is known.
fn load_config(global: &GlobalArgs) -> Result<Config, CliError> {
    let bootstrap = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(bootstrap.block_on(Config::load_or_default(&global.config))?)
}

/// Multi-threaded runtime with the configured worker count
fn build_runtime(worker_threads: usize) -> Result<Runtime, CliError> {
    debug!(worker_threads, "Building runtime");
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .thread_name("dine-worker")
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))
}

/// Run the simulation with concurrent event handling
async fn execute_run_with_events(
    table: TableConfig,
    event_handler: &mut EventHandler,
) -> Result<RunReport, CliError> {
    let (event_sender, mut event_receiver) = dine_events::channel();
    let mut run_future = Box::pin(async move {
        dine_table::simulate(&table, Some(event_sender)).await
    });

    loop {
        select! {
            // Run completed
            result = &mut run_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map_err(CliError::from);
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for the run to finish */ }
                }
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode {
        if debug_enabled {
            // Keep stdout clean for the JSON report; structured logs go to stderr
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new("info,dine=debug,dine_table=debug")
                    }),
                )
                .init();
            return;
        }
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,dine=debug,dine_table=debug")
                }),
            )
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,dine=warn,dine_table=warn")
                }),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs, command: &Commands) {
    if let Some(color) = global.color {
        config.general.color = color;
    }

    match command {
        Commands::Run {
            agents,
            servings,
            think_ms,
            workers,
            bowl,
        } => {
            if let Some(agents) = agents {
                config.table.agent_count = *agents;
            }
            if let Some(servings) = servings {
                config.table.serving_count = *servings;
            }
            if let Some(think_ms) = think_ms {
                config.table.think_ms = *think_ms;
            }
            if let Some(workers) = workers {
                config.runtime.worker_threads = *workers;
            }
            if bowl.is_some() {
                config.table.bowl_capacity = *bowl;
            }
        }
        Commands::Topology {
            agents: Some(agents),
        } => config.table.agent_count = *agents,
        Commands::Topology { agents: None } | Commands::Config => {}
    }
}
