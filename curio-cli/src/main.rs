//! Curio CLI - Command-line interface
//!
//! Runs the ranking engine against a catalog snapshot on disk or the
//! built-in demo catalog.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use curio_core::tracing_setup::{CliLogLevel, init_tracing};
use curio_core::{CurioConfig, CurioError};

#[derive(Parser)]
#[command(name = "curio")]
#[command(about = "Search, browse and recommendations for a catalog snapshot")]
#[command(version)]
struct Cli {
    /// Console log level (RUST_LOG overrides it)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Directory holding catalog.json, profiles.json and comments.json
    #[arg(long)]
    data: Option<PathBuf>,

    /// Use the built-in demo catalog instead of snapshot files
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level.as_tracing_level(), None) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = CurioConfig::from_env();
    if let Some(data_dir) = cli.data {
        config.snapshot.data_dir = data_dir;
    }

    match commands::handle_command(cli.command, &config, cli.demo).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e:#}");
            match e.downcast_ref::<CurioError>() {
                Some(curio_error) => eprintln!("Error: {}", curio_error.user_message()),
                None => eprintln!("Error: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}
