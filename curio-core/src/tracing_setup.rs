//! Tracing setup for the `curio` binary
//!
//! Ranked results go to stdout, so console logging is written to stderr at
//! the level picked with `--log-level`. The ranking pipeline emits a debug
//! event per stage (filtered, excluded, scored, truncated); those rarely
//! reach the console but are always kept in a per-run log file, which is
//! where to look when a result list comes out in an unexpected order.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Directory used for the run log when none is given.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Run log file name; replaced on every invocation.
pub const RUN_LOG_FILE: &str = "curio-last-run.log";

/// Location of the run log inside `logs_dir`, or inside [`DEFAULT_LOGS_DIR`].
pub fn run_log_path(logs_dir: Option<&Path>) -> PathBuf {
    logs_dir
        .unwrap_or_else(|| Path::new(DEFAULT_LOGS_DIR))
        .join(RUN_LOG_FILE)
}

/// Installs the global subscriber: a stderr layer at `console_level`
/// (`RUST_LOG` wins when set) and a trace-level layer into the run log.
///
/// # Errors
///
/// - `std::io::Error` - The logs directory or the run log cannot be created
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> std::io::Result<()> {
    let log_file_path = run_log_path(logs_dir);
    if let Some(parent) = log_file_path.parent() {
        create_dir_all(parent)?;
    }
    let log_file = File::create(&log_file_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.as_str().to_lowercase()));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let run_log_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(run_log_layer)
        .init();

    tracing::debug!(
        "Logging to console at {} and to {}",
        console_level,
        log_file_path.display()
    );

    Ok(())
}

/// Console verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliLogLevel {
    Error,
    Warn,
    Info,
    /// Includes one line per ranking stage
    Debug,
    Trace,
}

impl CliLogLevel {
    /// Converts CLI log level to tracing Level enum.
    ///
    /// # Examples
    /// ```
    /// use curio_core::tracing_setup::CliLogLevel;
    ///
    /// let level = CliLogLevel::Info.as_tracing_level();
    /// assert_eq!(level, tracing::Level::INFO);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Same spelling clap accepts on the command line
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(CliLogLevel::Error.as_tracing_level(), Level::ERROR);
        assert_eq!(CliLogLevel::Trace.as_tracing_level(), Level::TRACE);
    }

    #[test]
    fn test_display_round_trips_through_clap() {
        for level in CliLogLevel::value_variants() {
            let parsed = CliLogLevel::from_str(&level.to_string(), false).unwrap();
            assert_eq!(parsed, *level);
        }
        assert_eq!(CliLogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_run_log_path() {
        assert_eq!(run_log_path(None), Path::new("logs").join("curio-last-run.log"));
        assert_eq!(
            run_log_path(Some(Path::new("/tmp/curio"))),
            PathBuf::from("/tmp/curio/curio-last-run.log")
        );
    }
}
