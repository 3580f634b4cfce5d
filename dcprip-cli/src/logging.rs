// ============================================================================
// dcprip-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Logger initialization for the CLI
//
// Without a log directory the CLI logs to stderr through env_logger, which
// honours RUST_LOG:
// - RUST_LOG=warn (default): Absorbed problems only
// - RUST_LOG=info or --verbose: Per-composition results
// - RUST_LOG=debug / trace: Per-element and per-token decisions
//
// With --log-dir the log4rs setup of dcprip-core writes a timestamped file
// and mirrors warnings to stderr.
//
// AI-ASSISTANT-INFO: Logging setup and helper functions

// ---- Internal crate imports ----
use crate::error::CliResult;

// ---- External crate imports ----
use dcprip_core::CoreError;
use dcprip_core::file_logging::setup::setup_file_logging;
use log::LevelFilter;

// ---- Standard library imports ----
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("dcprip_scan_{}.log", dcprip_cli::logging::get_timestamp());
/// assert_eq!(log_filename.len(), "dcprip_scan_20240601_123045.log".len());
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file of a run of `command` inside `log_dir`.
pub fn log_file_path(log_dir: &Path, command: &str) -> PathBuf {
    log_dir.join(format!("dcprip_{}_{}.log", command, get_timestamp()))
}

/// Initializes the global logger. Returns the log file when one is used.
pub fn init_logging(
    log_dir: Option<&Path>,
    command: &str,
    verbose: bool,
) -> CliResult<Option<PathBuf>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match log_dir {
        Some(dir) => {
            let path = log_file_path(dir, command);
            setup_file_logging(&path, level).map_err(|e| {
                CoreError::OperationFailed(format!(
                    "Failed to set up log file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(Some(path))
        }
        None => {
            let default_filter = if verbose { "debug" } else { "warn" };
            let env = env_logger::Env::default().default_filter_or(default_filter);
            env_logger::Builder::from_env(env)
                .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
                .init();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let path = log_file_path(Path::new("/var/log/dcprip"), "scan");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("dcprip_scan_"));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "dcprip_scan_20240601_123045.log".len());
        assert_eq!(path.parent(), Some(Path::new("/var/log/dcprip")));
    }
}
