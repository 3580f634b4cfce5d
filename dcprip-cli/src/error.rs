// ============================================================================
// dcprip-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and context helpers
//
// Commands return core errors unchanged so that main can pick a suggestion
// by variant. File operations done by the CLI itself are wrapped with the
// action and the path they failed on.
//
// KEY COMPONENTS:
// - CliResult: Result alias over CoreError
// - CliErrorContext: Prefixes an error with an action and a path
// - cli_error!: Formatted OperationFailed errors
//
// AI-ASSISTANT-INFO: CLI error handling utilities

// ---- External crate imports ----
use dcprip_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::path::Path;

/// Result of a CLI command.
pub type CliResult<T> = CoreResult<T>;

/// Adds the failed action to errors of file operations.
pub trait CliErrorContext<T> {
    /// `"<action> <path>: <error>"`, as an `OperationFailed`.
    fn path_context(self, action: &str, path: &Path) -> CliResult<T>;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn path_context(self, action: &str, path: &Path) -> CliResult<T> {
        self.map_err(|e| {
            CoreError::OperationFailed(format!("{} {}: {}", action, path.display(), e.into()))
        })
    }
}

/// Creates an `OperationFailed` error from a format string.
#[macro_export]
macro_rules! cli_error {
    ($($arg:tt)*) => {
        ::dcprip_core::CoreError::OperationFailed(format!($($arg)*))
    };
}
