// dcprip-cli/src/lib.rs
//
// Library portion of the dcprip CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{ClassifyArgs, Cli, Commands, DownmixArgs, ScanArgs};
pub use commands::classify::run_classify;
pub use commands::downmix::run_downmix;
pub use commands::scan::run_scan;
