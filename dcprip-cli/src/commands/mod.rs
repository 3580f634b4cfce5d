//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `classify` command.
/// This command decodes standardized composition titles.
pub mod classify;

/// Module containing the implementation of the `downmix` command.
/// This command rewrites an extracted PCM sound track to a home layout.
pub mod downmix;

/// Module containing the implementation of the `scan` command.
/// This command finds, resolves and summarizes every composition of a folder.
pub mod scan;
