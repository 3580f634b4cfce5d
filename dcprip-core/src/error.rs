// ============================================================================
// dcprip-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for dcprip-core
//
// This module defines the error types used throughout the dcprip-core library.
// Malformed-but-tolerable input never reaches this type; it is absorbed by the
// component that reads it. What remains are structural parse failures,
// resource failures and unsupported audio layouts.
//
// KEY COMPONENTS:
// - CoreError: Enum of all possible errors in the library
// - CoreResult: Type alias for Result<T, CoreError>
//
// AI-ASSISTANT-INFO: Error handling for dcprip-core

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;

/// All errors that can be produced by dcprip-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("No composition playlists found")]
    NoCompositionsFound,

    /// A creation date token that stayed invalid after the one-day retry.
    #[error("Invalid creation date token '{0}'")]
    InvalidDate(String),

    #[error("Malformed playlist {}: {reason}", path.display())]
    MalformedPlaylist { path: PathBuf, reason: String },

    #[error("Malformed asset map {}: {reason}", path.display())]
    MalformedAssetMap { path: PathBuf, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("The {strategy} downmix cannot handle {channels} input channels")]
    UnsupportedChannelCount {
        strategy: &'static str,
        channels: usize,
    },

    #[error("No channel renderer available for a {0}-channel output")]
    RendererUnavailable(usize),

    #[error("Renderer mismatch: {0}")]
    RendererMismatch(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for dcprip-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
