//! Core library for Digital Cinema Package metadata extraction and audio downmixing.
//!
//! This crate finds composition playlists, resolves them into ordered reels
//! through the asset map of their folder, recovers structured metadata from
//! standardized composition titles and rewrites multichannel cinema sound
//! tracks to home layouts.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use dcprip_core::config::CoreConfigBuilder;
//! use dcprip_core::{find_compositions, remap, scan_compositions, select_strategy};
//! use std::path::Path;
//!
//! let config = CoreConfigBuilder::new().build().unwrap();
//! let playlists = find_compositions(Path::new("/mnt/ingest")).unwrap();
//! let report = scan_compositions(&playlists, None);
//!
//! for job in &report.jobs {
//!     println!("{} ({})", job.metadata, job.metadata.audio);
//!     if let Some(strategy) = select_strategy(&config, job.metadata.audio) {
//!         for (_, reel) in job.processable_reels() {
//!             if let Some(audio) = &reel.audio_file {
//!                 // The sound track has been decoded to PCM next to the essence
//!                 let pcm = audio.with_extension("wav");
//!                 remap(&pcm, &pcm, strategy).unwrap();
//!             }
//!         }
//!     }
//! }
//! eprintln!("{}", report.failure_summary());
//! ```

pub mod assetmap;
pub mod audio;
pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod file_logging;
pub mod naming;
pub mod playlist;
pub mod processing;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use assetmap::{AssetMap, resolve_asset_map};
pub use audio::{
    ChannelRenderer, DownmixStrategy, MatrixRenderer, RemapOutcome, Remapper, remap,
};
pub use config::{CoreConfig, CoreConfigBuilder, DownmixMode, OutputLocation};
pub use discovery::{content_title, find_compositions, find_media_assets, is_composition_playlist};
pub use error::{CoreError, CoreResult};
pub use naming::{CompositionMetadata, classify};
pub use playlist::{Composition, Reel, resolve_playlist};
pub use processing::{
    CompositionFailure, CompositionJob, ScanReport, group_multilingual, load_composition,
    resolve_output_dir, scan_compositions, select_strategy,
};
pub use utils::{format_bytes, format_duration};
