// ============================================================================
// dcprip-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: Composition loading and batch orchestration
//
// Ties the resolvers together. A playlist becomes a CompositionJob (reels plus
// classified title), a list of playlists becomes a ScanReport in which every
// failure is recorded under the display title of its composition while the
// rest of the batch carries on.
//
// KEY COMPONENTS:
// - load_composition: Playlist to CompositionJob
// - scan_compositions: Parallel, order-preserving batch load
// - select_strategy: Downmix mode and audio layout to a remap strategy
// - output / multilingual: Output folders and language grouping
//
// AI-ASSISTANT-INFO: Batch layer between discovery and the encoder

pub mod multilingual;
pub mod output;

pub use multilingual::{MultilingualGroup, group_multilingual};
pub use output::resolve_output_dir;

// ---- Internal crate imports ----
use crate::audio::DownmixStrategy;
use crate::config::{CoreConfig, DownmixMode};
use crate::discovery::content_title;
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher, emit};
use crate::naming::{AudioLayout, CompositionMetadata, classify};
use crate::playlist::{Composition, Reel, resolve_playlist};

// ---- External crate imports ----
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

/// A resolved composition with the metadata recovered from its title.
#[derive(Debug, Clone, Serialize)]
pub struct CompositionJob {
    pub playlist: PathBuf,
    pub composition: Composition,
    pub metadata: CompositionMetadata,
}

impl CompositionJob {
    /// Reels that can be ripped, with their index in the composition.
    /// Encrypted reels and reels without picture are skipped.
    pub fn processable_reels(&self) -> impl Iterator<Item = (usize, &Reel)> {
        self.composition
            .reels
            .iter()
            .enumerate()
            .filter(|(_, reel)| reel.is_processable())
    }

    /// Final output paths of the processable reels.
    pub fn output_files(&self, config: &CoreConfig) -> CoreResult<Vec<PathBuf>> {
        let dir = resolve_output_dir(&self.playlist, &config.output_location)?;
        Ok(self
            .processable_reels()
            .map(|(index, _)| dir.join(self.composition.output_file_name(index, config.downscale)))
            .collect())
    }
}

/// A composition that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionFailure {
    pub playlist: PathBuf,
    /// Display title, or the raw title when it can't be classified.
    pub title: String,
    pub reason: String,
}

impl CompositionFailure {
    fn new(playlist: &Path, error: &CoreError) -> Self {
        let raw_title = content_title(playlist);
        let title = classify(&raw_title)
            .map(|metadata| metadata.to_string())
            .unwrap_or(raw_title);
        Self {
            playlist: playlist.to_path_buf(),
            title,
            reason: error.to_string(),
        }
    }
}

/// Outcome of a batch load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub jobs: Vec<CompositionJob>,
    pub failures: Vec<CompositionFailure>,
}

impl ScanReport {
    /// Pretty-printed JSON of the whole report.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One line per failure, in playlist order.
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|failure| format!("{}: {}", failure.title, failure.reason))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resolves a playlist and classifies its title.
pub fn load_composition(playlist: &Path) -> CoreResult<CompositionJob> {
    let composition = resolve_playlist(playlist)?;
    let metadata = classify(&composition.title)?;
    info!(
        "Loaded {} ({} reel(s), {})",
        metadata,
        composition.reels.len(),
        metadata.audio
    );
    Ok(CompositionJob {
        playlist: playlist.to_path_buf(),
        composition,
        metadata,
    })
}

/// Loads every playlist in parallel. Results keep the order of `playlists`;
/// a failing composition is recorded and does not stop the batch.
pub fn scan_compositions(playlists: &[PathBuf], events: Option<&EventDispatcher>) -> ScanReport {
    emit(
        events,
        Event::ScanStarted {
            compositions: playlists.len(),
        },
    );

    let results: Vec<CoreResult<CompositionJob>> = playlists
        .par_iter()
        .map(|playlist| load_composition(playlist))
        .collect();

    let mut report = ScanReport::default();
    for (playlist, result) in playlists.iter().zip(results) {
        match result {
            Ok(job) => {
                emit(
                    events,
                    Event::CompositionResolved {
                        title: job.metadata.to_string(),
                        reels: job.composition.reels.len(),
                    },
                );
                report.jobs.push(job);
            }
            Err(e) => {
                let failure = CompositionFailure::new(playlist, &e);
                warn!("Skipping {}: {}", failure.title, failure.reason);
                emit(
                    events,
                    Event::CompositionFailed {
                        title: failure.title.clone(),
                        reason: failure.reason.clone(),
                    },
                );
                report.failures.push(failure);
            }
        }
    }

    emit(
        events,
        Event::ScanComplete {
            resolved: report.jobs.len(),
            failed: report.failures.len(),
        },
    );
    report
}

/// The remap strategy for a sound track, or `None` when it is kept as is.
///
/// The surround mode folds Auro height layers into 5.1 instead of producing
/// 7.1, since their channel positions differ.
pub fn select_strategy(config: &CoreConfig, audio: AudioLayout) -> Option<DownmixStrategy> {
    match config.downmix {
        DownmixMode::Bypass => None,
        DownmixMode::GainKeeping51 => Some(DownmixStrategy::GainKeeping51),
        DownmixMode::Surround if audio.is_auro_family() => Some(DownmixStrategy::AuroSurround),
        DownmixMode::Surround => Some(DownmixStrategy::Surround),
        DownmixMode::CavernAuto => Some(DownmixStrategy::CavernAuto {
            output_channels: config.renderer_channels,
        }),
    }
}
