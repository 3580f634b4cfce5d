//! Reel and composition descriptors produced by the playlist resolver.

use serde::Serialize;

use std::path::PathBuf;

/// Frame rate assumed until the playlist states one.
pub const DEFAULT_FRAME_RATE: f64 = 24.0;

/// Marker in a composition title for 4K content.
pub const FOUR_K_MARKER: &str = "_4K";
const TWO_K_MARKER: &str = "_2K";

/// Container extension of the final output.
pub const OUTPUT_EXTENSION: &str = "mkv";

/// A single reel of a composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reel {
    pub video_file: Option<PathBuf>,
    pub audio_file: Option<PathBuf>,
    /// Interop 3D: both eyes interleaved in one picture track.
    pub stereoscopic: bool,
    /// First usable frame of the picture track.
    pub video_start_frame: u64,
    /// First usable position of the sound track, in video frames.
    pub audio_start_frame: u64,
    /// Duration of both tracks in video frames.
    pub duration: u64,
    /// Frames per second. Halved for stereoscopic reels.
    pub frame_rate: f64,
    /// The essence is encrypted and can't be processed.
    pub needs_key: bool,
}

impl Default for Reel {
    fn default() -> Self {
        Self {
            video_file: None,
            audio_file: None,
            stereoscopic: false,
            video_start_frame: 0,
            audio_start_frame: 0,
            duration: 0,
            frame_rate: DEFAULT_FRAME_RATE,
            needs_key: false,
        }
    }
}

impl Reel {
    /// Length of the reel in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.frame_rate > 0.0 {
            self.duration as f64 / self.frame_rate
        } else {
            0.0
        }
    }

    /// Whether the reel has an unencrypted picture track to work from.
    pub fn is_processable(&self) -> bool {
        !self.needs_key && self.video_file.is_some()
    }
}

/// An ordered list of reels with the standardized title of the playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub title: String,
    pub reels: Vec<Reel>,
    pub is_4k: bool,
}

impl Composition {
    pub fn new(title: String, reels: Vec<Reel>) -> Self {
        let is_4k = title.contains(FOUR_K_MARKER);
        Self {
            title,
            reels,
            is_4k,
        }
    }

    /// Output file name of the reel at `index` (zero-based).
    ///
    /// Single-reel compositions are named after the title alone, multi-reel
    /// ones get a one-based reel number. With `downscale` the 4K marker of the
    /// title is rewritten to 2K.
    pub fn output_file_name(&self, index: usize, downscale: bool) -> String {
        let title = if downscale {
            self.title.replace(FOUR_K_MARKER, TWO_K_MARKER)
        } else {
            self.title.clone()
        };
        if self.reels.len() == 1 {
            format!("{}.{}", title, OUTPUT_EXTENSION)
        } else {
            format!("{}_{}.{}", title, index + 1, OUTPUT_EXTENSION)
        }
    }

    /// Sum of the reel durations in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.reels.iter().map(Reel::duration_secs).sum()
    }
}
