//! Configuration structures and constants for the dcprip-core library.
//!
//! This module holds the settings that steer batch processing: how sound
//! tracks are downmixed, where outputs go and how multilingual releases are
//! treated. There is no persisted configuration file; front ends build a
//! [`CoreConfig`] through [`CoreConfigBuilder`] from their own options.

mod builder;

use crate::audio::BLOCK_FRAMES;
use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default remapper block size in frames.
pub const DEFAULT_BLOCK_FRAMES: usize = BLOCK_FRAMES;

/// Default output layout of the external object renderer (5.1).
pub const DEFAULT_RENDERER_CHANNELS: usize = 6;

/// Widest output layout accepted for the external object renderer.
pub const MAX_RENDERER_CHANNELS: usize = 16;

/// How sound tracks are downmixed before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DownmixMode {
    /// Keep the sound track as it is.
    Bypass,
    /// Force 5.1 without gain changes.
    GainKeeping51,
    /// 7.1 if available, 5.1 for Auro content.
    #[default]
    Surround,
    /// Render with an external object renderer.
    CavernAuto,
}

impl DownmixMode {
    pub const ALL: [DownmixMode; 4] = [
        DownmixMode::Bypass,
        DownmixMode::GainKeeping51,
        DownmixMode::Surround,
        DownmixMode::CavernAuto,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            DownmixMode::Bypass => "bypass",
            DownmixMode::GainKeeping51 => "gain-keeping",
            DownmixMode::Surround => "surround",
            DownmixMode::CavernAuto => "cavern",
        }
    }
}

impl fmt::Display for DownmixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DownmixMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::Config(format!("unknown downmix mode '{}'", s)))
    }
}

/// Where the output of a composition is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputLocation {
    /// Inside the composition folder.
    #[default]
    NextToSource,
    /// In the folder that contains the composition folder.
    Parent,
    /// In a fixed folder.
    Directory(PathBuf),
}

/// Main configuration structure for the dcprip-core library.
///
/// # Examples
///
/// ```rust
/// use dcprip_core::config::{CoreConfigBuilder, DownmixMode, OutputLocation};
///
/// let config = CoreConfigBuilder::new()
///     .downmix(DownmixMode::GainKeeping51)
///     .output_location(OutputLocation::Parent)
///     .multilingual(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.renderer_channels, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Frames per remapper block.
    pub block_frames: usize,

    /// Downmix applied to sound tracks.
    pub downmix: DownmixMode,

    /// Output channel count when rendering with an object renderer.
    pub renderer_channels: usize,

    /// Where outputs are written.
    pub output_location: OutputLocation,

    /// Merge compositions that only differ in language into one output.
    pub multilingual: bool,

    /// Overwrite existing outputs instead of skipping them.
    pub overwrite: bool,

    /// Name 4K compositions as 2K because the video is downscaled.
    pub downscale: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            block_frames: DEFAULT_BLOCK_FRAMES,
            downmix: DownmixMode::default(),
            renderer_channels: DEFAULT_RENDERER_CHANNELS,
            output_location: OutputLocation::default(),
            multilingual: false,
            overwrite: false,
            downscale: false,
        }
    }
}

impl CoreConfig {
    /// Checks the configuration for values the pipeline can't work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.block_frames == 0 {
            return Err(CoreError::Config(
                "block size must be at least one frame".to_string(),
            ));
        }
        if !(1..=MAX_RENDERER_CHANNELS).contains(&self.renderer_channels) {
            return Err(CoreError::Config(format!(
                "renderer channel count must be between 1 and {}, got {}",
                MAX_RENDERER_CHANNELS, self.renderer_channels
            )));
        }
        if let OutputLocation::Directory(dir) = &self.output_location {
            if dir.as_os_str().is_empty() {
                return Err(CoreError::Config("output directory is empty".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_frames, 1 << 18);
        assert_eq!(config.downmix, DownmixMode::Surround);
        assert_eq!(config.output_location, OutputLocation::NextToSource);
    }

    #[test]
    fn test_validation_failures() {
        let config = CoreConfig {
            block_frames: 0,
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = CoreConfig {
            renderer_channels: 17,
            ..CoreConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CoreConfig {
            output_location: OutputLocation::Directory(PathBuf::new()),
            ..CoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_downmix_mode_names() {
        for mode in DownmixMode::ALL {
            assert_eq!(mode.name().parse::<DownmixMode>().unwrap(), mode);
        }
        assert_eq!("SURROUND".parse::<DownmixMode>().unwrap(), DownmixMode::Surround);
        assert!("stereo".parse::<DownmixMode>().is_err());
    }
}
