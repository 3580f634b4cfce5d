// ============================================================================
// dcprip-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Every field starts at its default;
// `build` validates the result so an invalid configuration never reaches the
// pipeline.
//
// KEY COMPONENTS:
// - CoreConfigBuilder: Builder struct for creating CoreConfig instances
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{CoreConfig, DownmixMode, OutputLocation};
use crate::error::CoreResult;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use dcprip_core::config::{CoreConfigBuilder, DownmixMode};
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .downmix(DownmixMode::CavernAuto)
///     .renderer_channels(8)
///     .output_dir(PathBuf::from("/srv/rips"))
///     .overwrite(true)
///     .build()
///     .unwrap();
/// assert!(config.overwrite);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_frames(mut self, block_frames: usize) -> Self {
        self.config.block_frames = block_frames;
        self
    }

    pub fn downmix(mut self, mode: DownmixMode) -> Self {
        self.config.downmix = mode;
        self
    }

    pub fn renderer_channels(mut self, channels: usize) -> Self {
        self.config.renderer_channels = channels;
        self
    }

    pub fn output_location(mut self, location: OutputLocation) -> Self {
        self.config.output_location = location;
        self
    }

    /// Shorthand for [`OutputLocation::Directory`].
    pub fn output_dir(self, dir: PathBuf) -> Self {
        self.output_location(OutputLocation::Directory(dir))
    }

    pub fn multilingual(mut self, enable: bool) -> Self {
        self.config.multilingual = enable;
        self
    }

    pub fn overwrite(mut self, enable: bool) -> Self {
        self.config.overwrite = enable;
        self
    }

    pub fn downscale(mut self, enable: bool) -> Self {
        self.config.downscale = enable;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> CoreResult<CoreConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
