// ============================================================================
// dcprip-core/src/audio/mod.rs
// ============================================================================
//
// CHANNEL REMAPPER: Block-streamed rewrite of multichannel PCM
//
// A DCP sound track is rewritten to a home layout without ever holding the
// whole track in memory. Frames are read in fixed blocks, handed to a
// ChannelRenderer and written out in order. The output is staged in a
// temporary file next to its destination and moved into place when complete,
// which also allows rewriting a file in place.
//
// Streams of six channels or fewer are already home layouts and are passed
// through byte for byte, whatever the strategy.
//
// KEY COMPONENTS:
// - remap: One-call rewrite with a built-in strategy
// - Remapper: Block size and progress configuration
// - ChannelRenderer: The per-block seam, implemented by every strategy
//
// AI-ASSISTANT-INFO: Streaming PCM remapper built on hound

pub mod codec;
pub mod renderer;
pub mod strategy;

pub use codec::PcmFormat;
pub use renderer::{ChannelRenderer, MatrixRenderer};
pub use strategy::{AuroDownmix, DownmixStrategy, GainKeepingDownmix, SurroundDownmix};

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher, emit};
use crate::temp_files::{create_temp_file, staging_dir};

// ---- External crate imports ----
use hound::{WavReader, WavWriter};
use log::{debug, info};
use serde::Serialize;

// ---- Standard library imports ----
use std::fs;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;
use std::time::Instant;

/// Frames per block: 1 MiB per channel of f32.
pub const BLOCK_FRAMES: usize = 1 << 18;

/// Channel count up to which a stream is passed through untouched.
pub const PASSTHROUGH_CHANNELS: usize = 6;

/// What a remap call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemapOutcome {
    /// The input was copied unchanged.
    PassedThrough { channels: usize },
    /// The input was rendered to a new layout.
    Remapped {
        input_channels: usize,
        output_channels: usize,
        frames: u64,
    },
}

/// Rewrites `input` to `output` with a built-in strategy.
///
/// `input` and `output` may be the same path.
pub fn remap(input: &Path, output: &Path, strategy: DownmixStrategy) -> CoreResult<RemapOutcome> {
    Remapper::new().remap(input, output, strategy)
}

/// Channel remapper configuration.
pub struct Remapper<'a> {
    block_frames: usize,
    events: Option<&'a EventDispatcher>,
}

impl Default for Remapper<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Remapper<'a> {
    pub fn new() -> Self {
        Self {
            block_frames: BLOCK_FRAMES,
            events: None,
        }
    }

    /// Overrides the block size. Zero is raised to one frame.
    pub fn with_block_frames(mut self, block_frames: usize) -> Self {
        self.block_frames = block_frames.max(1);
        self
    }

    /// Reports start, per-block progress and completion through `events`.
    pub fn with_events(mut self, events: &'a EventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn block_frames(&self) -> usize {
        self.block_frames
    }

    /// Rewrites `input` to `output` with a built-in strategy.
    ///
    /// [`DownmixStrategy::CavernAuto`] has no built-in renderer; it only
    /// passes narrow streams through and fails otherwise. Use
    /// [`Remapper::remap_with_renderer`] with an object renderer instead.
    pub fn remap(
        &self,
        input: &Path,
        output: &Path,
        strategy: DownmixStrategy,
    ) -> CoreResult<RemapOutcome> {
        match strategy.fixed_renderer() {
            Some(mut renderer) => self.run(input, output, strategy.name(), renderer.as_mut()),
            None => {
                let channels = input_channels(input)?;
                if channels <= PASSTHROUGH_CHANNELS {
                    return pass_through(input, output, channels);
                }
                Err(CoreError::RendererUnavailable(strategy.output_channels()))
            }
        }
    }

    /// Rewrites `input` to `output` with a caller-supplied renderer.
    pub fn remap_with_renderer(
        &self,
        input: &Path,
        output: &Path,
        renderer: &mut dyn ChannelRenderer,
    ) -> CoreResult<RemapOutcome> {
        self.run(input, output, "external renderer", renderer)
    }

    fn run(
        &self,
        input: &Path,
        output: &Path,
        strategy: &str,
        renderer: &mut dyn ChannelRenderer,
    ) -> CoreResult<RemapOutcome> {
        let reader = WavReader::open(input)?;
        let input_channels = usize::from(reader.spec().channels);
        if input_channels <= PASSTHROUGH_CHANNELS {
            drop(reader);
            return pass_through(input, output, input_channels);
        }
        renderer.check_input(input_channels)?;

        let output_channels = renderer.output_channels();
        let total_frames = u64::from(reader.duration());
        info!(
            "Remapping {} ({} channels, {} frames) to {} channels with {}",
            input.display(),
            input_channels,
            total_frames,
            output_channels,
            strategy
        );
        emit(
            self.events,
            Event::RemapStarted {
                input_file: input.display().to_string(),
                strategy: strategy.to_string(),
                input_channels,
                output_channels,
                total_frames,
            },
        );

        let started = Instant::now();
        let staging = create_temp_file(staging_dir(output), ".remap", "wav")?;
        let frames = self.remap_stream(reader, BufWriter::new(staging.as_file()), renderer)?;
        staging
            .persist(output)
            .map_err(|e| CoreError::Io(e.error))?;

        emit(
            self.events,
            Event::RemapComplete {
                output_file: output.display().to_string(),
                frames,
                elapsed: started.elapsed(),
            },
        );
        Ok(RemapOutcome::Remapped {
            input_channels,
            output_channels,
            frames,
        })
    }

    /// Streams every frame of `reader` through `renderer` into a new WAV
    /// written to `sink`. The sink receives the header before the first block
    /// and its final frame count on completion. Returns the frames written.
    pub fn remap_stream<R: Read, W: Write + Seek>(
        &self,
        mut reader: WavReader<R>,
        sink: W,
        renderer: &mut dyn ChannelRenderer,
    ) -> CoreResult<u64> {
        let format = PcmFormat::new(reader.spec());
        renderer.check_input(format.channels())?;
        let out_format = format.with_channels(renderer.output_channels())?;
        let total_frames = u64::from(reader.duration());

        let mut input = vec![vec![0.0f32; self.block_frames]; format.channels()];
        let mut output = vec![vec![0.0f32; self.block_frames]; out_format.channels()];
        let mut writer = WavWriter::new(sink, out_format.spec)?;

        let mut frames_done = 0u64;
        while frames_done < total_frames {
            let frames = (total_frames - frames_done).min(self.block_frames as u64) as usize;
            codec::read_block(&mut reader, format, &mut input, frames)?;
            renderer.render(&mut input, &mut output, frames)?;
            codec::write_block(&mut writer, out_format, &output, frames)?;

            frames_done += frames as u64;
            emit(
                self.events,
                Event::RemapProgress {
                    frames_done,
                    total_frames,
                },
            );
        }

        writer.finalize()?;
        debug!("Remapped {} frames", frames_done);
        Ok(frames_done)
    }
}

/// Channel count of a WAV file.
pub fn input_channels(path: &Path) -> CoreResult<usize> {
    Ok(usize::from(WavReader::open(path)?.spec().channels))
}

fn pass_through(input: &Path, output: &Path, channels: usize) -> CoreResult<RemapOutcome> {
    if !is_same_file(input, output) {
        fs::copy(input, output)?;
    }
    debug!(
        "{} has {} channels, passed through",
        input.display(),
        channels
    );
    Ok(RemapOutcome::PassedThrough { channels })
}

fn is_same_file(first: &Path, second: &Path) -> bool {
    if first == second {
        return true;
    }
    match (fs::canonicalize(first), fs::canonicalize(second)) {
        (Ok(first), Ok(second)) => first == second,
        _ => false,
    }
}
