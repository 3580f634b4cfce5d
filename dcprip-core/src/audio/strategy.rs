// ============================================================================
// dcprip-core/src/audio/strategy.rs
// ============================================================================
//
// DOWNMIX STRATEGIES: Fixed channel algebra for DCP sound tracks
//
// DCP sound tracks use a fixed channel order:
//   0-5   L R C LFE Ls Rs
//   6-7   HI VI          (Auro: top front left/right)
//   8-9   Lc Rc          (Auro: top front center, God's Voice)
//   10-11 Lrs Rrs        (Auro: top surround left/right)
//   12+   sync signals
//
// Every fixed strategy mixes in place on the input block and then copies its
// leading channels to the output. Overflow is left to the writer, which
// saturates.
//
// KEY COMPONENTS:
// - DownmixStrategy: User-facing strategy selection
// - SurroundDownmix: 7.1 with the SDDS centers folded in
// - GainKeepingDownmix: 5.1 without gain changes
// - AuroDownmix: Auro height layers folded into 5.1
//
// AI-ASSISTANT-INFO: Channel index conventions must be kept exactly

// ---- Internal crate imports ----
use super::renderer::ChannelRenderer;
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use serde::{Deserialize, Serialize};

// ---- Standard library imports ----
use std::fmt;

/// Gain for -3 dB.
pub const MINUS_3_DB: f32 = 0.707;

/// Constant power gain for spreading God's Voice over five channels (1/sqrt(5)).
pub const GOD_VOICE_GAIN: f32 = 0.447_213_6;

const LEFT: usize = 0;
const RIGHT: usize = 1;
const CENTER: usize = 2;
const LEFT_SURROUND: usize = 4;
const RIGHT_SURROUND: usize = 5;
const HEARING_IMPAIRED: usize = 6;
const VISUALLY_IMPAIRED: usize = 7;
const LEFT_CENTER: usize = 8;
const RIGHT_CENTER: usize = 9;
const LEFT_REAR: usize = 10;
const RIGHT_REAR: usize = 11;
/// First index past the audible channels; later ones carry sync signals.
const SYNC_START: usize = 12;

/// How a multichannel DCP sound track is brought down to a home layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownmixStrategy {
    /// 7.1 if available, HI/VI and sync stripped, SDDS centers folded in.
    Surround,
    /// 5.1 with the extra channels folded into the surrounds at unity gain.
    GainKeeping51,
    /// Auro height layers folded into 5.1.
    AuroSurround,
    /// Delegated to an external object renderer with a fixed output layout.
    CavernAuto { output_channels: usize },
}

impl DownmixStrategy {
    pub fn name(self) -> &'static str {
        match self {
            DownmixStrategy::Surround => "surround",
            DownmixStrategy::GainKeeping51 => "gain-keeping 5.1",
            DownmixStrategy::AuroSurround => "Auro surround",
            DownmixStrategy::CavernAuto { .. } => "Cavern auto",
        }
    }

    /// Channel count of the rendered output.
    pub fn output_channels(self) -> usize {
        match self {
            DownmixStrategy::Surround => 8,
            DownmixStrategy::GainKeeping51 | DownmixStrategy::AuroSurround => 6,
            DownmixStrategy::CavernAuto { output_channels } => output_channels,
        }
    }

    /// The built-in renderer of the strategy, if it has one.
    pub fn fixed_renderer(self) -> Option<Box<dyn ChannelRenderer>> {
        match self {
            DownmixStrategy::Surround => Some(Box::new(SurroundDownmix)),
            DownmixStrategy::GainKeeping51 => Some(Box::new(GainKeepingDownmix)),
            DownmixStrategy::AuroSurround => Some(Box::new(AuroDownmix)),
            DownmixStrategy::CavernAuto { .. } => None,
        }
    }
}

impl fmt::Display for DownmixStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 7.1 in PC order from a full 12-channel DCP layout. The rear pair replaces
/// the side pair and the sides move to the back, over HI/VI. Lc and Rc go to
/// their side and the center at -3 dB. Narrower tracks are rejected since
/// their 7th and 8th channels are HI/VI, not back surrounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurroundDownmix;

impl ChannelRenderer for SurroundDownmix {
    fn output_channels(&self) -> usize {
        8
    }

    fn check_input(&self, input_channels: usize) -> CoreResult<()> {
        if input_channels < SYNC_START {
            return Err(CoreError::UnsupportedChannelCount {
                strategy: DownmixStrategy::Surround.name(),
                channels: input_channels,
            });
        }
        Ok(())
    }

    fn render(
        &mut self,
        input: &mut [Vec<f32>],
        output: &mut [Vec<f32>],
        frames: usize,
    ) -> CoreResult<()> {
        // DCP order to PC order, sides end up in HI/VI positions
        input.swap(LEFT_SURROUND, LEFT_REAR);
        input.swap(RIGHT_SURROUND, RIGHT_REAR);
        input.swap(HEARING_IMPAIRED, LEFT_REAR);
        input.swap(VISUALLY_IMPAIRED, RIGHT_REAR);

        mix(input, LEFT_CENTER, LEFT, MINUS_3_DB, frames);
        mix(input, LEFT_CENTER, CENTER, MINUS_3_DB, frames);
        mix(input, RIGHT_CENTER, RIGHT, MINUS_3_DB, frames);
        mix(input, RIGHT_CENTER, CENTER, MINUS_3_DB, frames);
        copy_leading(input, output, frames);
        Ok(())
    }
}

/// 5.1 without any gain change. Might clip, but keeps 5.1 content that was
/// spread to the rears at its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct GainKeepingDownmix;

impl GainKeepingDownmix {
    /// Channels folded into the surround pair. Up to 8 channels the extra pair
    /// is the surround pair itself; past that HI/VI are dropped and the
    /// centers and rears are folded.
    fn folded_channels(input_channels: usize) -> std::ops::Range<usize> {
        if input_channels <= LEFT_CENTER {
            HEARING_IMPAIRED..input_channels
        } else {
            LEFT_CENTER..input_channels.min(SYNC_START)
        }
    }
}

impl ChannelRenderer for GainKeepingDownmix {
    fn output_channels(&self) -> usize {
        6
    }

    fn render(
        &mut self,
        input: &mut [Vec<f32>],
        output: &mut [Vec<f32>],
        frames: usize,
    ) -> CoreResult<()> {
        for source in Self::folded_channels(input.len()) {
            mix(input, source, LEFT_SURROUND + source % 2, 1.0, frames);
        }
        copy_leading(input, output, frames);
        Ok(())
    }
}

/// Auro 9.1 / 11.1 / 13.1 to 5.1. Height channels go to the channel below them
/// at unity gain, God's Voice is spread over every main channel except LFE.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuroDownmix;

impl ChannelRenderer for AuroDownmix {
    fn output_channels(&self) -> usize {
        6
    }

    fn render(
        &mut self,
        input: &mut [Vec<f32>],
        output: &mut [Vec<f32>],
        frames: usize,
    ) -> CoreResult<()> {
        let channels = input.len();
        for (source, target) in [(6, LEFT), (7, RIGHT), (8, CENTER)] {
            if source < channels {
                mix(input, source, target, 1.0, frames);
            }
        }
        if RIGHT_CENTER < channels {
            for target in [LEFT, RIGHT, CENTER, LEFT_SURROUND, RIGHT_SURROUND] {
                mix(input, RIGHT_CENTER, target, GOD_VOICE_GAIN, frames);
            }
        }
        for (source, target) in [(LEFT_REAR, LEFT_SURROUND), (RIGHT_REAR, RIGHT_SURROUND)] {
            if source < channels {
                mix(input, source, target, 1.0, frames);
            }
        }
        copy_leading(input, output, frames);
        Ok(())
    }
}

/// Adds `source * gain` to `target` over the first `frames` samples.
fn mix(channels: &mut [Vec<f32>], source: usize, target: usize, gain: f32, frames: usize) {
    debug_assert_ne!(source, target);
    let (source, target) = if source < target {
        let (head, tail) = channels.split_at_mut(target);
        (&head[source], &mut tail[0])
    } else {
        let (head, tail) = channels.split_at_mut(source);
        (&tail[0], &mut head[target])
    };
    for (out, &sample) in target[..frames].iter_mut().zip(&source[..frames]) {
        *out += sample * gain;
    }
}

fn copy_leading(input: &[Vec<f32>], output: &mut [Vec<f32>], frames: usize) {
    for (target, source) in output.iter_mut().zip(input) {
        target[..frames].copy_from_slice(&source[..frames]);
    }
}
