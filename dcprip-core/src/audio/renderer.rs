//! Block renderer abstraction of the channel remapper.
//!
//! The remapper owns the streaming: it reads a block of N channels, hands it to
//! a [`ChannelRenderer`] and writes the M channels the renderer produced. The
//! built-in downmixes implement the trait, and so can any external object
//! renderer that works block by block.

use crate::error::{CoreError, CoreResult};

/// Turns blocks of `N` input channels into blocks of `M` output channels.
///
/// Input and output buffers are allocated by the remapper and keep their
/// length for the whole stream; only the first `frames` samples of each are
/// valid in a call. The last block of a stream is usually shorter.
pub trait ChannelRenderer {
    /// Number of channels written per block.
    fn output_channels(&self) -> usize;

    /// Rejects input layouts the renderer cannot handle. Called once before
    /// anything is written.
    fn check_input(&self, input_channels: usize) -> CoreResult<()> {
        let _ = input_channels;
        Ok(())
    }

    /// Renders one block. Input buffers may be used as scratch space.
    fn render(
        &mut self,
        input: &mut [Vec<f32>],
        output: &mut [Vec<f32>],
        frames: usize,
    ) -> CoreResult<()>;
}

/// Static mixing matrix, `gains[output][input]`.
///
/// Stands in for an object renderer when the output layout is known up front.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRenderer {
    gains: Vec<Vec<f32>>,
}

impl MatrixRenderer {
    /// Fails unless every row has the same, non-zero number of inputs.
    pub fn new(gains: Vec<Vec<f32>>) -> CoreResult<Self> {
        let inputs = gains.first().map_or(0, Vec::len);
        if gains.is_empty() || inputs == 0 {
            return Err(CoreError::RendererMismatch(
                "mixing matrix is empty".to_string(),
            ));
        }
        if let Some(row) = gains.iter().position(|row| row.len() != inputs) {
            return Err(CoreError::RendererMismatch(format!(
                "matrix row {} has {} inputs instead of {}",
                row,
                gains[row].len(),
                inputs
            )));
        }
        Ok(Self { gains })
    }

    pub fn input_channels(&self) -> usize {
        self.gains[0].len()
    }
}

impl ChannelRenderer for MatrixRenderer {
    fn output_channels(&self) -> usize {
        self.gains.len()
    }

    fn check_input(&self, input_channels: usize) -> CoreResult<()> {
        if input_channels != self.input_channels() {
            return Err(CoreError::RendererMismatch(format!(
                "matrix expects {} input channels, the stream has {}",
                self.input_channels(),
                input_channels
            )));
        }
        Ok(())
    }

    fn render(
        &mut self,
        input: &mut [Vec<f32>],
        output: &mut [Vec<f32>],
        frames: usize,
    ) -> CoreResult<()> {
        for (row, target) in self.gains.iter().zip(output.iter_mut()) {
            let target = &mut target[..frames];
            target.fill(0.0);
            for (&gain, source) in row.iter().zip(input.iter()) {
                if gain == 0.0 {
                    continue;
                }
                for (out, &sample) in target.iter_mut().zip(&source[..frames]) {
                    *out += sample * gain;
                }
            }
        }
        Ok(())
    }
}
