//! PCM block conversion between interleaved WAV samples and planar f32 buffers.
//!
//! Integer samples are normalized by the full scale of their bit depth, so a
//! read-write cycle of 24-bit (or narrower) PCM is lossless. Values outside
//! the integer range are saturated on write.

use crate::error::{CoreError, CoreResult};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use std::io::{Read, Seek, Write};

/// Sample layout of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub spec: WavSpec,
}

impl PcmFormat {
    pub fn new(spec: WavSpec) -> Self {
        Self { spec }
    }

    pub fn channels(&self) -> usize {
        usize::from(self.spec.channels)
    }

    /// Same sample rate and depth with a different channel count.
    pub fn with_channels(&self, channels: usize) -> CoreResult<Self> {
        let channels = u16::try_from(channels).map_err(|_| {
            CoreError::OperationFailed(format!("{} output channels is out of range", channels))
        })?;
        Ok(Self {
            spec: WavSpec {
                channels,
                ..self.spec
            },
        })
    }

    fn full_scale(&self) -> f64 {
        (1u64 << (self.spec.bits_per_sample.clamp(1, 32) - 1)) as f64
    }
}

/// Reads `frames` interleaved frames into the first `frames` samples of each
/// channel buffer.
pub fn read_block<R: Read>(
    reader: &mut WavReader<R>,
    format: PcmFormat,
    channels: &mut [Vec<f32>],
    frames: usize,
) -> CoreResult<()> {
    let count = channels.len();
    let wanted = frames * count;
    let mut read = 0;

    match format.spec.sample_format {
        SampleFormat::Int => {
            let scale = format.full_scale();
            for sample in reader.samples::<i32>().take(wanted) {
                channels[read % count][read / count] = (f64::from(sample?) / scale) as f32;
                read += 1;
            }
        }
        SampleFormat::Float => {
            for sample in reader.samples::<f32>().take(wanted) {
                channels[read % count][read / count] = sample?;
                read += 1;
            }
        }
    }

    if read < wanted {
        return Err(CoreError::OperationFailed(format!(
            "PCM stream ended after {} of {} samples in a block",
            read, wanted
        )));
    }
    Ok(())
}

/// Interleaves and writes the first `frames` samples of each channel buffer.
pub fn write_block<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    format: PcmFormat,
    channels: &[Vec<f32>],
    frames: usize,
) -> CoreResult<()> {
    match format.spec.sample_format {
        SampleFormat::Int => {
            let scale = format.full_scale();
            let (min, max) = (-scale, scale - 1.0);
            for frame in 0..frames {
                for channel in channels {
                    let value = (f64::from(channel[frame]) * scale).round().clamp(min, max);
                    writer.write_sample(value as i32)?;
                }
            }
        }
        SampleFormat::Float => {
            for frame in 0..frames {
                for channel in channels {
                    writer.write_sample(channel[frame])?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn spec(channels: u16, bits: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 48_000,
            bits_per_sample: bits,
            sample_format: SampleFormat::Int,
        }
    }

    fn wav_bytes(spec: WavSpec, samples: &[i32]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_24_bit_round_trip_is_exact() {
        let spec = spec(2, 24);
        let samples = [8_388_607, -8_388_608, 1, -1, 123_456, -654_321];
        let mut reader = WavReader::new(Cursor::new(wav_bytes(spec, &samples))).unwrap();
        let format = PcmFormat::new(reader.spec());

        let mut channels = vec![vec![0.0; 3]; 2];
        read_block(&mut reader, format, &mut channels, 3).unwrap();
        assert_eq!(channels[0][0], (8_388_607.0 / 8_388_608.0) as f32);
        assert_eq!(channels[1][0], -1.0);

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            write_block(&mut writer, format, &channels, 3).unwrap();
            writer.finalize().unwrap();
        }
        cursor.set_position(0);
        let written: Vec<i32> = WavReader::new(cursor)
            .unwrap()
            .samples::<i32>()
            .map(Result::unwrap)
            .collect();
        assert_eq!(written, samples);
    }

    #[test]
    fn test_overflow_saturates() {
        let spec = spec(1, 16);
        let format = PcmFormat::new(spec);
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            write_block(&mut writer, format, &[vec![1.5, -3.0, 0.5]], 3).unwrap();
            writer.finalize().unwrap();
        }
        cursor.set_position(0);
        let written: Vec<i16> = WavReader::new(cursor)
            .unwrap()
            .samples::<i16>()
            .map(Result::unwrap)
            .collect();
        assert_eq!(written, vec![i16::MAX, i16::MIN, 16_384]);
    }

    #[test]
    fn test_short_stream_is_an_error() {
        let spec = spec(2, 16);
        let mut reader = WavReader::new(Cursor::new(wav_bytes(spec, &[1, 2]))).unwrap();
        let format = PcmFormat::new(reader.spec());
        let mut channels = vec![vec![0.0; 4]; 2];
        assert!(read_block(&mut reader, format, &mut channels, 4).is_err());
    }

    #[test]
    fn test_with_channels_keeps_depth() {
        let format = PcmFormat::new(spec(12, 24)).with_channels(6).unwrap();
        assert_eq!(format.channels(), 6);
        assert_eq!(format.spec.bits_per_sample, 24);
    }
}
