// dcprip-core/tests/remap_tests.rs

mod common;

use common::{int_spec, read_wav, write_wav};
use dcprip_core::audio::GainKeepingDownmix;
use dcprip_core::audio::strategy::{GOD_VOICE_GAIN, MINUS_3_DB};
use dcprip_core::events::{Event, EventDispatcher, EventHandler};
use dcprip_core::{CoreError, DownmixStrategy, MatrixRenderer, RemapOutcome, Remapper, remap};
use hound::{SampleFormat, WavReader, WavSpec};
use std::fs;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Default)]
struct Recorder(Mutex<Vec<Event>>);

impl EventHandler for Recorder {
    fn handle(&self, event: &Event) {
        self.0.lock().unwrap().push(event.clone());
    }
}

/// Distinct value per channel that also moves with the frame.
fn ramp(frame: usize, channel: usize) -> i32 {
    (channel as i32 + 1) * 100 + frame as i32
}

#[test]
fn test_narrow_streams_pass_through_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("51.wav");
    write_wav(&input, int_spec(6, 24), 100, ramp);
    let original = fs::read(&input)?;

    for strategy in [
        DownmixStrategy::Surround,
        DownmixStrategy::GainKeeping51,
        DownmixStrategy::AuroSurround,
        DownmixStrategy::CavernAuto { output_channels: 8 },
    ] {
        let output = dir.path().join(format!("{}.wav", strategy.name()));
        let outcome = remap(&input, &output, strategy)?;
        assert_eq!(outcome, RemapOutcome::PassedThrough { channels: 6 });
        assert_eq!(fs::read(&output)?, original);
    }

    // In place leaves the file alone
    remap(&input, &input, DownmixStrategy::Surround)?;
    assert_eq!(fs::read(&input)?, original);

    dir.close()?;
    Ok(())
}

#[test]
fn test_gain_keeping_folds_hi_vi_into_surrounds() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("71.wav");
    let output = dir.path().join("51.wav");
    write_wav(&input, int_spec(8, 24), 1000, ramp);

    let outcome = remap(&input, &output, DownmixStrategy::GainKeeping51)?;
    assert_eq!(
        outcome,
        RemapOutcome::Remapped {
            input_channels: 8,
            output_channels: 6,
            frames: 1000
        }
    );

    let (spec, channels) = read_wav(&output);
    assert_eq!(spec.channels, 6);
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(spec.sample_rate, 48_000);
    for frame in [0, 1, 499, 999] {
        for channel in 0..4 {
            assert_eq!(channels[channel][frame], ramp(frame, channel));
        }
        assert_eq!(channels[4][frame], ramp(frame, 4) + ramp(frame, 6));
        assert_eq!(channels[5][frame], ramp(frame, 5) + ramp(frame, 7));
    }
    assert_eq!(channels[0].len(), 1000);

    dir.close()?;
    Ok(())
}

#[test]
fn test_overflow_saturates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("hot.wav");
    let output = dir.path().join("out.wav");
    write_wav(&input, int_spec(8, 16), 10, |_, channel| match channel {
        4 | 6 => 30_000,
        5 | 7 => -30_000,
        _ => 0,
    });

    remap(&input, &output, DownmixStrategy::GainKeeping51)?;
    let (_, channels) = read_wav(&output);
    assert!(channels[4].iter().all(|&s| s == i32::from(i16::MAX)));
    assert!(channels[5].iter().all(|&s| s == i32::from(i16::MIN)));

    dir.close()?;
    Ok(())
}

#[test]
fn test_auro_spreads_god_voice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("auro.wav");
    let output = dir.path().join("out.wav");
    let god_voice = 1 << 21;
    write_wav(&input, int_spec(12, 24), 64, |_, channel| match channel {
        3 => 1000,
        9 => god_voice,
        _ => 0,
    });

    remap(&input, &output, DownmixStrategy::AuroSurround)?;
    let (spec, channels) = read_wav(&output);
    assert_eq!(spec.channels, 6);

    let expected = (f64::from(god_voice) * f64::from(GOD_VOICE_GAIN)).round() as i32;
    for channel in [0, 1, 2, 4, 5] {
        for &sample in &channels[channel] {
            assert!((sample - expected).abs() <= 1, "channel {channel}: {sample}");
        }
    }
    assert!(channels[3].iter().all(|&s| s == 1000));

    dir.close()?;
    Ok(())
}

#[test]
fn test_surround_reorders_full_layout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("sdds.wav");
    let output = dir.path().join("out.wav");
    // Lc/Rc silent so every output is an exact copy
    write_wav(&input, int_spec(16, 24), 32, |frame, channel| match channel {
        8 | 9 => 0,
        _ => ramp(frame, channel),
    });

    remap(&input, &output, DownmixStrategy::Surround)?;
    let (spec, channels) = read_wav(&output);
    assert_eq!(spec.channels, 8);
    let order = [0, 1, 2, 3, 10, 11, 4, 5];
    for (position, &source) in order.iter().enumerate() {
        for frame in 0..32 {
            assert_eq!(channels[position][frame], ramp(frame, source));
        }
    }

    dir.close()?;
    Ok(())
}

#[test]
fn test_surround_folds_sdds_centers() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("sdds.wav");
    let output = dir.path().join("out.wav");
    write_wav(&input, int_spec(12, 24), 16, |_, channel| match channel {
        8 => 1 << 20,
        9 => 1 << 19,
        _ => 0,
    });

    remap(&input, &output, DownmixStrategy::Surround)?;
    let (_, channels) = read_wav(&output);
    let gain = f64::from(MINUS_3_DB);
    let left = (f64::from(1 << 20) * gain).round() as i32;
    let right = (f64::from(1 << 19) * gain).round() as i32;
    assert!((channels[0][0] - left).abs() <= 1);
    assert!((channels[1][0] - right).abs() <= 1);
    assert!((channels[2][0] - (left + right)).abs() <= 1);
    assert_eq!(channels[3][0], 0);

    dir.close()?;
    Ok(())
}

#[test]
fn test_surround_rejects_seven_channels() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("seven.wav");
    let output = dir.path().join("out.wav");
    write_wav(&input, int_spec(7, 16), 8, ramp);

    match remap(&input, &output, DownmixStrategy::Surround) {
        Err(CoreError::UnsupportedChannelCount { channels, .. }) => assert_eq!(channels, 7),
        other => panic!("Expected UnsupportedChannelCount, got {:?}", other),
    }
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);

    dir.close()?;
    Ok(())
}

#[test]
fn test_surround_rejects_hi_vi_tracks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("narration.wav");
    let output = dir.path().join("out.wav");
    // Signal on HI/VI only, which must never reach the back surrounds
    write_wav(&input, int_spec(8, 24), 4, |_, channel| match channel {
        6 | 7 => 500_000,
        _ => 0,
    });

    match remap(&input, &output, DownmixStrategy::Surround) {
        Err(CoreError::UnsupportedChannelCount { channels, .. }) => assert_eq!(channels, 8),
        other => panic!("Expected UnsupportedChannelCount, got {:?}", other),
    }
    assert!(!output.exists());

    dir.close()?;
    Ok(())
}

#[test]
fn test_cavern_needs_a_renderer() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("71.wav");
    let output = dir.path().join("out.wav");
    write_wav(&input, int_spec(8, 24), 8, ramp);

    match remap(&input, &output, DownmixStrategy::CavernAuto { output_channels: 6 }) {
        Err(CoreError::RendererUnavailable(channels)) => assert_eq!(channels, 6),
        other => panic!("Expected RendererUnavailable, got {:?}", other),
    }
    assert!(!output.exists());

    dir.close()?;
    Ok(())
}

#[test]
fn test_external_renderer() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("71.wav");
    let output = dir.path().join("stereo.wav");
    write_wav(&input, int_spec(8, 24), 20, ramp);

    let mut gains = vec![vec![0.0f32; 8]; 2];
    gains[0][0] = 1.0;
    gains[0][2] = 0.5;
    gains[1][1] = 1.0;
    gains[1][2] = 0.5;
    let mut renderer = MatrixRenderer::new(gains)?;

    let outcome = Remapper::new().remap_with_renderer(&input, &output, &mut renderer)?;
    assert_eq!(
        outcome,
        RemapOutcome::Remapped {
            input_channels: 8,
            output_channels: 2,
            frames: 20
        }
    );
    let (_, channels) = read_wav(&output);
    for frame in 0..20 {
        let center = f64::from(ramp(frame, 2)) * 0.5;
        assert_eq!(channels[0][frame], (f64::from(ramp(frame, 0)) + center).round() as i32);
        assert_eq!(channels[1][frame], (f64::from(ramp(frame, 1)) + center).round() as i32);
    }

    let mut narrow = MatrixRenderer::new(vec![vec![1.0; 10]])?;
    assert!(matches!(
        Remapper::new().remap_with_renderer(&input, &output, &mut narrow),
        Err(CoreError::RendererMismatch(_))
    ));

    dir.close()?;
    Ok(())
}

#[test]
fn test_short_last_block_and_progress() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("71.wav");
    let output = dir.path().join("51.wav");
    write_wav(&input, int_spec(8, 24), 50, ramp);

    let recorder = Arc::new(Recorder::default());
    let mut events = EventDispatcher::new();
    events.add_handler(recorder.clone());

    let remapper = Remapper::new().with_block_frames(7).with_events(&events);
    remapper.remap(&input, &output, DownmixStrategy::GainKeeping51)?;

    let (_, channels) = read_wav(&output);
    assert_eq!(channels[0].len(), 50);
    for frame in 0..50 {
        assert_eq!(channels[4][frame], ramp(frame, 4) + ramp(frame, 6));
    }

    let recorded = recorder.0.lock().unwrap();
    assert!(matches!(
        recorded.first(),
        Some(Event::RemapStarted {
            input_channels: 8,
            output_channels: 6,
            total_frames: 50,
            ..
        })
    ));
    let progress: Vec<u64> = recorded
        .iter()
        .filter_map(|event| match event {
            Event::RemapProgress { frames_done, .. } => Some(*frames_done),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![7, 14, 21, 28, 35, 42, 49, 50]);
    assert!(matches!(
        recorded.last(),
        Some(Event::RemapComplete { frames: 50, .. })
    ));

    dir.close()?;
    Ok(())
}

#[test]
fn test_in_place_remap() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let track = dir.path().join("track.wav");
    write_wav(&track, int_spec(8, 24), 40, ramp);

    remap(&track, &track, DownmixStrategy::GainKeeping51)?;
    let (spec, channels) = read_wav(&track);
    assert_eq!(spec.channels, 6);
    assert_eq!(channels[5][39], ramp(39, 5) + ramp(39, 7));
    // Only the rewritten track is left behind
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);

    dir.close()?;
    Ok(())
}

#[test]
fn test_float_stream_in_memory() -> Result<(), Box<dyn std::error::Error>> {
    let spec = WavSpec {
        channels: 8,
        sample_rate: 48_000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut input = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut input, spec)?;
        for _ in 0..5 {
            for channel in 0..8 {
                writer.write_sample(0.125f32 * channel as f32)?;
            }
        }
        writer.finalize()?;
    }

    let reader = WavReader::new(Cursor::new(input.into_inner()))?;
    let mut output = Cursor::new(Vec::new());
    let frames = Remapper::new()
        .with_block_frames(2)
        .remap_stream(reader, &mut output, &mut GainKeepingDownmix)?;
    assert_eq!(frames, 5);

    let mut reader = WavReader::new(Cursor::new(output.into_inner()))?;
    assert_eq!(reader.spec().channels, 6);
    assert_eq!(reader.spec().sample_format, SampleFormat::Float);
    let samples: Vec<f32> = reader.samples::<f32>().collect::<Result<_, _>>()?;
    assert_eq!(samples.len(), 30);
    assert_eq!(&samples[..6], &[0.0, 0.125, 0.25, 0.375, 0.5 + 0.75, 0.625 + 0.875]);

    Ok(())
}
