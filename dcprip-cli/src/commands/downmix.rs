// ============================================================================
// dcprip-cli/src/commands/downmix.rs
// ============================================================================
//
// DOWNMIX COMMAND: Rewrite an extracted sound track to a home layout
//
// The strategy follows the downmix mode and, when a composition title is
// given, the audio layout recovered from it (Auro content folds to 5.1 in
// surround mode). Without --output the input is rewritten in place. The
// cavern mode renders through a gain matrix read from --matrix; without one
// only narrow tracks pass.
//
// AI-ASSISTANT-INFO: Downmix command, drives the core Remapper

// ---- Internal crate imports ----
use crate::cli::DownmixArgs;
use crate::cli_error;
use crate::error::{CliErrorContext, CliResult};
use crate::progress::RemapProgressHandler;
use crate::terminal;

// ---- External crate imports ----
use dcprip_core::config::CoreConfig;
use dcprip_core::events::EventDispatcher;
use dcprip_core::file_logging::FileLoggingHandler;
use dcprip_core::naming::AudioLayout;
use dcprip_core::{
    ChannelRenderer, CoreConfigBuilder, CoreError, DownmixStrategy, MatrixRenderer, RemapOutcome,
    Remapper, classify, format_bytes, format_duration, select_strategy,
};
use log::info;

// ---- Standard library imports ----
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn build_config(args: &DownmixArgs) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .downmix(args.strategy)
        .overwrite(args.overwrite);
    if let Some(frames) = args.block_frames {
        builder = builder.block_frames(frames as usize);
    }
    if let Some(channels) = args.renderer_channels {
        builder = builder.renderer_channels(channels);
    }
    builder.build()
}

/// Downmixes `args.input`. `log_to_file` adds event logging for runs that
/// write a log file.
pub fn run_downmix(args: DownmixArgs, log_to_file: bool) -> CliResult<()> {
    let config = build_config(&args)?;

    if !args.input.is_file() {
        return Err(CoreError::PathError(format!(
            "Input file '{}' does not exist",
            args.input.display()
        )));
    }
    let output = args.output.as_deref().unwrap_or(&args.input);
    let in_place = output == args.input.as_path();
    if !in_place && output.exists() && !config.overwrite {
        return Err(cli_error!(
            "Output file '{}' already exists (use --overwrite to replace it)",
            output.display()
        ));
    }

    let audio = match &args.title {
        Some(title) => classify(title)?.audio,
        None => AudioLayout::Unknown,
    };

    terminal::print_section("Downmix");
    terminal::print_status("Input", &args.input.display().to_string(), false);
    terminal::print_status("Output", &output.display().to_string(), false);
    terminal::print_status("Layout", &audio.to_string(), false);

    let Some(strategy) = select_strategy(&config, audio) else {
        terminal::print_status("Strategy", "none", true);
        bypass(&args.input, output, in_place)?;
        terminal::print_success("Downmix bypassed, sound track kept as is");
        return Ok(());
    };
    terminal::print_status("Strategy", strategy.name(), true);

    let mut renderer = match (&args.matrix, strategy) {
        (Some(path), DownmixStrategy::CavernAuto { output_channels }) => {
            let renderer = load_matrix(path)?;
            if args.renderer_channels.is_some() && renderer.output_channels() != output_channels {
                return Err(cli_error!(
                    "Matrix {} renders {} channels, --renderer-channels asks for {}",
                    path.display(),
                    renderer.output_channels(),
                    output_channels
                ));
            }
            terminal::print_status(
                "Renderer",
                &format!(
                    "gain matrix ({} -> {} ch)",
                    renderer.input_channels(),
                    renderer.output_channels()
                ),
                false,
            );
            Some(renderer)
        }
        (Some(_), _) => {
            return Err(cli_error!(
                "--matrix only applies to the cavern strategy, not {}",
                strategy.name()
            ));
        }
        (None, _) => None,
    };

    let mut events = EventDispatcher::new();
    events.add_handler(Arc::new(RemapProgressHandler::new()));
    if log_to_file {
        events.add_handler(Arc::new(FileLoggingHandler::new()));
    }

    let started = Instant::now();
    let remapper = Remapper::new()
        .with_block_frames(config.block_frames)
        .with_events(&events);
    let outcome = match renderer.as_mut() {
        Some(renderer) => remapper.remap_with_renderer(&args.input, output, renderer)?,
        None => remapper.remap(&args.input, output, strategy)?,
    };

    match outcome {
        RemapOutcome::PassedThrough { channels } => {
            terminal::print_success(&format!(
                "{} channel(s) already fit a home layout, passed through unchanged",
                channels
            ));
        }
        RemapOutcome::Remapped {
            input_channels,
            output_channels,
            frames,
        } => {
            let size = fs::metadata(output).path_context("Reading", output)?.len();
            terminal::print_status("Frames", &frames.to_string(), false);
            terminal::print_status("Size", &format_bytes(size), false);
            terminal::print_status(
                "Time",
                &format_duration(started.elapsed().as_secs_f64()),
                false,
            );
            terminal::print_success(&format!(
                "Downmixed {} -> {} channels",
                input_channels, output_channels
            ));
        }
    }
    Ok(())
}

/// Reads a `gains[output][input]` matrix from a JSON file.
fn load_matrix(path: &Path) -> CliResult<MatrixRenderer> {
    let text = fs::read_to_string(path).path_context("Reading", path)?;
    let gains: Vec<Vec<f32>> = serde_json::from_str(&text).path_context("Parsing", path)?;
    MatrixRenderer::new(gains)
}

fn bypass(input: &Path, output: &Path, in_place: bool) -> CliResult<()> {
    if in_place {
        return Ok(());
    }
    fs::copy(input, output).path_context("Copying to", output)?;
    info!("Copied {} to {}", input.display(), output.display());
    Ok(())
}
