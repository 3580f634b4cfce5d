// ============================================================================
// dcprip-cli/src/commands/scan.rs
// ============================================================================
//
// SCAN COMMAND: Batch resolution of a DCP tree
//
// Finds every composition playlist below a root folder, resolves and
// classifies them in parallel and prints one block per composition with its
// reels, the selected downmix and the output files. Compositions that fail
// to load are listed at the end; they do not fail the command.
//
// AI-ASSISTANT-INFO: Scan command, prints a ScanReport

// ---- Internal crate imports ----
use crate::cli::ScanArgs;
use crate::error::CliResult;
use crate::terminal;

// ---- External crate imports ----
use dcprip_core::config::CoreConfig;
use dcprip_core::events::EventDispatcher;
use dcprip_core::file_logging::FileLoggingHandler;
use dcprip_core::processing::multilingual::MultilingualGroup;
use dcprip_core::{
    CompositionJob, CoreConfigBuilder, CoreError, OutputLocation, ScanReport, find_compositions,
    format_duration, group_multilingual, scan_compositions, select_strategy,
};
use log::{info, warn};

// ---- Standard library imports ----
use std::sync::Arc;

fn build_config(args: &ScanArgs) -> CliResult<CoreConfig> {
    let location = match (&args.output_dir, args.parent) {
        (Some(dir), _) => OutputLocation::Directory(dir.clone()),
        (None, true) => OutputLocation::Parent,
        (None, false) => OutputLocation::NextToSource,
    };
    CoreConfigBuilder::new()
        .downmix(args.downmix)
        .output_location(location)
        .multilingual(args.multilingual)
        .downscale(args.downscale)
        .build()
}

/// Scans `args.root` and prints the result.
pub fn run_scan(args: ScanArgs) -> CliResult<()> {
    let config = build_config(&args)?;

    let playlists = match find_compositions(&args.root) {
        Ok(playlists) => playlists,
        Err(CoreError::NoCompositionsFound) => {
            warn!("No composition playlists below {}", args.root.display());
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    info!(
        "Found {} composition playlist(s) below {}",
        playlists.len(),
        args.root.display()
    );

    let mut events = EventDispatcher::new();
    events.add_handler(Arc::new(FileLoggingHandler::new()));
    let report = scan_compositions(&playlists, Some(&events));

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_report(&args, &config, &report);
    Ok(())
}

fn print_report(args: &ScanArgs, config: &CoreConfig, report: &ScanReport) {
    terminal::print_section("Scan");
    terminal::print_status("Root", &args.root.display().to_string(), false);
    terminal::print_status(
        "Compositions",
        &(report.jobs.len() + report.failures.len()).to_string(),
        true,
    );
    terminal::print_status("Downmix", config.downmix.name(), false);

    if report.jobs.is_empty() && report.failures.is_empty() {
        terminal::print_processing("No composition playlists found");
        return;
    }

    for job in &report.jobs {
        print_job(config, job);
    }

    if config.multilingual {
        print_groups(&group_multilingual(&report.jobs));
    }

    if !report.failures.is_empty() {
        terminal::print_section("Failures");
        for failure in &report.failures {
            terminal::print_failure(&failure.title, &failure.reason);
        }
    }

    println!();
    terminal::print_success(&format!(
        "Resolved {} of {} composition(s)",
        report.jobs.len(),
        report.jobs.len() + report.failures.len()
    ));
}

fn print_job(config: &CoreConfig, job: &CompositionJob) {
    let metadata = &job.metadata;
    terminal::print_processing(&metadata.to_string());
    terminal::print_status("Playlist", &job.playlist.display().to_string(), false);
    terminal::print_status("Type", &metadata.content_type.to_string(), false);
    terminal::print_status("Audio", &metadata.audio.to_string(), true);
    terminal::print_status("Resolution", &metadata.resolution.to_string(), false);
    terminal::print_status(
        "Duration",
        &format_duration(job.composition.total_duration_secs()),
        false,
    );

    let reels = job.composition.reels.len();
    let processable = job.processable_reels().count();
    let reel_summary = if processable == reels {
        reels.to_string()
    } else {
        format!("{} ({} skipped)", reels, reels - processable)
    };
    terminal::print_status("Reels", &reel_summary, false);

    let strategy = select_strategy(config, metadata.audio)
        .map(|strategy| strategy.name())
        .unwrap_or("none");
    terminal::print_status("Downmix", strategy, false);

    match job.output_files(config) {
        Ok(outputs) => {
            for output in outputs {
                terminal::print_status("Output", &output.display().to_string(), false);
            }
        }
        Err(e) => terminal::print_status("Output", &e.to_string(), false),
    }
}

fn print_groups(groups: &[MultilingualGroup<'_>]) {
    let merged: Vec<_> = groups.iter().filter(|group| !group.others.is_empty()).collect();
    if merged.is_empty() {
        return;
    }
    terminal::print_section("Multilingual");
    for group in merged {
        terminal::print_processing(&group.merged_title());
        terminal::print_status("Main", &group.main.metadata.to_string(), false);
        terminal::print_status("Languages", &group.languages().join(", "), false);
    }
}
