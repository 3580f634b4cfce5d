//! Implementation of the 'classify' subcommand.
//!
//! Decodes one or more standardized composition titles and prints the
//! recovered metadata as a table or as JSON.

use crate::cli::ClassifyArgs;
use crate::error::CliResult;
use crate::terminal;

use dcprip_core::{CompositionMetadata, classify};

use log::debug;

/// Decodes every title of `args`. The first title with an unrecoverable
/// creation date fails the command.
pub fn run_classify(args: ClassifyArgs) -> CliResult<()> {
    let decoded = args
        .titles
        .iter()
        .map(|title| classify(title))
        .collect::<CliResult<Vec<CompositionMetadata>>>()?;
    debug!("Classified {} title(s)", decoded.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    terminal::print_section("Classification");
    for metadata in &decoded {
        print_metadata(metadata);
    }
    Ok(())
}

fn print_metadata(metadata: &CompositionMetadata) {
    terminal::print_processing(&metadata.to_string());
    terminal::print_status("Title", &metadata.title, true);
    terminal::print_status(
        "Content type",
        &format!(
            "{} ({})",
            metadata.content_type,
            metadata.content_type.stamp()
        ),
        false,
    );
    if !metadata.modifiers.is_empty() {
        terminal::print_status("Modifiers", &metadata.modifiers, false);
    }
    terminal::print_status("Aspect ratio", &metadata.aspect_ratio.to_string(), false);
    terminal::print_status("Language", &metadata.language, false);
    terminal::print_status("Territory", &metadata.territory, false);
    terminal::print_status("Audio", &metadata.audio.to_string(), true);
    terminal::print_status("Resolution", &metadata.resolution.to_string(), false);
    if !metadata.studio.is_empty() {
        terminal::print_status("Studio", &metadata.studio, false);
    }
    if let Some(date) = metadata.creation_date {
        terminal::print_status("Created", &date.format("%Y-%m-%d").to_string(), false);
    }
    if !metadata.facility.is_empty() {
        terminal::print_status("Facility", &metadata.facility, false);
    }
    if !metadata.standard.is_empty() {
        terminal::print_status("Standard", &metadata.standard, false);
    }
    terminal::print_status("Package", &metadata.package_variant.to_string(), false);
}
