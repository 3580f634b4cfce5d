// dcprip-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use dcprip_core::DownmixMode;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "dcprip: DCP metadata extraction and audio downmixing",
    long_about = "Finds composition playlists, resolves their reels, decodes standardized \
                  composition titles and downmixes cinema sound tracks via dcprip-core."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Optional: Directory for log files. Logs go to stderr when omitted.
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Finds and resolves every composition under a folder
    Scan(ScanArgs),
    /// Decodes standardized composition titles
    Classify(ClassifyArgs),
    /// Downmixes an extracted PCM sound track to a home layout
    Downmix(DownmixArgs),
}

impl Commands {
    /// Short command name, used in log file names.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Scan(_) => "scan",
            Commands::Classify(_) => "classify",
            Commands::Downmix(_) => "downmix",
        }
    }
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Folder searched recursively for composition playlists
    #[arg(required = true, value_name = "ROOT")]
    pub root: PathBuf,

    /// Print the scan report as JSON
    #[arg(long)]
    pub json: bool,

    /// Optional: Folder for all outputs (defaults to each composition folder)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR", conflicts_with = "parent")]
    pub output_dir: Option<PathBuf>,

    /// Write outputs next to the composition folder instead of inside it
    #[arg(long)]
    pub parent: bool,

    /// Downmix planned for the sound tracks.
    /// Can also be set via the DCPRIP_DOWNMIX environment variable.
    #[arg(
        long,
        value_name = "MODE",
        env = "DCPRIP_DOWNMIX",
        default_value_t = DownmixMode::Surround
    )]
    pub downmix: DownmixMode,

    /// Group compositions that only differ in language
    #[arg(long)]
    pub multilingual: bool,

    /// Name 4K outputs as 2K
    #[arg(long)]
    pub downscale: bool,
}

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// One or more standardized composition titles
    #[arg(required = true, num_args = 1.., value_name = "TITLE")]
    pub titles: Vec<String>,

    /// Print the decoded metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct DownmixArgs {
    /// PCM (WAV) sound track to rewrite
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Optional: Output file (defaults to rewriting INPUT in place)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Downmix mode: bypass, gain-keeping, surround or cavern.
    /// Surround needs a full 12-channel track. Without --matrix, cavern only
    /// passes tracks of 6 channels or fewer through and fails on wider ones.
    /// Can also be set via the DCPRIP_DOWNMIX environment variable.
    #[arg(
        long,
        value_name = "MODE",
        env = "DCPRIP_DOWNMIX",
        default_value_t = DownmixMode::Surround
    )]
    pub strategy: DownmixMode,

    /// Optional: Standardized title of the composition, used to detect Auro content
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Optional: Frames per processing block
    #[arg(long, value_name = "FRAMES", value_parser = clap::value_parser!(u64).range(1..))]
    pub block_frames: Option<u64>,

    /// Optional: Output channel count of the object renderer (cavern mode)
    #[arg(long, value_name = "CHANNELS")]
    pub renderer_channels: Option<usize>,

    /// Optional: JSON gain matrix rendering the track in cavern mode, one
    /// row of input gains per output channel (e.g. [[1,0,0.707],[0,1,0.707]])
    #[arg(long, value_name = "MATRIX_FILE")]
    pub matrix: Option<PathBuf>,

    /// Replace OUTPUT if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_basic_args() {
        let cli = Cli::parse_from(["dcprip", "scan", "/ingest"]);

        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.root, PathBuf::from("/ingest"));
                assert!(!args.json);
                assert!(args.output_dir.is_none());
                assert!(!args.parent);
                assert!(!args.multilingual);
            }
            other => panic!("Expected Scan command, got {:?}", other),
        }
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn test_parse_downmix_args() {
        let cli = Cli::parse_from([
            "dcprip",
            "downmix",
            "track.wav",
            "-o",
            "out.wav",
            "--strategy",
            "gain-keeping",
            "--block-frames",
            "4096",
            "--log-dir",
            "logs",
        ]);

        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
        match cli.command {
            Commands::Downmix(args) => {
                assert_eq!(args.input, PathBuf::from("track.wav"));
                assert_eq!(args.output, Some(PathBuf::from("out.wav")));
                assert_eq!(args.strategy, DownmixMode::GainKeeping51);
                assert_eq!(args.block_frames, Some(4096));
                assert!(args.title.is_none());
                assert!(args.matrix.is_none());
                assert!(!args.overwrite);
            }
            other => panic!("Expected Downmix command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_classify_multiple_titles() {
        let cli = Cli::parse_from(["dcprip", "classify", "A_FTR", "B_TLR", "--json"]);

        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.titles, vec!["A_FTR", "B_TLR"]);
                assert!(args.json);
            }
            other => panic!("Expected Classify command, got {:?}", other),
        }
    }

    #[test]
    fn test_output_and_parent_conflict() {
        let result = Cli::try_parse_from(["dcprip", "scan", "/ingest", "-o", "/out", "--parent"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_block_frames() {
        let result = Cli::try_parse_from(["dcprip", "downmix", "a.wav", "--block-frames", "0"]);
        assert!(result.is_err());
    }
}
