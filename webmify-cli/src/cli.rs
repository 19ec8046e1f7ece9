// webmify-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "webmify",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Webmify: batch convert a folder of videos to 720p WebM",
    long_about = "Recursively finds video files under FOLDER and converts each one to \
                  {name}_720p.webm (VP9 + Opus, 1280x720 letterboxed) next to the source, \
                  longest videos first."
)]
pub struct Cli {
    /// Folder to scan recursively for video files
    // Optional so that a missing folder exits 1 with a usage hint instead of clap's 2.
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    // --- Existing Outputs ---
    /// Overwrite existing outputs without asking
    #[arg(short = 'y', long = "overwrite", visible_alias = "yes")]
    pub overwrite: bool,

    /// Keep existing outputs without asking
    #[arg(short = 'n', long = "skip-existing", visible_alias = "no")]
    pub skip_existing: bool,

    /// Skip sources that are already VP9/Opus at 1280x720
    #[arg(long)]
    pub skip_compliant: bool,

    // --- Parallelism ---
    /// Number of files to convert at once (default: a quarter of the CPUs)
    #[arg(
        long,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub concurrency: Option<usize>,

    /// Encoder threads per file (default: CPUs divided by concurrency)
    #[arg(
        long,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub threads: Option<usize>,

    /// Use hardware-accelerated decoding where available (macOS VideoToolbox)
    #[arg(long)]
    pub hwdecode: bool,

    /// Seconds to wait for an answer before keeping an existing output.
    /// Falls back to WEBMIFY_PROMPT_TIMEOUT, then 30.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub prompt_timeout: Option<u64>,

    /// Debug logging with timestamps, including per-checkpoint progress
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_only() {
        let cli = Cli::parse_from(["webmify", "videos"]);
        assert_eq!(cli.folder, Some(PathBuf::from("videos")));
        assert!(!cli.overwrite);
        assert!(!cli.skip_existing);
        assert!(!cli.skip_compliant);
        assert!(cli.concurrency.is_none());
        assert!(cli.threads.is_none());
        assert!(cli.prompt_timeout.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "webmify",
            "-y",
            "--skip-compliant",
            "--concurrency",
            "2",
            "--threads",
            "3",
            "--hwdecode",
            "--prompt-timeout",
            "5",
            "-v",
            "videos",
        ]);
        assert!(cli.overwrite);
        assert!(cli.skip_compliant);
        assert_eq!(cli.concurrency, Some(2));
        assert_eq!(cli.threads, Some(3));
        assert!(cli.hwdecode);
        assert_eq!(cli.prompt_timeout, Some(5));
        assert!(cli.verbose);
    }

    #[test]
    fn test_long_aliases() {
        let cli = Cli::parse_from(["webmify", "--yes", "--no", "videos"]);
        assert!(cli.overwrite);
        assert!(cli.skip_existing);
    }

    #[test]
    fn test_missing_folder_parses() {
        let cli = Cli::parse_from(["webmify", "-n"]);
        assert!(cli.folder.is_none());
        assert!(cli.skip_existing);
    }

    #[test]
    fn test_zero_counts_are_rejected() {
        assert!(Cli::try_parse_from(["webmify", "--concurrency", "0", "videos"]).is_err());
        assert!(Cli::try_parse_from(["webmify", "--threads", "0", "videos"]).is_err());
        assert!(Cli::try_parse_from(["webmify", "--prompt-timeout", "0", "videos"]).is_err());
        assert!(Cli::try_parse_from(["webmify", "--threads", "many", "videos"]).is_err());
    }
}
