//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// trackmirror - Mirror a music library with sortable track names
///
/// Recreates the input tree under the output directory. Directory names are
/// lowercased, other files are copied verbatim, and audio tracks are prefixed
/// with zero-padded disc/track numbers from their tags unless the names in a
/// directory are already consistently numbered.
#[derive(Parser, Debug)]
#[command(name = "trackmirror")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Source library root
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Convert tracks to this format with ffmpeg (e.g. mp3); copies when unset
    #[arg(short, long, value_name = "FORMAT", default_value = "")]
    pub convert: String,

    /// Extension identifying audio tracks
    #[arg(long, value_name = "EXT", default_value = "flac")]
    pub extension: String,

    /// Path to the ffmpeg binary
    #[arg(long, value_name = "PATH", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Number of tag-reading worker threads (defaults to CPU count)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Write a JSON manifest of every operation performed
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress and logging below errors)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Dry run - show what would be created without writing anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
