//! Runtime configuration settings

use std::path::PathBuf;

/// Runtime settings for a mirror run
///
/// Built once at startup and shared read-only by every component.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Source library root
    pub input: PathBuf,
    /// Output root
    pub output: PathBuf,
    /// Target format for conversion; `None` copies tracks unchanged
    pub target_format: Option<String>,
    /// Extension (without the dot) that marks a file as an audio track
    pub audio_extension: String,
    /// ffmpeg binary used by the default transcoder
    pub ffmpeg_path: PathBuf,
    /// Number of tag-reading worker threads
    pub probe_threads: usize,
    /// Optional JSON manifest destination
    pub manifest: Option<PathBuf>,
    /// Show progress spinner
    pub show_progress: bool,
    /// Dry run mode - plan without writing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        let convert = cli.convert.trim().trim_start_matches('.');
        let extension = cli.extension.trim().trim_start_matches('.');

        Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            target_format: (!convert.is_empty()).then(|| convert.to_string()),
            audio_extension: extension.to_string(),
            ffmpeg_path: cli.ffmpeg.clone(),
            probe_threads: cli.threads.unwrap_or_else(num_cpus::get).max(1),
            manifest: cli.manifest.clone(),
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }

    /// Filename suffix identifying tracks, e.g. `.flac`
    pub fn audio_suffix(&self) -> String {
        format!(".{}", self.audio_extension)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: PathBuf::from("./output"),
            target_format: None,
            audio_extension: "flac".to_string(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            probe_threads: num_cpus::get().max(1),
            manifest: None,
            show_progress: true,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cli;
    use clap::Parser;

    #[test]
    fn test_empty_convert_means_copy() {
        let cli = Cli::parse_from(["trackmirror", "-o", "out", "--convert", ""]);
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.target_format, None);
    }

    #[test]
    fn test_convert_format_strips_leading_dot() {
        let cli = Cli::parse_from(["trackmirror", "-o", "out", "-c", ".mp3", "--extension", ".flac"]);
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.target_format.as_deref(), Some("mp3"));
        assert_eq!(settings.audio_suffix(), ".flac");
    }
}
