//! Pipeline orchestration
//!
//! Validates the configuration, prepares the output root, mirrors the tree,
//! and exports the operation manifest.

use crate::config::Settings;
use crate::error::{MirrorError, Result};
use crate::export;
use crate::metadata::{LoftyProbe, MetadataProbe};
use crate::mirror::Mirror;
use crate::pipeline::journal::Journal;
use crate::transcode::{FfmpegTranscoder, Transcoder};
use crate::types::{Operation, OperationKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Run result summary
#[derive(Debug)]
pub struct MirrorSummary {
    /// Directories created
    pub directories: usize,
    /// Non-audio files copied
    pub files_copied: usize,
    /// Tracks copied under their output names
    pub tracks_copied: usize,
    /// Tracks converted to the target format
    pub tracks_converted: usize,
    /// Every operation, in completion order
    pub operations: Vec<Operation>,
    pub elapsed: Duration,
}

impl MirrorSummary {
    pub fn tracks(&self) -> usize {
        self.tracks_copied + self.tracks_converted
    }
}

/// Mirror the library with the lofty tag reader and ffmpeg
pub fn run(settings: &Settings) -> Result<MirrorSummary> {
    let transcoder = FfmpegTranscoder::new(&settings.ffmpeg_path);
    if settings.target_format.is_some() && !settings.dry_run {
        transcoder.check_available()?;
    }
    run_with(settings, &LoftyProbe::new(), &transcoder)
}

/// Mirror the library with the given collaborators
///
/// The first failure anywhere aborts the run; output written so far is left
/// in place.
pub fn run_with(
    settings: &Settings,
    probe: &dyn MetadataProbe,
    transcoder: &dyn Transcoder,
) -> Result<MirrorSummary> {
    let start = Instant::now();

    validate_roots(&settings.input, &settings.output)?;
    configure_thread_pool(settings.probe_threads)?;

    if !settings.dry_run {
        std::fs::create_dir_all(&settings.output)
            .map_err(|e| MirrorError::create_dir(&settings.output, e))?;
    }

    info!(
        "Mirroring {} into {} (tags: {}, tracks: {})",
        settings.input.display(),
        settings.output.display(),
        probe.name(),
        match settings.target_format {
            Some(ref format) => format!("{} via {}", format, transcoder.name()),
            None => "copy".to_string(),
        }
    );

    let journal = if settings.show_progress {
        Journal::with_progress(spinner())
    } else {
        Journal::new()
    };

    let mirror = Mirror::new(settings, probe, transcoder, &journal);
    let outcome = mirror.run();
    journal.finish(if outcome.is_ok() { "Done" } else { "Failed" });
    outcome?;

    let summary = MirrorSummary {
        directories: journal.count(OperationKind::Mkdir),
        files_copied: journal.count(OperationKind::Copy),
        tracks_copied: journal.count(OperationKind::CopyTrack),
        tracks_converted: journal.count(OperationKind::Convert),
        operations: journal.into_operations(),
        elapsed: start.elapsed(),
    };

    if let Some(ref manifest) = settings.manifest {
        export::write_manifest(&summary.operations, settings, manifest)?;
    }

    info!(
        "Mirrored {} directories, {} files, {} tracks in {:.2}s",
        summary.directories,
        summary.files_copied,
        summary.tracks(),
        summary.elapsed.as_secs_f64()
    );

    Ok(summary)
}

/// Reject an input that is not a directory, or an output nested in the input
fn validate_roots(input: &Path, output: &Path) -> Result<()> {
    if !input.is_dir() {
        return Err(MirrorError::ConfigError(format!(
            "Input is not a directory: {}",
            input.display()
        )));
    }

    let input = input.canonicalize()?;
    let output = resolve_output(output)?;
    if output.starts_with(&input) {
        return Err(MirrorError::ConfigError(format!(
            "Output {} lies inside input {}; the mirror would copy itself",
            output.display(),
            input.display()
        )));
    }
    Ok(())
}

/// Absolute form of `output`, which may not exist yet
fn resolve_output(output: &Path) -> Result<PathBuf> {
    if output.exists() {
        return Ok(output.canonicalize()?);
    }
    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir()?.join(output)
    };
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(parent.canonicalize()?.join(name)),
        _ => Ok(absolute),
    }
}

/// Configure the Rayon thread pool used for tag reading
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        Ok(()) => {
            debug!("Configured thread pool with {} threads", num_threads);
        }
        Err(e) => {
            // If the pool is already initialized (e.g., in tests), that's OK
            if e.to_string().contains("already been initialized") {
                debug!("Thread pool already initialized, using existing pool");
            } else {
                return Err(MirrorError::ConfigError(format!(
                    "Failed to configure thread pool: {}",
                    e
                )));
            }
        }
    }
    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} entries {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
