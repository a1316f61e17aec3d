//! Depth-first mirroring of the source tree

use crate::config::Settings;
use crate::error::{MirrorError, Result};
use crate::metadata::MetadataProbe;
use crate::mirror::scanner::{scan_directory, ScanEntry};
use crate::naming::{calculate_padding, detect_prefix, Namer};
use crate::pipeline::dispatch::{dispatch_batch, TrackProcessor};
use crate::pipeline::journal::Journal;
use crate::transcode::Transcoder;
use crate::types::{DirectoryBatch, Operation, OperationKind};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;

/// Applies scanned directories to the output tree
pub struct Mirror<'a> {
    settings: &'a Settings,
    probe: &'a dyn MetadataProbe,
    journal: &'a Journal,
    processor: TrackProcessor<'a>,
    audio_suffix: String,
}

impl<'a> Mirror<'a> {
    pub fn new(
        settings: &'a Settings,
        probe: &'a dyn MetadataProbe,
        transcoder: &'a dyn Transcoder,
        journal: &'a Journal,
    ) -> Self {
        Self {
            settings,
            probe,
            journal,
            processor: TrackProcessor::new(settings, probe, transcoder, journal),
            audio_suffix: settings.audio_suffix(),
        }
    }

    /// Mirror the configured input root into the output root
    pub fn run(&self) -> Result<()> {
        self.mirror_directory(&self.settings.input, &self.settings.output)
    }

    /// Mirror `input` into the existing directory `output`
    ///
    /// Entries are handled in name order: subdirectories are created and
    /// mirrored completely before the next entry, other files are copied
    /// immediately, and tracks are collected. Once every entry is done the
    /// collected batch is named and dispatched, and this returns only after
    /// every track of the batch has been written.
    pub fn mirror_directory(&self, input: &Path, output: &Path) -> Result<()> {
        let entries = scan_directory(input, &self.audio_suffix)?;
        let mut batch = DirectoryBatch::new(input.to_path_buf(), output.to_path_buf());

        for entry in entries {
            match entry {
                ScanEntry::Directory { name, path } => {
                    let destination = output.join(output_dir_name(&name));
                    self.create_directory(&path, &destination)?;
                    self.mirror_directory(&path, &destination)?;
                }
                ScanEntry::File { name, path } => {
                    let destination = output.join(&name);
                    if !self.settings.dry_run {
                        copy_file(&path, &destination)?;
                    }
                    self.journal
                        .record(Operation::new(OperationKind::Copy, path, destination));
                }
                ScanEntry::Track { name } => batch.names.push(name),
            }
        }

        if batch.is_empty() {
            return Ok(());
        }

        let lossy_names: Vec<_> = batch.names.iter().map(|n| n.to_string_lossy()).collect();
        let verdict = detect_prefix(&lossy_names);
        let padding = calculate_padding(&batch, self.probe)?;
        debug!(
            "{}: {} tracks, {:?}",
            input.display(),
            batch.len(),
            verdict
        );

        dispatch_batch(&batch, Namer::new(verdict, padding), &self.processor)
    }

    /// Create `destination` with the permissions of `source`
    fn create_directory(&self, source: &Path, destination: &Path) -> Result<()> {
        if !self.settings.dry_run {
            let permissions = fs::metadata(source)
                .map_err(|e| MirrorError::ReadDir {
                    path: source.to_path_buf(),
                    reason: e.to_string(),
                })?
                .permissions();
            make_dir(destination, permissions)
                .map_err(|e| MirrorError::create_dir(destination, e))?;
        }
        self.journal
            .record(Operation::new(OperationKind::Mkdir, source, destination));
        Ok(())
    }
}

/// Create a directory with the source mode, masked by the process umask
#[cfg(unix)]
fn make_dir(destination: &Path, permissions: fs::Permissions) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new()
        .mode(permissions.mode() & 0o7777)
        .create(destination)
}

#[cfg(not(unix))]
fn make_dir(destination: &Path, permissions: fs::Permissions) -> io::Result<()> {
    fs::create_dir(destination)?;
    fs::set_permissions(destination, permissions)
}

/// Output name for a source directory: lowercased when it is valid UTF-8
pub fn output_dir_name(name: &OsStr) -> OsString {
    match name.to_str() {
        Some(name) => name.to_lowercase().into(),
        None => name.to_os_string(),
    }
}

/// Copy the bytes of `from` into a newly created `to`
///
/// The destination gets default creation permissions, not the source's.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    let mut source = File::open(from).map_err(|e| MirrorError::copy(from, to, e))?;
    let mut destination = File::create(to).map_err(|e| MirrorError::copy(from, to, e))?;
    io::copy(&mut source, &mut destination).map_err(|e| MirrorError::copy(from, to, e))
}
