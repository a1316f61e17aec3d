//! Concurrent processing of one directory's tracks
//!
//! Every track in a batch gets its own scoped thread; there is no worker cap.
//! The dispatcher joins all of them before returning, so a directory is only
//! done once each of its tracks has been written.

use crate::config::Settings;
use crate::error::{MirrorError, Result};
use crate::metadata::MetadataProbe;
use crate::mirror::walker::copy_file;
use crate::naming::Namer;
use crate::pipeline::journal::Journal;
use crate::transcode::Transcoder;
use crate::types::{DirectoryBatch, Operation, OperationKind};
use std::any::Any;
use std::ffi::{OsStr, OsString};
use std::thread;
use tracing::{debug, error};

/// Names and writes single tracks
pub struct TrackProcessor<'a> {
    settings: &'a Settings,
    probe: &'a dyn MetadataProbe,
    transcoder: &'a dyn Transcoder,
    journal: &'a Journal,
    audio_suffix: String,
}

impl<'a> TrackProcessor<'a> {
    pub fn new(
        settings: &'a Settings,
        probe: &'a dyn MetadataProbe,
        transcoder: &'a dyn Transcoder,
        journal: &'a Journal,
    ) -> Self {
        Self {
            settings,
            probe,
            transcoder,
            journal,
            audio_suffix: settings.audio_suffix(),
        }
    }

    /// Name one track and copy or convert it into the batch's output directory
    pub fn process(&self, batch: &DirectoryBatch, namer: &Namer, name: &OsStr) -> Result<()> {
        let source = batch.source_path(name);
        let output_name = namer.name(name, || self.probe.probe(&source))?;
        debug!("{:?} -> {:?}", name, output_name);

        let operation = match self.settings.target_format.as_deref() {
            Some(format) => {
                let destination = batch
                    .output
                    .join(converted_name(&output_name, &self.audio_suffix, format));
                if !self.settings.dry_run {
                    self.transcoder.transcode(&source, &destination)?;
                }
                Operation::new(OperationKind::Convert, source, destination)
            }
            None => {
                let destination = batch.output.join(&output_name);
                if !self.settings.dry_run {
                    copy_file(&source, &destination)?;
                }
                Operation::new(OperationKind::CopyTrack, source, destination)
            }
        };

        self.journal.record(operation);
        Ok(())
    }
}

/// Replace the audio suffix of `name` with `.format`
pub fn converted_name(name: &OsStr, audio_suffix: &str, format: &str) -> OsString {
    let mut converted = strip_suffix(name, audio_suffix).to_os_string();
    converted.push(".");
    converted.push(format);
    converted
}

#[cfg(unix)]
fn strip_suffix<'a>(name: &'a OsStr, suffix: &str) -> &'a OsStr {
    use std::os::unix::ffi::OsStrExt;

    let bytes = name.as_bytes();
    OsStr::from_bytes(bytes.strip_suffix(suffix.as_bytes()).unwrap_or(bytes))
}

#[cfg(not(unix))]
fn strip_suffix<'a>(name: &'a OsStr, suffix: &str) -> &'a OsStr {
    name.to_str()
        .and_then(|n| n.strip_suffix(suffix))
        .map(OsStr::new)
        .unwrap_or(name)
}

/// Process every track of `batch` concurrently and wait for all of them
///
/// All tasks run to completion even when one fails. The first failure in
/// batch order is returned; later ones are logged.
pub fn dispatch_batch(batch: &DirectoryBatch, namer: Namer, processor: &TrackProcessor) -> Result<()> {
    debug!(
        "Dispatching {} tracks from {}",
        batch.len(),
        batch.input.display()
    );

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(batch.len());
        let mut spawn_error = None;

        for (index, name) in batch.names.iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("track-{index}"))
                .spawn_scoped(scope, move || processor.process(batch, &namer, name));
            match spawned {
                Ok(handle) => handles.push((name, handle)),
                Err(e) => {
                    spawn_error = Some(MirrorError::Io(e));
                    break;
                }
            }
        }

        let mut first_error = None;
        for (name, handle) in handles {
            let result = handle.join().unwrap_or_else(|panic_info| {
                Err(MirrorError::TaskPanicked {
                    path: batch.source_path(name),
                    message: panic_message(panic_info),
                })
            });

            if let Err(e) = result {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    error!("Also failed in {}: {}", batch.input.display(), e);
                }
            }
        }

        match first_error.or(spawn_error) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    })
}

fn panic_message(panic_info: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
