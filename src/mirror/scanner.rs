//! Listing of a single source directory

use crate::error::{MirrorError, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// One entry of a scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    /// Subdirectory, mirrored recursively
    Directory { name: OsString, path: PathBuf },
    /// Any non-track file, copied verbatim
    File { name: OsString, path: PathBuf },
    /// Audio track, deferred to the directory's batch
    Track { name: OsString },
}

/// List `dir` without touching the output tree
///
/// Entries are sorted by raw file name and symlinks are followed. A file is a
/// track when its name ends with the bytes of `audio_suffix` (case-sensitive,
/// e.g. `.flac`), whether or not the rest of the name is valid UTF-8.
pub fn scan_directory(dir: &Path, audio_suffix: &str) -> Result<Vec<ScanEntry>> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| MirrorError::ReadDir {
            path: e.path().unwrap_or(dir).to_path_buf(),
            reason: e.to_string(),
        })?;

        let name = entry.file_name().to_os_string();
        let scanned = if entry.file_type().is_dir() {
            ScanEntry::Directory {
                name,
                path: entry.into_path(),
            }
        } else if is_track_name(&name, audio_suffix) {
            ScanEntry::Track { name }
        } else {
            ScanEntry::File {
                name,
                path: entry.into_path(),
            }
        };
        trace!("Scanned {:?}", scanned);
        entries.push(scanned);
    }

    Ok(entries)
}

fn is_track_name(name: &OsStr, audio_suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(audio_suffix.as_bytes())
}
