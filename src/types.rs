//! Core data types for trackmirror
//!
//! These types represent the domain model and flow through the pipeline.

use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

// =============================================================================
// Track metadata
// =============================================================================

/// Track and disc numbering read from an audio file's tags
///
/// Missing fields read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub track: u32,
    pub total_tracks: u32,
    pub disc: u32,
    pub total_discs: u32,
}

impl TrackMetadata {
    pub fn new(track: u32, total_tracks: u32, disc: u32, total_discs: u32) -> Self {
        Self {
            track,
            total_tracks,
            disc,
            total_discs,
        }
    }
}

// =============================================================================
// Per-directory naming decisions
// =============================================================================

/// Whether a batch's filenames already carry a shared numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixVerdict {
    /// Names already sort consistently, leave them untouched
    AlreadyNumbered,
    /// Names need a disc/track prefix derived from tags
    NeedsNumbering,
}

impl PrefixVerdict {
    pub fn has_existing_numeric_prefix(self) -> bool {
        matches!(self, PrefixVerdict::AlreadyNumbered)
    }
}

/// Zero-padding widths shared by every track in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingScheme {
    pub track_width: usize,
    pub disc_width: usize,
    /// Largest disc number seen; 0 means the batch is single-disc
    pub max_disc: u32,
}

impl PaddingScheme {
    /// Disc numbers are only written when some track is on a disc other than 0
    pub fn includes_disc(&self) -> bool {
        self.max_disc != 0
    }
}

impl Default for PaddingScheme {
    fn default() -> Self {
        Self {
            track_width: 1,
            disc_width: 1,
            max_disc: 0,
        }
    }
}

/// The audio files directly inside one source directory
#[derive(Debug, Clone)]
pub struct DirectoryBatch {
    /// Source directory
    pub input: PathBuf,
    /// Mirrored output directory
    pub output: PathBuf,
    /// Track filenames, in scan order
    pub names: Vec<OsString>,
}

impl DirectoryBatch {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            names: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn source_path(&self, name: &OsStr) -> PathBuf {
        self.input.join(name)
    }
}

// =============================================================================
// Performed operations
// =============================================================================

/// Kind of filesystem operation performed on the output tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Directory created
    Mkdir,
    /// Non-audio file copied verbatim
    Copy,
    /// Track copied under its output name
    CopyTrack,
    /// Track converted under its output name
    Convert,
}

/// A single operation recorded in the run journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Operation {
    pub fn new(kind: OperationKind, source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            OperationKind::Mkdir => write!(f, "mkdir {}", self.destination.display()),
            OperationKind::Copy | OperationKind::CopyTrack => write!(
                f,
                "cp {} {}",
                self.source.display(),
                self.destination.display()
            ),
            OperationKind::Convert => write!(
                f,
                "convert {} {}",
                self.source.display(),
                self.destination.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_disc_scheme_omits_disc() {
        let scheme = PaddingScheme::default();
        assert!(!scheme.includes_disc());
    }

    #[test]
    fn test_operation_display_matches_shell_style() {
        let op = Operation::new(OperationKind::Copy, "in/a.jpg", "out/a.jpg");
        assert_eq!(op.to_string(), "cp in/a.jpg out/a.jpg");
        let op = Operation::new(OperationKind::Mkdir, "in/Album", "out/album");
        assert_eq!(op.to_string(), "mkdir out/album");
    }
}
