//! Track/disc numbering extraction from audio file tags
//!
//! Uses lofty to read ID3v2 (MP3), Vorbis comments (FLAC), and MP4 atoms.

use crate::error::{MirrorError, Result};
use crate::types::TrackMetadata;
use lofty::{Accessor, Probe, TaggedFile, TaggedFileExt};
use std::path::Path;
use tracing::trace;

/// Source of track numbering for one audio file
pub trait MetadataProbe: Send + Sync {
    /// Read `(track, total tracks, disc, total discs)` from `path`
    ///
    /// Fails when the file is unreadable or carries no tag container.
    fn probe(&self, path: &Path) -> Result<TrackMetadata>;

    /// Get the name of this probe (for logging)
    fn name(&self) -> &'static str;
}

/// Tag reader backed by lofty
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl LoftyProbe {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> Result<TrackMetadata> {
        let tagged_file = read_tagged_file(path).map_err(|e| MirrorError::Metadata {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| MirrorError::Metadata {
                path: path.to_path_buf(),
                reason: "no tag container found".to_string(),
            })?;

        let metadata = TrackMetadata {
            track: tag.track().unwrap_or(0),
            total_tracks: tag.track_total().unwrap_or(0),
            disc: tag.disk().unwrap_or(0),
            total_discs: tag.disk_total().unwrap_or(0),
        };
        trace!("Tags for {}: {:?}", path.display(), metadata);

        Ok(metadata)
    }

    fn name(&self) -> &'static str {
        "lofty"
    }
}

/// File type comes from the content, falling back to the extension
fn read_tagged_file(path: &Path) -> std::result::Result<TaggedFile, lofty::error::LoftyError> {
    Probe::open(path)?.guess_file_type()?.read()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::{Tag, TagExt, TagType};
    use std::fs;
    use tempfile::TempDir;

    /// Write a frameless FLAC: marker, STREAMINFO, then a PADDING block
    fn write_bare_flac(path: &Path) {
        let mut bytes = b"fLaC".to_vec();
        // Type 0 (STREAMINFO), 34 bytes; a PADDING block follows
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
        bytes.extend_from_slice(&4096u16.to_be_bytes());
        bytes.extend_from_slice(&4096u16.to_be_bytes());
        bytes.extend_from_slice(&[0; 6]);
        // 44.1 kHz, 2 channels, 16 bits, 0 samples
        let packed = (44_100u64 << 44) | (1u64 << 41) | (15u64 << 36);
        bytes.extend_from_slice(&packed.to_be_bytes());
        bytes.extend_from_slice(&[0; 16]);
        // Last-block flag, type 1 (PADDING), 4 bytes
        bytes.extend_from_slice(&[0x81, 0x00, 0x00, 0x04, 0, 0, 0, 0]);
        fs::write(path, bytes).unwrap();
    }

    fn write_tagged_flac(path: &Path, configure: impl FnOnce(&mut Tag)) {
        write_bare_flac(path);
        let mut tag = Tag::new(TagType::VorbisComments);
        configure(&mut tag);
        tag.save_to_path(path).expect("Failed to write Vorbis comments");
    }

    #[test]
    fn test_reads_all_numbering_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.flac");
        write_tagged_flac(&path, |tag| {
            tag.set_track(7);
            tag.set_track_total(12);
            tag.set_disk(2);
            tag.set_disk_total(3);
        });

        let metadata = LoftyProbe::new().probe(&path).unwrap();
        assert_eq!(metadata, TrackMetadata::new(7, 12, 2, 3));
    }

    #[test]
    fn test_missing_fields_read_as_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.flac");
        write_tagged_flac(&path, |tag| {
            tag.set_title("Untitled".to_string());
            tag.set_track(4);
        });

        let metadata = LoftyProbe::new().probe(&path).unwrap();
        assert_eq!(metadata, TrackMetadata::new(4, 0, 0, 0));
    }

    #[test]
    fn test_type_detected_from_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.audio");
        write_tagged_flac(&path, |tag| {
            tag.set_track(1);
            tag.set_disk(1);
        });

        let metadata = LoftyProbe::new().probe(&path).unwrap();
        assert_eq!(metadata, TrackMetadata::new(1, 0, 1, 0));
    }

    #[test]
    fn test_untagged_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.flac");
        write_bare_flac(&path);

        let result = LoftyProbe::new().probe(&path);
        assert!(matches!(result, Err(MirrorError::Metadata { .. })));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = LoftyProbe::new().probe(Path::new("/nonexistent/track.flac"));
        assert!(matches!(result, Err(MirrorError::Metadata { .. })));
    }

    #[test]
    fn test_non_audio_content_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.flac");
        fs::write(&path, b"definitely not a flac stream").unwrap();

        match LoftyProbe::new().probe(&path) {
            Err(MirrorError::Metadata { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Metadata error, got {other:?}"),
        }
    }
}
