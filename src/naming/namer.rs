//! Final output filenames for tracks

use crate::error::Result;
use crate::types::{PaddingScheme, PrefixVerdict, TrackMetadata};
use std::ffi::{OsStr, OsString};

/// Names tracks of one batch from its shared verdict and padding
#[derive(Debug, Clone, Copy)]
pub struct Namer {
    verdict: PrefixVerdict,
    padding: PaddingScheme,
}

impl Namer {
    pub fn new(verdict: PrefixVerdict, padding: PaddingScheme) -> Self {
        Self { verdict, padding }
    }

    /// Output name for `original`
    ///
    /// `read_metadata` is only called when the batch needs numbering.
    pub fn name<F>(&self, original: &OsStr, read_metadata: F) -> Result<OsString>
    where
        F: FnOnce() -> Result<TrackMetadata>,
    {
        if self.verdict.has_existing_numeric_prefix() {
            return Ok(original.to_os_string());
        }
        let metadata = read_metadata()?;
        Ok(self.numbered(original, &metadata))
    }

    /// Prefix `original` with the padded disc and track numbers
    pub fn numbered(&self, original: &OsStr, metadata: &TrackMetadata) -> OsString {
        let track_width = self.padding.track_width;
        let mut name = if self.padding.includes_disc() {
            let disc_width = self.padding.disc_width;
            OsString::from(format!(
                "{:0disc_width$}_{:0track_width$}_",
                metadata.disc, metadata.track
            ))
        } else {
            OsString::from(format!("{:0track_width$}_", metadata.track))
        };
        name.push(original);
        name
    }
}
