//! Zero-padding widths for track and disc numbers

use crate::error::Result;
use crate::metadata::MetadataProbe;
use crate::types::{DirectoryBatch, PaddingScheme, TrackMetadata};
use rayon::prelude::*;
use tracing::debug;

/// Number of decimal digits needed to print `value`; zero prints as one digit
pub fn digit_width(value: u32) -> usize {
    match value.checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    }
}

/// Compute the padding scheme for already-read tags
///
/// Totals count from one while numbers may count from zero, so a total of
/// `n` only demands room for `n - 1`.
pub fn padding_for(metadata: &[TrackMetadata]) -> PaddingScheme {
    let (max_track, max_disc) = metadata.iter().fold((0u32, 0u32), |(track, disc), m| {
        (
            track.max(m.track).max(m.total_tracks.saturating_sub(1)),
            disc.max(m.disc).max(m.total_discs.saturating_sub(1)),
        )
    });

    PaddingScheme {
        track_width: digit_width(max_track),
        disc_width: digit_width(max_disc),
        max_disc,
    }
}

/// Read every track's tags in the batch and compute its padding scheme
///
/// Tags are read on the rayon pool. Any unreadable track fails the batch.
pub fn calculate_padding(batch: &DirectoryBatch, probe: &dyn MetadataProbe) -> Result<PaddingScheme> {
    let metadata = batch
        .names
        .par_iter()
        .map(|name| probe.probe(&batch.source_path(name)))
        .collect::<Result<Vec<_>>>()?;

    let scheme = padding_for(&metadata);
    debug!(
        "Padding for {}: track width {}, disc width {}, max disc {}",
        batch.input.display(),
        scheme.track_width,
        scheme.disc_width,
        scheme.max_disc
    );
    Ok(scheme)
}
