//! Per-directory naming decisions
//!
//! A batch of track names is inspected once for an existing numeric field
//! (`prefix`), its tags are scanned once for padding widths (`padding`), and
//! both results are combined per track by the `namer`.

pub mod namer;
pub mod padding;
pub mod prefix;

pub use namer::Namer;
pub use padding::{calculate_padding, digit_width, padding_for};
pub use prefix::{detect_prefix, shared_numeric_field};
