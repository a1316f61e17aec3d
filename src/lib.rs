//! trackmirror - Music library mirroring with sortable track names
//!
//! Recreates a library tree under a new root. Directory names are lowercased,
//! non-audio files are copied verbatim, and the audio tracks of each directory
//! are either kept under their names (when those already share a numeric
//! field) or prefixed with zero-padded disc/track numbers read from their
//! tags, optionally converting them with ffmpeg.
//!
//! # Architecture
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `mirror`: Directory scanning and the depth-first walk
//! - `naming`: Numeric-prefix detection, padding widths, output names
//! - `metadata`: Tag reading using lofty
//! - `transcode`: Format conversion through ffmpeg
//! - `pipeline`: Per-directory concurrent dispatch and the run entry point
//! - `export`: JSON manifest output
//!
//! # Example
//!
//! ```no_run
//! use trackmirror::{config::Settings, pipeline};
//!
//! let settings = Settings {
//!     input: "Music".into(),
//!     output: "/mnt/player/Music".into(),
//!     ..Settings::default()
//! };
//! let summary = pipeline::run(&settings).expect("Mirror failed");
//! println!("Wrote {} tracks", summary.tracks());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod metadata;
pub mod mirror;
pub mod naming;
pub mod pipeline;
pub mod transcode;
pub mod types;

// Re-export key types at crate root
pub use error::{MirrorError, Result};
pub use metadata::{LoftyProbe, MetadataProbe};
pub use transcode::{FfmpegTranscoder, Transcoder};
pub use types::{DirectoryBatch, PaddingScheme, PrefixVerdict, TrackMetadata};
