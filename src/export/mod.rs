//! Export of the operation manifest

pub mod manifest;

pub use manifest::write_manifest;
