//! Unified error types for trackmirror
//!
//! Error strategy: every error is fatal. The first failure anywhere in the
//! walk (including inside a concurrently running track task) aborts the run.
//! There is no retry and no cleanup of partially written output.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for trackmirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Cannot read directory '{path}': {reason}\n  Tip: Check the path exists and is readable")]
    ReadDir { path: PathBuf, reason: String },

    #[error("Cannot create directory '{path}': {reason}\n  Tip: The output tree must be empty of conflicting entries")]
    CreateDir { path: PathBuf, reason: String },

    #[error("Failed to copy '{from}' to '{to}': {reason}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Failed to read tags from '{path}': {reason}\n  Tip: Every track needs a readable tag container")]
    Metadata { path: PathBuf, reason: String },

    #[error("Failed to convert '{path}': {reason}")]
    Transcode { path: PathBuf, reason: String },

    #[error("Transcoder unavailable: {reason}\n  Tip: Install ffmpeg or point --ffmpeg at the binary")]
    TranscoderUnavailable { reason: String },

    #[error("Task for '{path}' panicked: {message}")]
    TaskPanicked { path: PathBuf, message: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for trackmirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    /// Create an output error, translating common io failures
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = describe_io(&path, &err);
        MirrorError::OutputError { path, reason }
    }

    /// Create a directory creation error
    pub fn create_dir(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = describe_io(&path, &err);
        MirrorError::CreateDir { path, reason }
    }

    /// Create a copy error
    pub fn copy(from: impl Into<PathBuf>, to: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let to = to.into();
        let reason = describe_io(&to, &err);
        MirrorError::Copy {
            from: from.into(),
            to,
            reason,
        }
    }
}

fn describe_io(path: &std::path::Path, err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => {
            format!("Permission denied. Check that you have write access to {}", path.display())
        }
        std::io::ErrorKind::NotFound => format!(
            "Directory does not exist: {}",
            path.parent().map(|p| p.display().to_string()).unwrap_or_default()
        ),
        std::io::ErrorKind::AlreadyExists => format!("Already exists: {}", path.display()),
        _ => err.to_string(),
    }
}
