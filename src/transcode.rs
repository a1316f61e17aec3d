//! Format conversion through an external ffmpeg process

use crate::error::{MirrorError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Converts one audio file into another container/codec
pub trait Transcoder: Send + Sync {
    /// Convert `input` into `output`, carrying tag metadata across
    ///
    /// Blocks until the conversion finishes.
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;

    /// Get the name of this transcoder (for logging)
    fn name(&self) -> &'static str;
}

/// Transcoder that shells out to ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Arguments passed to ffmpeg for one conversion
    ///
    /// Tags are mapped from the first input and written as ID3v2.3 where the
    /// target container uses ID3.
    pub fn arguments(input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "-nostdin".into(),
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-map_metadata".into(),
            "0".into(),
            "-id3v2_version".into(),
            "3".into(),
            output.as_os_str().to_owned(),
        ]
    }

    /// Verify the ffmpeg binary can be executed
    pub fn check_available(&self) -> Result<()> {
        let status = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| MirrorError::TranscoderUnavailable {
                reason: format!("cannot run {}: {}", self.ffmpeg_path.display(), e),
            })?;

        if !status.success() {
            return Err(MirrorError::TranscoderUnavailable {
                reason: format!("{} -version exited with {}", self.ffmpeg_path.display(), status),
            });
        }
        Ok(())
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let args = Self::arguments(input, output);
        debug!("{} {:?}", self.ffmpeg_path.display(), args);

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| MirrorError::Transcode {
                path: input.to_path_buf(),
                reason: format!("cannot run {}: {}", self.ffmpeg_path.display(), e),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(MirrorError::Transcode {
                path: input.to_path_buf(),
                reason: format!("ffmpeg exited with {}: {}", result.status, last_lines(&stderr, 5)),
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}

/// ffmpeg prints a long banner; the error is at the end
fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}
