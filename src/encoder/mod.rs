//! Encoder port and invocation reports
//!
//! The external encoder is an opaque collaborator invoked as a subprocess.
//! Components talk to it through the [`Encoder`] trait so tests can swap in
//! a scripted double; the real adapter lives in [`ffmpeg`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ClipCamResult;

pub mod ffmpeg;

pub use ffmpeg::FfmpegEncoder;

/// One live-capture invocation.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Input demuxer selecting the capture backend (`-f`).
    pub format: String,
    /// Device identifier (`-i`).
    pub device: String,
    /// Realtime buffer size (`-rtbufsize`).
    pub buffer_size: String,
    /// Seconds to record.
    pub duration: u64,
    /// Temporary file the encoder records into.
    pub output: PathBuf,
}

/// One clip-extraction invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    /// Segment file to cut from.
    pub input: PathBuf,
    /// Seek offset into the input, in seconds.
    pub seek: i64,
    /// Seconds of video and audio to re-encode.
    pub duration: u64,
    /// Clip file to write, overwriting any existing file.
    pub output: PathBuf,
}

/// Derived success/failure classification of an encoder invocation.
///
/// Replaces matching on the encoder's error-stream wording: an invocation
/// that exits zero without leaving a usable output file is classified as
/// [`EncoderOutcome::NoOutput`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderOutcome {
    /// Zero exit and a non-empty output file.
    Completed,
    /// Zero exit but the output file is missing or empty.
    NoOutput,
    /// Non-zero exit, or termination by signal.
    Failed,
}

/// Exit state and captured streams of one finished encoder invocation.
#[derive(Debug, Clone)]
pub struct EncoderReport {
    /// Exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub outcome: EncoderOutcome,
}

impl EncoderReport {
    /// Classify a finished invocation against the file it was meant to write.
    pub fn from_output(output: std::process::Output, expected: &Path) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            outcome: classify(output.status.success(), expected),
        }
    }

    pub fn completed(&self) -> bool {
        self.outcome == EncoderOutcome::Completed
    }
}

fn classify(exited_zero: bool, expected: &Path) -> EncoderOutcome {
    if !exited_zero {
        EncoderOutcome::Failed
    } else if !has_content(expected) {
        EncoderOutcome::NoOutput
    } else {
        EncoderOutcome::Completed
    }
}

fn has_content(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.len() > 0)
        .unwrap_or(false)
}

/// Seam over the external encoder process.
#[async_trait]
pub trait Encoder {
    /// Record `request.duration` seconds from a live device into
    /// `request.output`, blocking until the encoder exits.
    async fn capture(&self, request: &CaptureRequest) -> ClipCamResult<EncoderReport>;

    /// Re-encode a windowed clip out of an existing segment file.
    async fn extract(&self, request: &ExtractRequest) -> ClipCamResult<EncoderReport>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nonzero_exit_classified_as_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"frames").unwrap();
        assert_eq!(classify(false, &path), EncoderOutcome::Failed);
    }

    #[test]
    fn test_zero_exit_without_output_file_classified_as_no_output() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            classify(true, &dir.path().join("clip.mp4")),
            EncoderOutcome::NoOutput
        );
    }

    #[test]
    fn test_zero_exit_with_empty_output_file_classified_as_no_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(classify(true, &path), EncoderOutcome::NoOutput);
    }

    #[test]
    fn test_zero_exit_with_content_classified_as_completed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"frames").unwrap();
        assert_eq!(classify(true, &path), EncoderOutcome::Completed);
    }
}
