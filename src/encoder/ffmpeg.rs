//! FFmpeg execution adapter
//!
//! Shells out to ffmpeg for both live capture and clip extraction. Output
//! streams are always consumed to completion before control returns.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{CaptureRequest, Encoder, EncoderReport, ExtractRequest};
use crate::error::{ClipCamError, ClipCamResult};

/// Encoder adapter invoking an ffmpeg binary.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Probe that the encoder binary can be launched at all.
    pub async fn verify_available(&self) -> ClipCamResult<()> {
        let output = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ClipCamError::EncoderSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ClipCamError::EncoderUnavailable {
                program: self.program.clone(),
                message: format!("-version probe exited with {:?}", output.status.code()),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout);
        let first_line = version.lines().next().unwrap_or("unknown");
        info!("Using {}", first_line);
        Ok(())
    }

    fn spawn_error(&self, source: std::io::Error) -> ClipCamError {
        ClipCamError::EncoderSpawn {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    async fn capture(&self, request: &CaptureRequest) -> ClipCamResult<EncoderReport> {
        let mut command = Command::new(&self.program);
        command
            .arg("-f")
            .arg(&request.format)
            .arg("-rtbufsize")
            .arg(&request.buffer_size)
            .arg("-i")
            .arg(&request.device)
            .arg("-t")
            .arg(request.duration.to_string())
            .args(["-c:a", "aac"])
            .arg("-y")
            .arg(&request.output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The caller cancels a capture by dropping its future; the child
            // must not outlive it.
            .kill_on_drop(true);

        debug!("Capture command: {:?}", command.as_std());

        let child = command.spawn().map_err(|source| self.spawn_error(source))?;
        let output = child.wait_with_output().await?;
        Ok(EncoderReport::from_output(output, &request.output))
    }

    async fn extract(&self, request: &ExtractRequest) -> ClipCamResult<EncoderReport> {
        let mut command = Command::new(&self.program);
        command
            .arg("-i")
            .arg(&request.input)
            .arg("-ss")
            .arg(request.seek.to_string())
            .arg("-t")
            .arg(request.duration.to_string())
            // Re-encode for seek precision
            .args(["-c:v", "libx264", "-preset", "ultrafast"])
            .args(["-c:a", "aac", "-b:a", "128k"])
            .arg("-y")
            .arg(&request.output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Extract command: {:?}", command.as_std());

        let output = command
            .output()
            .await
            .map_err(|source| self.spawn_error(source))?;
        Ok(EncoderReport::from_output(output, &request.output))
    }
}
