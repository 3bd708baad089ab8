//! Continuous recording loop
//!
//! Captures fixed-duration segments forever and hands each one to the
//! segment processor. Terminates on a capture-phase encoder failure or on
//! Ctrl-C, salvaging whatever partial segment the interrupted capture left
//! behind.

use std::io::ErrorKind;

use chrono::{Local, NaiveDateTime};
use tracing::{error, info, warn};

use crate::config::RecorderConfig;
use crate::encoder::{CaptureRequest, Encoder};
use crate::error::{ClipCamError, ClipCamResult};
use crate::processor::SegmentProcessor;
use crate::timefmt;

pub struct RecordingLoop<'a, E: Encoder> {
    encoder: &'a E,
    config: &'a RecorderConfig,
}

impl<'a, E: Encoder> RecordingLoop<'a, E> {
    pub fn new(encoder: &'a E, config: &'a RecorderConfig) -> Self {
        Self { encoder, config }
    }

    /// Record segments until the encoder fails or the user interrupts.
    pub async fn run(&self) -> ClipCamResult<()> {
        let processor = SegmentProcessor::new(self.encoder, self.config);
        let temp_path = self.config.temp_segment_path();

        loop {
            let start_time = Local::now().naive_local();
            let request = CaptureRequest {
                format: self.config.capture_format.clone(),
                device: self.config.capture_device.clone(),
                buffer_size: self.config.capture_buffer.clone(),
                duration: self.config.segment_duration,
                output: temp_path.clone(),
            };

            info!(
                "Recording segment for {} seconds...",
                self.config.segment_duration
            );

            tokio::select! {
                report = self.encoder.capture(&request) => {
                    let report = report?;
                    if !report.completed() {
                        error!("Capture failed: {}", report.stderr.trim());
                        // No orphaned temp file on the failure path either.
                        if let Err(remove_error) = std::fs::remove_file(&temp_path) {
                            if remove_error.kind() != ErrorKind::NotFound {
                                warn!("Could not remove partial capture file: {}", remove_error);
                            }
                        }
                        return Err(ClipCamError::CaptureFailed {
                            code: report.exit_code,
                            stderr: report.stderr,
                        });
                    }

                    let end_time = Local::now().naive_local();
                    let segment_path = self
                        .config
                        .output_dir
                        .join(timefmt::media_filename(end_time));
                    std::fs::rename(&temp_path, &segment_path)?;
                    info!("Recording complete, segment saved as {}", segment_path.display());

                    if let Err(process_error) = processor.process(&segment_path, start_time).await {
                        warn!("Segment processing failed: {}", process_error);
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    if let Err(signal_error) = signal {
                        warn!("Ctrl-C handler failed: {}", signal_error);
                    }
                    info!("Recording interrupted by user");
                    // The dropped capture future has already killed the
                    // encoder at this point.
                    self.salvage(&processor, start_time).await;
                    return Ok(());
                }
            }
        }
    }

    /// Rename and process whatever the interrupted capture left behind,
    /// keeping the true capture start time as the extraction basis.
    async fn salvage(&self, processor: &SegmentProcessor<'a, E>, start_time: NaiveDateTime) {
        let temp_path = self.config.temp_segment_path();
        if !temp_path.exists() {
            info!("No partial segment to salvage");
            return;
        }

        let end_time = Local::now().naive_local();
        let segment_path = self
            .config
            .output_dir
            .join(timefmt::media_filename(end_time));
        if let Err(rename_error) = std::fs::rename(&temp_path, &segment_path) {
            warn!("Could not salvage partial segment: {}", rename_error);
            return;
        }

        info!("Partial segment saved as {}", segment_path.display());
        if let Err(process_error) = processor.process(&segment_path, start_time).await {
            warn!("Salvaged segment processing failed: {}", process_error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::testing::ScriptedEncoder;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_capture_failure_terminates_the_loop() {
        let dir = TempDir::new().unwrap();
        let config = RecorderConfig {
            log_file: dir.path().join("timestamps.log"),
            output_dir: dir.path().to_path_buf(),
            ..RecorderConfig::default()
        };

        let encoder = ScriptedEncoder::failing();
        let result = RecordingLoop::new(&encoder, &config).run().await;

        assert!(matches!(result, Err(ClipCamError::CaptureFailed { .. })));
        assert!(!config.temp_segment_path().exists());
    }
}
