//! Clip extraction around logged event timestamps

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, error, info, warn};

use crate::config::RecorderConfig;
use crate::encoder::{Encoder, EncoderOutcome, ExtractRequest};
use crate::timefmt;

/// Result of one clip-extraction attempt.
///
/// Failures are local: the caller keeps processing the remaining entries
/// either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipOutcome {
    /// Clip written to the returned path.
    Saved(PathBuf),
    /// The event is too close to the segment start to fit a full clip.
    TooEarly { offset: i64 },
    /// The encoder failed or produced no usable output.
    EncoderError { detail: String },
}

/// Produces short clips ending at logged event timestamps.
pub struct ClipExtractor<'a, E: Encoder> {
    encoder: &'a E,
    config: &'a RecorderConfig,
}

impl<'a, E: Encoder> ClipExtractor<'a, E> {
    pub fn new(encoder: &'a E, config: &'a RecorderConfig) -> Self {
        Self { encoder, config }
    }

    /// Extract a `clip_duration`-second clip ending at `event_time` from a
    /// segment that started recording at `segment_start`.
    pub async fn extract(
        &self,
        segment_path: &Path,
        segment_start: NaiveDateTime,
        event_time: NaiveDateTime,
    ) -> ClipOutcome {
        let elapsed = (event_time - segment_start).num_seconds();
        let offset = elapsed - self.config.clip_duration as i64;

        if offset < 0 {
            warn!(
                "Skipping event {}: clip would start {}s before the segment",
                timefmt::format_timestamp(event_time),
                -offset
            );
            return ClipOutcome::TooEarly { offset };
        }

        let clip_path = self
            .config
            .output_dir
            .join(timefmt::media_filename(event_time));
        let request = ExtractRequest {
            input: segment_path.to_path_buf(),
            seek: offset,
            duration: self.config.clip_duration,
            output: clip_path.clone(),
        };

        info!(
            "Extracting {}-second clip: {}",
            self.config.clip_duration,
            clip_path.display()
        );

        let report = match self.encoder.extract(&request).await {
            Ok(report) => report,
            Err(error) => {
                error!("Encoder invocation failed: {}", error);
                return ClipOutcome::EncoderError {
                    detail: error.to_string(),
                };
            }
        };

        debug!("Encoder stdout: {}", report.stdout.trim());
        debug!("Encoder stderr: {}", report.stderr.trim());

        match report.outcome {
            EncoderOutcome::Completed => {
                info!("Clip saved: {}", clip_path.display());
                ClipOutcome::Saved(clip_path)
            }
            EncoderOutcome::NoOutput => {
                error!(
                    "Extraction failed: no frames written to {}",
                    clip_path.display()
                );
                ClipOutcome::EncoderError {
                    detail: "encoder produced no output".to_string(),
                }
            }
            EncoderOutcome::Failed => {
                error!(
                    "Encoder exited with code {:?} while extracting {}: {}",
                    report.exit_code,
                    clip_path.display(),
                    report.stderr.trim()
                );
                ClipOutcome::EncoderError {
                    detail: format!("encoder exited with code {:?}", report.exit_code),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::testing::ScriptedEncoder;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> RecorderConfig {
        RecorderConfig {
            segment_duration: 60,
            clip_duration: 10,
            log_file: dir.path().join("timestamps.log"),
            output_dir: dir.path().to_path_buf(),
            ..RecorderConfig::default()
        }
    }

    fn at(value: &str) -> NaiveDateTime {
        timefmt::parse_timestamp(value).unwrap()
    }

    #[tokio::test]
    async fn test_seek_offset_and_output_name() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let encoder = ScriptedEncoder::completing();
        let extractor = ClipExtractor::new(&encoder, &config);

        let segment = dir.path().join("segment.mp4");
        let outcome = extractor
            .extract(&segment, at("2024-01-01_10-00-00"), at("2024-01-01_10-00-30"))
            .await;

        let expected_clip = dir.path().join("2024-01-01_10-00-30.mp4");
        assert_eq!(outcome, ClipOutcome::Saved(expected_clip.clone()));

        let requests = encoder.extract_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].input, segment);
        assert_eq!(requests[0].seek, 20);
        assert_eq!(requests[0].duration, 10);
        assert_eq!(requests[0].output, expected_clip);
    }

    #[tokio::test]
    async fn test_event_too_close_to_segment_start_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let encoder = ScriptedEncoder::completing();
        let extractor = ClipExtractor::new(&encoder, &config);

        let outcome = extractor
            .extract(
                &dir.path().join("segment.mp4"),
                at("2024-01-01_10-00-00"),
                at("2024-01-01_10-00-05"),
            )
            .await;

        assert_eq!(outcome, ClipOutcome::TooEarly { offset: -5 });
        assert!(encoder.extract_requests().is_empty());
        assert!(!dir.path().join("2024-01-01_10-00-05.mp4").exists());
    }

    #[tokio::test]
    async fn test_encoder_failure_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let encoder = ScriptedEncoder::failing();
        let extractor = ClipExtractor::new(&encoder, &config);

        let outcome = extractor
            .extract(
                &dir.path().join("segment.mp4"),
                at("2024-01-01_10-00-00"),
                at("2024-01-01_10-00-30"),
            )
            .await;

        assert!(matches!(outcome, ClipOutcome::EncoderError { .. }));
        assert_eq!(encoder.extract_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_event_exactly_one_clip_length_in_has_zero_offset() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let encoder = ScriptedEncoder::completing();
        let extractor = ClipExtractor::new(&encoder, &config);

        let outcome = extractor
            .extract(
                &dir.path().join("segment.mp4"),
                at("2024-01-01_10-00-00"),
                at("2024-01-01_10-00-10"),
            )
            .await;

        assert!(matches!(outcome, ClipOutcome::Saved(_)));
        assert_eq!(encoder.extract_requests()[0].seek, 0);
    }
}
