//! Finished-segment processing
//!
//! Each completed segment is matched against the event log, mined for
//! clips, and then deleted. The full segment is never retained: a failed
//! extraction permanently loses that window's footage.

use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use tracing::info;

use crate::config::RecorderConfig;
use crate::encoder::Encoder;
use crate::error::ClipCamResult;
use crate::extractor::{ClipExtractor, ClipOutcome};
use crate::log_reader::LogReader;

/// Counters describing how one segment was processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Log entries falling inside the segment window.
    pub matched: usize,
    /// Clips written to disk.
    pub saved: usize,
    /// Entries rejected because the clip would start before the segment.
    pub rejected: usize,
    /// Entries whose extraction failed at the encoder.
    pub failed: usize,
}

/// Turns each finished segment into event clips, then discards it.
pub struct SegmentProcessor<'a, E: Encoder> {
    encoder: &'a E,
    config: &'a RecorderConfig,
    log_reader: LogReader,
}

impl<'a, E: Encoder> SegmentProcessor<'a, E> {
    pub fn new(encoder: &'a E, config: &'a RecorderConfig) -> Self {
        Self {
            encoder,
            config,
            log_reader: LogReader::new(config.log_file.clone()),
        }
    }

    /// Extract a clip for every logged event inside the segment's window,
    /// then delete the segment unconditionally.
    pub async fn process(
        &self,
        segment_path: &Path,
        segment_start: NaiveDateTime,
    ) -> ClipCamResult<ProcessSummary> {
        let entries = self.log_reader.read()?;
        let segment_end = segment_start + Duration::seconds(self.config.segment_duration as i64);
        let extractor = ClipExtractor::new(self.encoder, self.config);

        let mut summary = ProcessSummary::default();
        for entry in entries {
            if entry < segment_start || entry > segment_end {
                continue;
            }
            summary.matched += 1;
            match extractor.extract(segment_path, segment_start, entry).await {
                ClipOutcome::Saved(_) => summary.saved += 1,
                ClipOutcome::TooEarly { .. } => summary.rejected += 1,
                ClipOutcome::EncoderError { .. } => summary.failed += 1,
            }
        }

        std::fs::remove_file(segment_path)?;
        info!(
            "Deleted full segment {} ({} events matched, {} clips saved)",
            segment_path.display(),
            summary.matched,
            summary.saved
        );

        Ok(summary)
    }
}
