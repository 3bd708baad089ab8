//! Recorder configuration
//!
//! Configuration is an explicit struct handed to each component at
//! construction. Precedence follows CLI > environment > file > defaults;
//! environment overrides are handled by the CLI layer.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::cli::Cli;
use crate::error::{ClipCamError, ClipCamResult};

/// Config file picked up from the working directory when `--config` is unset.
const DEFAULT_CONFIG_FILE: &str = "clipcam.toml";

/// Name of the in-progress capture file inside the output directory.
const TEMP_SEGMENT_NAME: &str = "segment-in-progress.mp4";

/// Runtime configuration passed explicitly to every component.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Seconds of continuous capture per segment.
    pub segment_duration: u64,
    /// Seconds retained per logged event. Must not exceed `segment_duration`.
    pub clip_duration: u64,
    /// Capture device identifier handed to the encoder (`-i`).
    pub capture_device: String,
    /// Encoder input demuxer (`-f`), e.g. `dshow` or `v4l2`.
    pub capture_format: String,
    /// Encoder realtime buffer size (`-rtbufsize`).
    pub capture_buffer: String,
    /// Event timestamp log written by an external process.
    pub log_file: PathBuf,
    /// Directory receiving segments and clips.
    pub output_dir: PathBuf,
    /// Encoder program to invoke.
    pub ffmpeg_path: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            segment_duration: 60,
            clip_duration: 10,
            capture_device: "video=Integrated Webcam".to_string(),
            capture_format: "dshow".to_string(),
            capture_buffer: "150M".to_string(),
            log_file: PathBuf::from("timestamps.log"),
            output_dir: PathBuf::from("."),
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

/// Optional values parsed from a TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    segment_duration: Option<u64>,
    clip_duration: Option<u64>,
    capture_device: Option<String>,
    capture_format: Option<String>,
    capture_buffer: Option<String>,
    log_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    ffmpeg_path: Option<String>,
}

impl RecorderConfig {
    /// Build the effective configuration from defaults, an optional TOML
    /// file, and CLI/environment overrides, then validate it.
    pub fn load(cli: &Cli) -> ClipCamResult<Self> {
        let mut config = Self::default();

        if let Some(path) = cli.config.as_deref() {
            config.apply_file(path)?;
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            config.apply_file(Path::new(DEFAULT_CONFIG_FILE))?;
        }

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Path of the temporary file the encoder records into.
    pub fn temp_segment_path(&self) -> PathBuf {
        self.output_dir.join(TEMP_SEGMENT_NAME)
    }

    fn apply_file(&mut self, path: &Path) -> ClipCamResult<()> {
        let content = std::fs::read_to_string(path).map_err(|error| ClipCamError::ConfigFile {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;

        let file: FileConfig = toml::from_str(&content).map_err(|error| ClipCamError::ConfigFile {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;

        if let Some(value) = file.segment_duration {
            self.segment_duration = value;
        }
        if let Some(value) = file.clip_duration {
            self.clip_duration = value;
        }
        if let Some(value) = file.capture_device {
            self.capture_device = value;
        }
        if let Some(value) = file.capture_format {
            self.capture_format = value;
        }
        if let Some(value) = file.capture_buffer {
            self.capture_buffer = value;
        }
        if let Some(value) = file.log_file {
            self.log_file = value;
        }
        if let Some(value) = file.output_dir {
            self.output_dir = value;
        }
        if let Some(value) = file.ffmpeg_path {
            self.ffmpeg_path = value;
        }

        info!("Loaded configuration from {}", path.display());
        Ok(())
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(value) = cli.segment_duration {
            self.segment_duration = value;
        }
        if let Some(value) = cli.clip_duration {
            self.clip_duration = value;
        }
        if let Some(value) = cli.device.clone() {
            self.capture_device = value;
        }
        if let Some(value) = cli.capture_format.clone() {
            self.capture_format = value;
        }
        if let Some(value) = cli.log_file.clone() {
            self.log_file = value;
        }
        if let Some(value) = cli.output_dir.clone() {
            self.output_dir = value;
        }
        if let Some(value) = cli.ffmpeg_path.clone() {
            self.ffmpeg_path = value;
        }
    }

    fn validate(&self) -> ClipCamResult<()> {
        if self.segment_duration == 0 {
            return Err(ClipCamError::InvalidConfig(
                "segment_duration must be greater than zero".to_string(),
            ));
        }
        if self.clip_duration == 0 {
            return Err(ClipCamError::InvalidConfig(
                "clip_duration must be greater than zero".to_string(),
            ));
        }
        if self.clip_duration > self.segment_duration {
            return Err(ClipCamError::InvalidConfig(format!(
                "clip_duration ({}s) cannot exceed segment_duration ({}s)",
                self.clip_duration, self.segment_duration
            )));
        }
        Ok(())
    }
}
