//! Command-line argument definitions

use std::path::PathBuf;

use clap::Parser;

/// Continuous webcam recorder that trims event clips out of rolling segments.
///
/// Every flag is a configuration override; unset values fall back to the
/// config file and then to built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "clipcam", version, about)]
pub struct Cli {
    /// Configuration file (TOML); defaults to clipcam.toml when present
    #[arg(long, env = "CLIPCAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seconds of continuous capture per segment
    #[arg(long, env = "CLIPCAM_SEGMENT_DURATION")]
    pub segment_duration: Option<u64>,

    /// Seconds retained per logged event
    #[arg(long, env = "CLIPCAM_CLIP_DURATION")]
    pub clip_duration: Option<u64>,

    /// Capture device identifier passed to the encoder
    #[arg(long, env = "CLIPCAM_DEVICE")]
    pub device: Option<String>,

    /// Encoder input demuxer (dshow, v4l2, avfoundation, ...)
    #[arg(long, env = "CLIPCAM_CAPTURE_FORMAT")]
    pub capture_format: Option<String>,

    /// Event timestamp log file
    #[arg(long, env = "CLIPCAM_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory receiving segments and clips
    #[arg(long, env = "CLIPCAM_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Encoder program to invoke
    #[arg(long, env = "CLIPCAM_FFMPEG_PATH")]
    pub ffmpeg_path: Option<String>,
}
