//! ClipCam
//!
//! A command-line tool that continuously records fixed-length webcam
//! segments through ffmpeg, trims short clips around timestamps logged by
//! an external process, and discards each full segment afterward.
//!
//! # Usage
//!
//! ```bash
//! clipcam --device "video=Integrated Webcam" --segment-duration 3600 --clip-duration 30
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipcam::cli::Cli;
use clipcam::config::RecorderConfig;
use clipcam::encoder::FfmpegEncoder;
use clipcam::recorder::RecordingLoop;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments and resolve configuration
    let cli = Cli::parse();
    let config = RecorderConfig::load(&cli).context("Failed to load configuration")?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let encoder = FfmpegEncoder::new(config.ffmpeg_path.clone());
    encoder
        .verify_available()
        .await
        .context("Encoder is not available")?;

    info!("Starting ClipCam recorder");
    RecordingLoop::new(&encoder, &config)
        .run()
        .await
        .context("Recording loop terminated")?;

    info!("ClipCam exiting");
    Ok(())
}
