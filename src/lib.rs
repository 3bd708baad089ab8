//! ClipCam library
//!
//! Continuously records fixed-length webcam segments through an external
//! encoder, trims short clips around timestamps logged by an external
//! process, and discards each full segment afterward.

pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod log_reader;
pub mod processor;
pub mod recorder;
pub mod timefmt;

// Re-export commonly used types
pub use config::RecorderConfig;
pub use error::{ClipCamError, ClipCamResult};
