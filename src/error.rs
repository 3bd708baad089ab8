//! Error handling module for ClipCam

use thiserror::Error;

/// Main error type for ClipCam operations
#[derive(Error, Debug)]
pub enum ClipCamError {
    /// Configuration rejected during validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed
    #[error("failed to load config file {path}: {message}")]
    ConfigFile { path: String, message: String },

    /// Encoder binary could not be launched
    #[error("failed to launch encoder '{program}': {source}")]
    EncoderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoder binary launched but is not usable
    #[error("encoder '{program}' is not usable: {message}")]
    EncoderUnavailable { program: String, message: String },

    /// Capture-phase encoder failure; fatal for the recording loop
    #[error("capture failed: encoder exited with code {code:?}")]
    CaptureFailed { code: Option<i32>, stderr: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ClipCam operations
pub type ClipCamResult<T> = std::result::Result<T, ClipCamError>;
