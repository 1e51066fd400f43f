//! Error types for recap.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecapError {
    // Input errors
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Input is empty: nothing to transcribe")]
    EmptyInput,

    // Transcription errors
    #[error("Transcription failed for every chunk ({failed_leaves} failure(s), no usable text)")]
    TotalTranscriptionFailure { failed_leaves: usize },

    #[error("Transcription timed out after {secs}s")]
    Timeout { secs: u64 },

    // Analysis errors
    #[error("{stage} stage failed: {message}")]
    Generation { stage: &'static str, message: String },

    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Export errors
    #[error("Export failed: {message}")]
    Export { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, RecapError>;
