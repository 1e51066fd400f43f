//! recap - Meeting recap generator
//!
//! Transcribes oversized meeting recordings through a size-limited backend,
//! then summarizes, analyzes sentiment, labels speakers, and exports the
//! results.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod transcribe;

// Core engine
pub use transcribe::{
    AdaptiveTranscriber, AudioPayload, Chunker, MockBackend, SplitPolicy, Transcript,
    TranscriptionBackend, TranscriptionOutcome, WhisperApiBackend,
};

// Analysis stages
pub use analysis::{ChatApiGenerator, MockGenerator, SummaryKind, TextGenerator};

// Pipeline
pub use pipeline::{Orchestrator, RecapReport};

// Error handling
pub use error::{RecapError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `CARGO_PKG_VERSION` plus `+<hash>` when built inside a git
/// checkout.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{version}+{hash}"),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
        }
    }
}
