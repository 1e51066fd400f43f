//! Default configuration constants for recap.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Maximum bytes sent to the transcription backend in a single request.
///
/// 10 MiB matches the documented upload ceiling of hosted Whisper endpoints.
/// The real limit is not advertised per-request; it is discovered by
/// attempting a call and observing a too-large rejection, so this value is a
/// conservative first estimate rather than a hard truth.
pub const MAX_CHUNK_BYTES: usize = 10 * 1024 * 1024;

/// Minimum number of top-level chunks an oversized payload is divided into.
///
/// Dividing into at least 10 chunks keeps each request well under the
/// backend ceiling for any payload larger than `10 * MAX_CHUNK_BYTES`.
pub const MIN_CHUNK_COUNT: usize = 10;

/// Maximum bisection generations applied to a chunk the backend keeps
/// rejecting as too large.
///
/// A chunk still rejected after 3 generations (1/8th of its original size)
/// is abandoned as permanently failed instead of splitting forever.
pub const MAX_SPLIT_DEPTH: u8 = 3;

/// Default transcription model name.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Default text-generation model name used by the analysis stages.
pub const GENERATION_MODEL: &str = "gpt-4";

/// Sampling temperature for summary generation.
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for sentiment analysis and speaker labeling.
///
/// Lower than the summary temperature: these stages restructure existing
/// content rather than compose new prose.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Default base URL for the OpenAI-compatible API.
pub const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "RECAP_API_KEY";

/// Default output directory for the exported recap artifacts.
pub const OUTPUT_DIR: &str = "output";

/// Number of words shown in the frequency chart.
pub const TOP_WORD_COUNT: usize = 10;

/// Words this short or shorter are ignored by the frequency analysis.
pub const MIN_WORD_LEN: usize = 3;

/// File extensions treated as audio input; anything else is read as text.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "ogg", "flac", "webm"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ceiling_is_ten_mebibytes() {
        assert_eq!(MAX_CHUNK_BYTES, 10_485_760);
    }

    #[test]
    fn audio_extensions_are_lowercase() {
        for ext in AUDIO_EXTENSIONS {
            assert_eq!(*ext, ext.to_lowercase());
        }
    }
}
