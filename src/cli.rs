//! Command-line interface for recap
//!
//! Provides argument parsing using clap derive macros.

use crate::analysis::SummaryKind;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Meeting recap generator
#[derive(Parser, Debug)]
#[command(
    name = "recap",
    version,
    about = "Turn a meeting recording or transcript into a summary, sentiment analysis, and speaker-labeled transcript"
)]
pub struct Cli {
    /// Audio or text file to process
    ///
    /// Optional at the parser level so a missing argument can exit with
    /// code 1 rather than clap's usage error.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Summary flavor to generate
    #[arg(long, value_enum, default_value = "global", value_name = "TYPE")]
    pub summary_type: SummaryKind,

    /// Directory for the exported recap artifacts
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Abort transcription after this long. Examples: 90, 30s, 5m, 1h30m
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Suppress output (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (-v: per-stage progress, -vv: full diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a timeout string into a duration.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`30s`, `5m`, `2h`), and compound (`1h30m`).
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positional_input() {
        let cli = Cli::parse_from(["recap", "meeting.mp3"]);
        assert_eq!(cli.input, Some(PathBuf::from("meeting.mp3")));
        assert_eq!(cli.summary_type, SummaryKind::Global);
    }

    #[test]
    fn test_missing_input_parses_as_none() {
        let cli = Cli::parse_from(["recap"]);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_summary_type_values() {
        let cli = Cli::parse_from(["recap", "a.txt", "--summary-type", "detailed"]);
        assert_eq!(cli.summary_type, SummaryKind::Detailed);
    }

    #[test]
    fn test_invalid_summary_type_is_rejected() {
        let result = Cli::try_parse_from(["recap", "a.txt", "--summary-type", "haiku"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_formats() {
        let cli = Cli::parse_from(["recap", "a.txt", "--timeout", "90"]);
        assert_eq!(cli.timeout, Some(Duration::from_secs(90)));

        let cli = Cli::parse_from(["recap", "a.txt", "--timeout", "1h30m"]);
        assert_eq!(cli.timeout, Some(Duration::from_secs(5400)));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result = Cli::try_parse_from(["recap", "a.txt", "--timeout", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::parse_from(["recap", "a.txt", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);

        let cli = Cli::parse_from(["recap", "a.txt", "--quiet"]);
        assert!(cli.quiet);
    }
}
