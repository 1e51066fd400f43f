//! Recap document composition and artifact export.

use crate::error::{RecapError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the composed recap document inside the output directory.
pub const DOCUMENT_FILENAME: &str = "meeting_recap.md";

/// Name of the frequency chart inside the output directory.
pub const CHART_FILENAME: &str = "word_frequency_chart.svg";

/// The analysis results that make up the recap document.
#[derive(Debug, Clone, Default)]
pub struct RecapSections {
    pub summary: Option<String>,
    pub sentiment: Option<String>,
    pub speakers: Option<String>,
}

/// Paths of the exported artifacts.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub document: PathBuf,
    pub chart: PathBuf,
}

/// Compose the recap document from the analysis sections.
///
/// A missing section gets placeholder text rather than being dropped, so
/// the document shape is stable.
pub fn compose_document(sections: &RecapSections) -> String {
    let mut doc = String::from("# Meeting Recap\n\n");

    doc.push_str("## Summary\n\n");
    doc.push_str(sections.summary.as_deref().unwrap_or("No summary available."));
    doc.push_str("\n\n## Sentiment Analysis\n\n");
    doc.push_str(
        sections
            .sentiment
            .as_deref()
            .unwrap_or("No sentiment analysis available."),
    );
    doc.push_str("\n\n## Transcript with Speaker Identification\n\n");
    doc.push_str(
        sections
            .speakers
            .as_deref()
            .unwrap_or("No speaker-identified transcript available."),
    );
    doc.push('\n');
    doc
}

/// Write the document and chart into `dir`, creating it as needed.
///
/// Artifacts are regenerated fresh each run; existing files are replaced,
/// never appended to or merged.
pub fn export(dir: &Path, document: &str, chart_svg: &str) -> Result<ExportPaths> {
    fs::create_dir_all(dir).map_err(|e| RecapError::Export {
        message: format!("could not create {}: {e}", dir.display()),
    })?;

    let document_path = dir.join(DOCUMENT_FILENAME);
    fs::write(&document_path, document).map_err(|e| RecapError::Export {
        message: format!("could not write {}: {e}", document_path.display()),
    })?;

    let chart_path = dir.join(CHART_FILENAME);
    fs::write(&chart_path, chart_svg).map_err(|e| RecapError::Export {
        message: format!("could not write {}: {e}", chart_path.display()),
    })?;

    info!(dir = %dir.display(), "results exported");
    Ok(ExportPaths {
        document: document_path,
        chart: chart_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> RecapSections {
        RecapSections {
            summary: Some("Ship it.".to_string()),
            sentiment: Some("Upbeat.".to_string()),
            speakers: Some("Speaker1: ship it".to_string()),
        }
    }

    #[test]
    fn test_document_contains_all_sections_in_order() {
        let doc = compose_document(&sections());
        let summary_at = doc.find("## Summary").unwrap();
        let sentiment_at = doc.find("## Sentiment Analysis").unwrap();
        let speakers_at = doc.find("## Transcript with Speaker Identification").unwrap();
        assert!(summary_at < sentiment_at);
        assert!(sentiment_at < speakers_at);
        assert!(doc.contains("Ship it."));
        assert!(doc.contains("Upbeat."));
        assert!(doc.contains("Speaker1: ship it"));
    }

    #[test]
    fn test_missing_sections_get_placeholders() {
        let doc = compose_document(&RecapSections::default());
        assert!(doc.contains("No summary available."));
        assert!(doc.contains("No sentiment analysis available."));
        assert!(doc.contains("No speaker-identified transcript available."));
    }

    #[test]
    fn test_export_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("recap_out");

        let paths = export(&out, "# doc", "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&paths.document).unwrap(), "# doc");
        assert_eq!(fs::read_to_string(&paths.chart).unwrap(), "<svg/>");
        assert_eq!(paths.document.file_name().unwrap(), DOCUMENT_FILENAME);
        assert_eq!(paths.chart.file_name().unwrap(), CHART_FILENAME);
    }

    #[test]
    fn test_export_replaces_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_path_buf();

        export(&out, "first run with a long document body", "<svg>1</svg>").unwrap();
        let paths = export(&out, "second", "<svg>2</svg>").unwrap();

        assert_eq!(fs::read_to_string(&paths.document).unwrap(), "second");
        assert_eq!(fs::read_to_string(&paths.chart).unwrap(), "<svg>2</svg>");
    }

    #[test]
    fn test_export_fails_cleanly_on_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocking_file = dir.path().join("taken");
        fs::write(&blocking_file, "x").unwrap();

        // A file where the directory should be.
        let result = export(&blocking_file, "doc", "svg");
        assert!(matches!(result, Err(RecapError::Export { .. })));
    }
}
