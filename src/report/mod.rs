//! Reporting: frequency analysis, chart rendering, document export.

pub mod chart;
pub mod document;
pub mod frequency;

pub use chart::render_chart;
pub use document::{CHART_FILENAME, DOCUMENT_FILENAME, ExportPaths, RecapSections, compose_document, export};
pub use frequency::word_frequencies;
