//! End-to-end recap pipeline.
//!
//! Sequences raw input through transcription, cleaning, the analysis
//! stages, and export. Retry and splitting live entirely inside the
//! transcription stage; a failure anywhere downstream propagates to the
//! caller unretried.

use crate::analysis::{self, SummaryKind, TextGenerator, clean_transcript};
use crate::config::Config;
use crate::defaults;
use crate::error::{RecapError, Result};
use crate::report::{self, RecapSections};
use crate::transcribe::{AdaptiveTranscriber, AudioPayload, Transcript, TranscriptionBackend};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct RecapReport {
    /// Cleaned transcript the analyses were based on.
    pub transcript: String,
    /// Audio segments that could not be transcribed (0 for text input).
    pub failed_leaves: usize,
    pub summary: String,
    pub sentiment: String,
    pub speakers: String,
    pub document_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Pipeline driver with injected collaborators.
pub struct Orchestrator {
    config: Config,
    backend: Arc<dyn TranscriptionBackend>,
    generator: Arc<dyn TextGenerator>,
    timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        backend: Arc<dyn TranscriptionBackend>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            config,
            backend,
            generator,
            timeout: None,
        }
    }

    /// Abort the transcription stage after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Process `input` and export the recap artifacts.
    pub async fn run(&self, input: &Path, summary_kind: SummaryKind) -> Result<RecapReport> {
        if !input.exists() {
            return Err(RecapError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        let (raw_text, failed_leaves) = if is_audio_input(input) {
            info!(input = %input.display(), "transcribing audio input");
            let transcript = self.transcribe_file(input).await?;
            if !transcript.is_complete() {
                warn!(
                    failed_leaves = transcript.failed_leaves(),
                    "transcript is incomplete; some audio segments could not be transcribed"
                );
            }
            let failed = transcript.failed_leaves();
            (transcript.into_text(), failed)
        } else {
            info!(input = %input.display(), "reading text input verbatim");
            (fs::read_to_string(input)?, 0)
        };

        info!("cleaning transcript");
        let transcript = clean_transcript(&raw_text);

        // The three analyses are independent and order-insensitive.
        let generator = self.generator.as_ref();
        let (summary, sentiment, speakers) = tokio::try_join!(
            analysis::summarize(generator, &transcript, summary_kind),
            analysis::analyze_sentiment(generator, &transcript),
            analysis::label_speakers(generator, &transcript),
        )?;

        info!("rendering word frequency chart");
        let frequencies = report::word_frequencies(&transcript, defaults::TOP_WORD_COUNT);
        let chart = report::render_chart(&frequencies);

        let document = report::compose_document(&RecapSections {
            summary: Some(summary.clone()),
            sentiment: Some(sentiment.clone()),
            speakers: Some(speakers.clone()),
        });
        let paths = report::export(&self.config.output.dir, &document, &chart)?;

        Ok(RecapReport {
            transcript,
            failed_leaves,
            summary,
            sentiment,
            speakers,
            document_path: paths.document,
            chart_path: paths.chart,
        })
    }

    async fn transcribe_file(&self, input: &Path) -> Result<Transcript> {
        let payload = AudioPayload::new(fs::read(input)?);
        let transcriber = AdaptiveTranscriber::new(Arc::clone(&self.backend))
            .with_policy(self.config.split_policy());

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, transcriber.transcribe(payload))
                .await
                .map_err(|_| RecapError::Timeout {
                    secs: limit.as_secs(),
                })?,
            None => transcriber.transcribe(payload).await,
        }
    }
}

/// Whether `path` should be transcribed rather than read as text.
fn is_audio_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            defaults::AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
