//! Downstream analysis stages: summary, sentiment, speaker labeling.
//!
//! Each stage is a single call to the text-generation port with a fixed
//! prompt template. None of them retries; a failure propagates to the
//! caller as-is.

use crate::analysis::generator::{PromptTemplate, TextGenerator};
use crate::defaults;
use crate::error::{RecapError, Result};
use tracing::info;

/// Summary flavor selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryKind {
    /// Concise overview of the key points.
    Global,
    /// Elaborated treatment of every significant point.
    Detailed,
}

impl SummaryKind {
    fn instruction(self) -> &'static str {
        match self {
            SummaryKind::Global => "Provide a concise overview of the key points.",
            SummaryKind::Detailed => "Elaborate on each significant point in detail.",
        }
    }
}

const SUMMARY_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "You are an assistant specialized in summarizing meetings. \
     Generate a summary of the following meeting transcript:\n\n\
     {text}\n\n\
     Include the following elements in your summary:\n\
     1. The main points discussed\n\
     2. The decisions made\n\
     3. The action items\n\
     4. Points of disagreement or open questions\n\n\
     {style}\n\n\
     Summary:",
);

const SENTIMENT_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "Analyze the overall sentiment and tone of the participants in the \
     following meeting transcript:\n\n\
     {text}\n\n\
     Provide a detailed analysis that includes:\n\
     1. The overall sentiment of the meeting (positive, negative, neutral, or mixed)\n\
     2. Shifts in tone over the course of the meeting\n\
     3. Topics or moments that drew strong emotional reactions\n\
     4. Any notable tension or disagreement\n\
     5. Moments of consensus or enthusiasm\n\n\
     Sentiment analysis:",
);

const SPEAKERS_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "Analyze the following meeting transcript and identify the distinct \
     speakers. Assign each speaker a unique identifier (for example, \
     Speaker1, Speaker2) and structure the transcript accordingly.\n\n\
     Original text:\n{text}\n\n\
     Instructions:\n\
     1. Identify speaker changes from content and speaking style.\n\
     2. Assign a unique identifier to each speaker.\n\
     3. Restructure the transcript to show clearly who is speaking.\n\
     4. Where possible, note the likely role of each speaker \
     (for example, facilitator, participant, expert).\n\n\
     Structured transcript with speaker identification:",
);

/// Generate a meeting summary of the requested kind.
pub async fn summarize(
    generator: &dyn TextGenerator,
    text: &str,
    kind: SummaryKind,
) -> Result<String> {
    info!(?kind, "generating summary");
    let prompt = SUMMARY_TEMPLATE.render(&[("text", text), ("style", kind.instruction())]);
    generator
        .generate(&prompt, defaults::SUMMARY_TEMPERATURE)
        .await
        .map_err(|message| RecapError::Generation {
            stage: "summary",
            message,
        })
}

/// Analyze overall sentiment and tone.
pub async fn analyze_sentiment(generator: &dyn TextGenerator, text: &str) -> Result<String> {
    info!("analyzing sentiment");
    let prompt = SENTIMENT_TEMPLATE.render(&[("text", text)]);
    generator
        .generate(&prompt, defaults::ANALYSIS_TEMPERATURE)
        .await
        .map_err(|message| RecapError::Generation {
            stage: "sentiment",
            message,
        })
}

/// Segment the transcript by speaker.
pub async fn label_speakers(generator: &dyn TextGenerator, text: &str) -> Result<String> {
    info!("labeling speakers");
    let prompt = SPEAKERS_TEMPLATE.render(&[("text", text)]);
    generator
        .generate(&prompt, defaults::ANALYSIS_TEMPERATURE)
        .await
        .map_err(|message| RecapError::Generation {
            stage: "speakers",
            message,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::generator::MockGenerator;

    #[tokio::test]
    async fn test_summary_prompt_carries_transcript_and_style() {
        let generator = MockGenerator::new().with_rule(|prompt| Ok(prompt.to_string()));
        let prompt = summarize(&generator, "quarterly numbers", SummaryKind::Global)
            .await
            .unwrap();
        assert!(prompt.contains("quarterly numbers"));
        assert!(prompt.contains("concise overview"));
    }

    #[tokio::test]
    async fn test_detailed_summary_selects_other_instruction() {
        let generator = MockGenerator::new().with_rule(|prompt| Ok(prompt.to_string()));
        let prompt = summarize(&generator, "x", SummaryKind::Detailed)
            .await
            .unwrap();
        assert!(prompt.contains("Elaborate on each significant point"));
        assert!(!prompt.contains("concise overview"));
    }

    #[tokio::test]
    async fn test_sentiment_prompt_carries_transcript() {
        let generator = MockGenerator::new().with_rule(|prompt| Ok(prompt.to_string()));
        let prompt = analyze_sentiment(&generator, "heated debate")
            .await
            .unwrap();
        assert!(prompt.contains("heated debate"));
        assert!(prompt.contains("overall sentiment"));
    }

    #[tokio::test]
    async fn test_speaker_prompt_carries_transcript() {
        let generator = MockGenerator::new().with_rule(|prompt| Ok(prompt.to_string()));
        let prompt = label_speakers(&generator, "two voices").await.unwrap();
        assert!(prompt.contains("two voices"));
        assert!(prompt.contains("Speaker1"));
    }

    #[tokio::test]
    async fn test_stage_failure_is_attributed() {
        let generator = MockGenerator::new().with_failure();

        let err = summarize(&generator, "x", SummaryKind::Global)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RecapError::Generation {
                stage: "summary",
                ..
            }
        ));

        let err = analyze_sentiment(&generator, "x").await.unwrap_err();
        assert!(matches!(
            err,
            RecapError::Generation {
                stage: "sentiment",
                ..
            }
        ));

        let err = label_speakers(&generator, "x").await.unwrap_err();
        assert!(matches!(
            err,
            RecapError::Generation {
                stage: "speakers",
                ..
            }
        ));
    }
}
