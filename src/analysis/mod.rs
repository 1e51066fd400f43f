//! Text analysis stages over the generation port.

pub mod chat_api;
pub mod clean;
pub mod generator;
pub mod stages;

pub use chat_api::ChatApiGenerator;
pub use clean::clean_transcript;
pub use generator::{MockGenerator, PromptTemplate, TextGenerator};
pub use stages::{SummaryKind, analyze_sentiment, label_speakers, summarize};
