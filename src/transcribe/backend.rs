//! Transcription backend port.
//!
//! The adaptive transcriber depends only on the three-way outcome contract
//! below, not on any particular speech-to-text provider.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Result of one transcription attempt.
///
/// A returned value, not an error type: `TooLarge` is routine control flow
/// for the splitting engine, and `Failed` is a contained per-leaf outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    /// The backend produced text for the full payload it was given.
    Transcribed(String),
    /// The payload exceeded the backend's per-request size ceiling.
    TooLarge,
    /// The backend failed for a reason unrelated to payload size.
    Failed(String),
}

/// Trait for speech-to-text transcription of a bounded audio payload.
///
/// This trait allows swapping implementations (remote API vs mock).
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Transcribe one audio payload.
    ///
    /// The payload is borrowed only for the duration of the call; the
    /// backend must not retain it.
    async fn transcribe(&self, audio: &[u8]) -> TranscriptionOutcome;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}

/// Implement TranscriptionBackend for Arc<T> to allow sharing across tasks.
#[async_trait]
impl<T: TranscriptionBackend> TranscriptionBackend for Arc<T> {
    async fn transcribe(&self, audio: &[u8]) -> TranscriptionOutcome {
        (**self).transcribe(audio).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

type MockRule = dyn Fn(&[u8]) -> TranscriptionOutcome + Send + Sync;

/// Mock backend for testing.
///
/// By default every payload transcribes to a text derived from its first
/// byte, which lets tests verify aggregation order. Builders layer on a
/// size ceiling, failure triggers, completion staggering, or an arbitrary
/// rule.
pub struct MockBackend {
    response: Option<String>,
    size_limit: Option<usize>,
    fail_marker: Option<u8>,
    stagger: Option<Duration>,
    rule: Option<Box<MockRule>>,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            response: None,
            size_limit: None,
            fail_marker: None,
            stagger: None,
            rule: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Return a fixed response for every successful attempt.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    /// Reject payloads larger than `limit` bytes as too large.
    pub fn with_size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }

    /// Fail any payload whose first byte equals `marker`.
    pub fn with_failure_marker(mut self, marker: u8) -> Self {
        self.fail_marker = Some(marker);
        self
    }

    /// Delay each attempt by `unit * (255 - first_byte)`, so earlier payload
    /// regions complete after later ones and ordering guarantees get
    /// exercised.
    pub fn with_stagger(mut self, unit: Duration) -> Self {
        self.stagger = Some(unit);
        self
    }

    /// Replace the outcome logic entirely.
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&[u8]) -> TranscriptionOutcome + Send + Sync + 'static,
    {
        self.rule = Some(Box::new(rule));
        self
    }

    /// Number of transcription attempts made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptionBackend for MockBackend {
    async fn transcribe(&self, audio: &[u8]) -> TranscriptionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first = audio.first().copied().unwrap_or(0);

        if let Some(unit) = self.stagger {
            tokio::time::sleep(unit * u32::from(255 - first)).await;
        }

        if let Some(rule) = &self.rule {
            return rule(audio);
        }
        if let Some(limit) = self.size_limit
            && audio.len() > limit
        {
            return TranscriptionOutcome::TooLarge;
        }
        if let Some(marker) = self.fail_marker
            && first == marker
        {
            return TranscriptionOutcome::Failed("mock backend failure".to_string());
        }
        match &self.response {
            Some(text) => TranscriptionOutcome::Transcribed(text.clone()),
            None => TranscriptionOutcome::Transcribed(format!("seg{first:02}")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_echoes_first_byte() {
        let backend = MockBackend::new();
        let outcome = backend.transcribe(&[3, 0, 0]).await;
        assert_eq!(outcome, TranscriptionOutcome::Transcribed("seg03".into()));
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let backend = MockBackend::new().with_response("hello meeting");
        let outcome = backend.transcribe(&[0; 16]).await;
        assert_eq!(
            outcome,
            TranscriptionOutcome::Transcribed("hello meeting".into())
        );
    }

    #[tokio::test]
    async fn test_mock_size_limit() {
        let backend = MockBackend::new().with_size_limit(4);
        assert_eq!(
            backend.transcribe(&[0; 5]).await,
            TranscriptionOutcome::TooLarge
        );
        assert!(matches!(
            backend.transcribe(&[0; 4]).await,
            TranscriptionOutcome::Transcribed(_)
        ));
    }

    #[tokio::test]
    async fn test_mock_failure_marker() {
        let backend = MockBackend::new().with_failure_marker(9);
        assert!(matches!(
            backend.transcribe(&[9, 9]).await,
            TranscriptionOutcome::Failed(_)
        ));
        assert!(matches!(
            backend.transcribe(&[8, 9]).await,
            TranscriptionOutcome::Transcribed(_)
        ));
    }

    #[tokio::test]
    async fn test_mock_rule_overrides_everything() {
        let backend = MockBackend::new()
            .with_size_limit(1)
            .with_rule(|_| TranscriptionOutcome::Transcribed("ruled".into()));
        assert_eq!(
            backend.transcribe(&[0; 100]).await,
            TranscriptionOutcome::Transcribed("ruled".into())
        );
    }

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let backend = MockBackend::new();
        assert_eq!(backend.calls(), 0);
        backend.transcribe(&[1]).await;
        backend.transcribe(&[2]).await;
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_backend_trait_is_object_safe() {
        let backend: Box<dyn TranscriptionBackend> =
            Box::new(MockBackend::new().with_response("boxed"));
        assert_eq!(backend.name(), "mock");
        assert_eq!(
            backend.transcribe(&[0]).await,
            TranscriptionOutcome::Transcribed("boxed".into())
        );
    }

    #[tokio::test]
    async fn test_arc_backend_delegates() {
        let backend = Arc::new(MockBackend::new().with_response("shared"));
        let outcome = TranscriptionBackend::transcribe(&backend, &[0]).await;
        assert_eq!(outcome, TranscriptionOutcome::Transcribed("shared".into()));
        assert_eq!(backend.calls(), 1);
    }
}
