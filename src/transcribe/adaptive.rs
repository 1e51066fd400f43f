//! Adaptive transcription engine for payloads above the backend's ceiling.
//!
//! The backend's real per-request size limit is not advertised; it is only
//! discoverable by attempting a call and observing a too-large rejection.
//! This engine owns the policy around that fact: partition, attempt, bisect
//! on rejection up to a bounded depth, tolerate per-chunk failures, and
//! reassemble whatever succeeded in original byte order.

use crate::defaults;
use crate::error::{RecapError, Result};
use crate::transcribe::backend::{TranscriptionBackend, TranscriptionOutcome};
use crate::transcribe::chunker::Chunker;
use crate::transcribe::payload::{AudioPayload, Chunk};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Splitting and retry policy for one transcription request.
#[derive(Debug, Clone)]
pub struct SplitPolicy {
    /// Hard per-request byte ceiling handed to the chunker.
    pub max_chunk_bytes: usize,
    /// Minimum number of top-level chunks for an oversized payload.
    pub min_chunk_count: usize,
    /// Maximum bisection generations before a chunk is abandoned.
    pub max_split_depth: u8,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            max_chunk_bytes: defaults::MAX_CHUNK_BYTES,
            min_chunk_count: defaults::MIN_CHUNK_COUNT,
            max_split_depth: defaults::MAX_SPLIT_DEPTH,
        }
    }
}

/// Why a leaf ended without text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafFailure {
    /// Still rejected as too large after the bisection budget was spent.
    SplitExhausted { depth: u8 },
    /// The backend failed for a non-size reason. Not retried: splitting
    /// cannot fix it.
    Backend { message: String },
}

impl fmt::Display for LeafFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafFailure::SplitExhausted { depth } => {
                write!(f, "still too large after {depth} split generation(s)")
            }
            LeafFailure::Backend { message } => write!(f, "backend failure: {message}"),
        }
    }
}

/// A leaf that reached a terminal failure, identified by its byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLeaf {
    pub offset: usize,
    pub reason: LeafFailure,
}

/// Aggregate result of one transcription request.
///
/// Successful leaf texts joined with single spaces in original byte order;
/// failed leaves contribute nothing to the text but are listed so callers
/// can warn about incompleteness. Created fresh per request, never
/// persisted.
#[derive(Debug, Clone)]
pub struct Transcript {
    text: String,
    failures: Vec<FailedLeaf>,
    leaves: usize,
}

impl Transcript {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Leaves that reached a terminal failure, in byte order.
    pub fn failures(&self) -> &[FailedLeaf] {
        &self.failures
    }

    pub fn failed_leaves(&self) -> usize {
        self.failures.len()
    }

    /// Total leaves resolved, successful or not.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Terminal outcome of a single leaf, keyed by byte offset.
struct LeafResult {
    offset: usize,
    outcome: std::result::Result<String, LeafFailure>,
}

/// Transcribes payloads of arbitrary size through a size-limited backend.
pub struct AdaptiveTranscriber {
    backend: Arc<dyn TranscriptionBackend>,
    policy: SplitPolicy,
}

impl AdaptiveTranscriber {
    /// Create a transcriber with the default splitting policy.
    pub fn new(backend: Arc<dyn TranscriptionBackend>) -> Self {
        Self {
            backend,
            policy: SplitPolicy::default(),
        }
    }

    /// Override the splitting policy.
    pub fn with_policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Transcribe `payload`, splitting as needed.
    ///
    /// Returns a partial transcript as long as at least one leaf succeeded;
    /// fails with [`RecapError::TotalTranscriptionFailure`] only when no
    /// leaf produced text. Dropping the returned future (a caller timeout)
    /// aborts all in-flight chunk attempts; their staging buffers are
    /// released by scope.
    pub async fn transcribe(&self, payload: AudioPayload) -> Result<Transcript> {
        if payload.is_empty() {
            return Err(RecapError::EmptyInput);
        }

        // The ceiling is a conservative estimate of the backend's real
        // limit. A payload that fits it is worth one direct attempt; a
        // too-large rejection falls through to chunked mode instead of
        // failing, in case the real limit is lower than the estimate.
        if payload.len() <= self.policy.max_chunk_bytes {
            debug!(
                bytes = payload.len(),
                backend = self.backend.name(),
                "attempting direct transcription"
            );
            let whole = Chunk::new(0, 0, payload.clone());
            match attempt(self.backend.as_ref(), &whole).await {
                TranscriptionOutcome::Transcribed(text) => {
                    return Ok(Transcript {
                        text: text.trim().to_string(),
                        failures: Vec::new(),
                        leaves: 1,
                    });
                }
                TranscriptionOutcome::TooLarge => {
                    info!("payload rejected as too large, switching to chunked transcription");
                }
                TranscriptionOutcome::Failed(message) => {
                    warn!(%message, "direct transcription failed");
                    return Err(RecapError::TotalTranscriptionFailure { failed_leaves: 1 });
                }
            }
        }

        self.transcribe_chunked(payload).await
    }

    async fn transcribe_chunked(&self, payload: AudioPayload) -> Result<Transcript> {
        let chunker = Chunker::new(self.policy.max_chunk_bytes);
        let chunks = chunker.split(&payload, self.policy.min_chunk_count)?;
        info!(
            total_bytes = payload.len(),
            chunks = chunks.len(),
            "transcribing in chunks"
        );

        // Sibling chunks share nothing but the backend handle, so they run
        // concurrently. Dropping the set aborts whatever is still in flight.
        let mut attempts = JoinSet::new();
        for chunk in chunks {
            let backend = Arc::clone(&self.backend);
            let max_depth = self.policy.max_split_depth;
            attempts.spawn(resolve_chunk(backend, chunk, max_depth));
        }

        // Completion order is arbitrary; the offset-keyed map restores
        // original byte order at aggregation time.
        let mut texts: BTreeMap<usize, String> = BTreeMap::new();
        let mut failures: Vec<FailedLeaf> = Vec::new();
        let mut leaves = 0;
        while let Some(joined) = attempts.join_next().await {
            let results = joined
                .map_err(|e| RecapError::Other(format!("transcription task failed: {e}")))?;
            for leaf in results {
                leaves += 1;
                match leaf.outcome {
                    Ok(text) => {
                        texts.insert(leaf.offset, text);
                    }
                    Err(reason) => {
                        warn!(offset = leaf.offset, %reason, "chunk permanently failed");
                        failures.push(FailedLeaf {
                            offset: leaf.offset,
                            reason,
                        });
                    }
                }
            }
        }

        if texts.is_empty() {
            return Err(RecapError::TotalTranscriptionFailure {
                failed_leaves: failures.len(),
            });
        }
        failures.sort_by_key(|f| f.offset);

        let text = texts
            .values()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(Transcript {
            text,
            failures,
            leaves,
        })
    }
}

/// One backend attempt with a scoped staging buffer.
///
/// The staged bytes live exactly as long as the call, whatever the outcome.
async fn attempt(backend: &dyn TranscriptionBackend, chunk: &Chunk) -> TranscriptionOutcome {
    let staged = chunk.stage();
    backend.transcribe(staged.bytes()).await
}

/// Resolve one chunk to terminal leaves, bisecting on too-large rejections.
///
/// Boxed because the future recurses through itself on each bisection.
fn resolve_chunk(
    backend: Arc<dyn TranscriptionBackend>,
    chunk: Chunk,
    max_depth: u8,
) -> BoxFuture<'static, Vec<LeafResult>> {
    async move {
        debug!(
            index = chunk.index(),
            depth = chunk.depth(),
            bytes = chunk.len(),
            "attempting chunk"
        );
        match attempt(backend.as_ref(), &chunk).await {
            TranscriptionOutcome::Transcribed(text) => vec![LeafResult {
                offset: chunk.offset(),
                outcome: Ok(text),
            }],
            TranscriptionOutcome::Failed(message) => vec![LeafResult {
                offset: chunk.offset(),
                outcome: Err(LeafFailure::Backend { message }),
            }],
            TranscriptionOutcome::TooLarge => {
                let exhausted = |chunk: &Chunk| {
                    vec![LeafResult {
                        offset: chunk.offset(),
                        outcome: Err(LeafFailure::SplitExhausted {
                            depth: chunk.depth(),
                        }),
                    }]
                };
                if chunk.depth() >= max_depth {
                    return exhausted(&chunk);
                }
                match Chunker::bisect(&chunk) {
                    Some((left, right)) => {
                        debug!(
                            index = chunk.index(),
                            depth = left.depth(),
                            "chunk too large, bisecting"
                        );
                        let mut leaves = resolve_chunk(Arc::clone(&backend), left, max_depth).await;
                        leaves.extend(resolve_chunk(backend, right, max_depth).await);
                        leaves
                    }
                    None => exhausted(&chunk),
                }
            }
        }
    }
    .boxed()
}
