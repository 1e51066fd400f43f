//! Deterministic payload partitioning for the adaptive transcriber.
//!
//! Splitting is contiguous and order-preserving: concatenating the produced
//! chunks' byte ranges in order reproduces the payload exactly, with no gaps
//! or overlaps.

use crate::error::{RecapError, Result};
use crate::transcribe::payload::{AudioPayload, Chunk};

/// Partitions audio payloads under a hard per-chunk byte ceiling.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_chunk_bytes: usize,
}

impl Chunker {
    /// Create a chunker with the given per-chunk byte ceiling.
    pub fn new(max_chunk_bytes: usize) -> Self {
        Self {
            max_chunk_bytes: max_chunk_bytes.max(1),
        }
    }

    /// Split `payload` into at least `target_chunk_count` contiguous chunks.
    ///
    /// Chunk size is `min(max_chunk_bytes, ceil(total / target))`, so the
    /// ceiling always wins over the target count, and the final chunk is
    /// truncated to the remainder. A `target_chunk_count` below 1 is clamped
    /// to 1; an empty payload is an error.
    pub fn split(&self, payload: &AudioPayload, target_chunk_count: usize) -> Result<Vec<Chunk>> {
        let total = payload.len();
        if total == 0 {
            return Err(RecapError::EmptyInput);
        }

        let target = target_chunk_count.max(1);
        let chunk_size = self.max_chunk_bytes.min(total.div_ceil(target)).max(1);

        let mut chunks = Vec::with_capacity(total.div_ceil(chunk_size));
        let mut start = 0;
        while start < total {
            let end = (start + chunk_size).min(total);
            chunks.push(Chunk::new(chunks.len(), 0, payload.slice(start..end)));
            start = end;
        }
        Ok(chunks)
    }

    /// Split a chunk exactly in half, ceiling division for the left half.
    ///
    /// Both halves inherit the parent's index and carry `depth + 1`. Returns
    /// `None` when halving cannot make progress (a chunk under two bytes),
    /// which callers must treat as the end of the road for that chunk.
    pub fn bisect(chunk: &Chunk) -> Option<(Chunk, Chunk)> {
        let len = chunk.len();
        if len < 2 {
            return None;
        }
        let mid = len.div_ceil(2);
        let depth = chunk.depth() + 1;
        let left = Chunk::new(chunk.index(), depth, chunk.payload().slice(0..mid));
        let right = Chunk::new(chunk.index(), depth, chunk.payload().slice(mid..len));
        Some((left, right))
    }
}
