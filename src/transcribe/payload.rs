//! Audio payload views and chunk types for the transcription engine.

use std::ops::Range;
use std::sync::Arc;

/// An immutable view into a shared audio byte buffer.
///
/// The underlying bytes are reference-counted, so slicing a payload into
/// chunks never copies audio data. Each view remembers its byte range in the
/// original buffer; the range start is the payload's ordinal position and is
/// what final-text ordering is keyed on.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    data: Arc<[u8]>,
    range: Range<usize>,
}

impl AudioPayload {
    /// Wrap a full audio buffer as a payload starting at offset 0.
    pub fn new(data: Vec<u8>) -> Self {
        let len = data.len();
        Self {
            data: Arc::from(data),
            range: 0..len,
        }
    }

    /// Byte offset of this view in the original buffer.
    pub fn offset(&self) -> usize {
        self.range.start
    }

    /// Length of this view in bytes.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether this view contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The bytes of this view.
    pub fn bytes(&self) -> &[u8] {
        &self.data[self.range.clone()]
    }

    /// A sub-view over `range`, given relative to this view.
    ///
    /// # Panics
    /// Panics if `range` extends past the end of this view.
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(range.end <= self.len(), "slice out of bounds");
        Self {
            data: Arc::clone(&self.data),
            range: self.range.start + range.start..self.range.start + range.end,
        }
    }
}

/// A unit of work for the transcription backend.
///
/// `index` is the chunk's position among its top-level siblings; `depth`
/// counts how many bisection generations produced it (0 for a top-level
/// chunk). Ordering of the final text does not use either field; it is a
/// pure function of the payload's byte offset.
#[derive(Debug, Clone)]
pub struct Chunk {
    index: usize,
    depth: u8,
    payload: AudioPayload,
}

impl Chunk {
    pub fn new(index: usize, depth: u8, payload: AudioPayload) -> Self {
        Self {
            index,
            depth,
            payload,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn payload(&self) -> &AudioPayload {
        &self.payload
    }

    /// Byte offset of this chunk in the original payload.
    pub fn offset(&self) -> usize {
        self.payload.offset()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Materialize this chunk's bytes into a private staging buffer for one
    /// backend attempt.
    pub fn stage(&self) -> StagedAudio {
        StagedAudio {
            bytes: self.payload.bytes().to_vec(),
        }
    }
}

/// Transient staging buffer handed to the backend for a single attempt.
///
/// Owned exclusively by the attempt that created it and freed when that
/// attempt's scope ends, whatever the outcome. Backends that upload the
/// audio may borrow the bytes only for the duration of the call.
#[derive(Debug)]
pub struct StagedAudio {
    bytes: Vec<u8>,
}

impl StagedAudio {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
