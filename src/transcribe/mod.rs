//! Size-constrained transcription: payload views, chunking policy, the
//! adaptive engine, and the backend port it drives.

pub mod adaptive;
pub mod backend;
pub mod chunker;
pub mod payload;
pub mod whisper_api;

pub use adaptive::{AdaptiveTranscriber, FailedLeaf, LeafFailure, SplitPolicy, Transcript};
pub use backend::{MockBackend, TranscriptionBackend, TranscriptionOutcome};
pub use chunker::Chunker;
pub use payload::{AudioPayload, Chunk, StagedAudio};
pub use whisper_api::WhisperApiBackend;
