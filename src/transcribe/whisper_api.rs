//! OpenAI-compatible transcription backend.
//!
//! Posts audio to the `/audio/transcriptions` multipart endpoint and maps
//! the provider's oversize rejection onto [`TranscriptionOutcome::TooLarge`].
//! All network and staging concerns live here; the engine above only sees
//! the three-way outcome.

use crate::defaults;
use crate::transcribe::backend::{TranscriptionBackend, TranscriptionOutcome};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

/// Substring hosted Whisper endpoints use in oversize rejection bodies.
const OVERSIZE_MARKER: &str = "Maximum content size limit";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Remote Whisper-style transcription backend.
#[derive(Debug, Clone)]
pub struct WhisperApiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl WhisperApiBackend {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: defaults::TRANSCRIPTION_MODEL.to_string(),
        }
    }

    /// Override the transcription model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[async_trait]
impl TranscriptionBackend for WhisperApiBackend {
    async fn transcribe(&self, audio: &[u8]) -> TranscriptionOutcome {
        let part = match Part::bytes(audio.to_vec())
            .file_name("chunk.mp3")
            .mime_str("audio/mpeg")
        {
            Ok(part) => part,
            Err(e) => return TranscriptionOutcome::Failed(format!("invalid audio part: {e}")),
        };
        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        debug!(bytes = audio.len(), model = %self.model, "uploading audio chunk");
        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return TranscriptionOutcome::Failed(format!("request failed: {e}")),
        };

        let status = response.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return TranscriptionOutcome::TooLarge;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains(OVERSIZE_MARKER) {
                return TranscriptionOutcome::TooLarge;
            }
            return TranscriptionOutcome::Failed(format!(
                "transcription endpoint returned {status}: {body}"
            ));
        }

        match response.json::<TranscriptionResponse>().await {
            Ok(parsed) => TranscriptionOutcome::Transcribed(parsed.text),
            Err(e) => TranscriptionOutcome::Failed(format!("malformed transcription body: {e}")),
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}
