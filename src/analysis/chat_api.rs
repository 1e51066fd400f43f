//! OpenAI-compatible chat-completions generator.

use crate::analysis::generator::{GenerationResult, TextGenerator};
use crate::defaults;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Remote chat-completions text generator.
#[derive(Debug, Clone)]
pub struct ChatApiGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatApiGenerator {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: defaults::GENERATION_MODEL.to_string(),
        }
    }

    /// Override the generation model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[async_trait]
impl TextGenerator for ChatApiGenerator {
    async fn generate(&self, prompt: &str, temperature: f32) -> GenerationResult {
        let body = json!({
            "model": self.model,
            "temperature": temperature,
            "messages": [{ "role": "user", "content": prompt }],
        });

        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting generation");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("generation endpoint returned {status}: {body}"));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed generation body: {e}"))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "generation body contained no choices".to_string())
    }

    fn name(&self) -> &str {
        &self.model
    }
}
