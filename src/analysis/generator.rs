//! Text-generation port used by the downstream analysis stages.

use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of a generation call: text, or a failure cause.
///
/// The cause is a plain string; stages attach their own identity when they
/// turn it into a crate error.
pub type GenerationResult = std::result::Result<String, String>;

/// Trait for prompt-driven text generation.
///
/// This trait allows swapping implementations (remote chat API vs mock).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a fully rendered prompt.
    async fn generate(&self, prompt: &str, temperature: f32) -> GenerationResult;

    /// Human-readable generator name for logs.
    fn name(&self) -> &str;
}

/// Implement TextGenerator for Arc<T> to allow sharing across tasks.
#[async_trait]
impl<T: TextGenerator> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str, temperature: f32) -> GenerationResult {
        (**self).generate(prompt, temperature).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A prompt template with `{name}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Substitute each `{name}` placeholder with its value.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut rendered = self.template.to_string();
        for (name, value) in vars {
            rendered = rendered.replace(&format!("{{{name}}}"), value);
        }
        rendered
    }
}

type MockRule = dyn Fn(&str) -> GenerationResult + Send + Sync;

/// Mock generator for testing.
pub struct MockGenerator {
    response: String,
    should_fail: bool,
    rule: Option<Box<MockRule>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            response: "mock generation".to_string(),
            should_fail: false,
            rule: None,
        }
    }

    /// Return a fixed response for every prompt.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Fail every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Derive the response from the prompt.
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str) -> GenerationResult + Send + Sync + 'static,
    {
        self.rule = Some(Box::new(rule));
        self
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, _temperature: f32) -> GenerationResult {
        if let Some(rule) = &self.rule {
            return rule(prompt);
        }
        if self.should_fail {
            return Err("mock generation failure".to_string());
        }
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_renders_placeholders() {
        let template = PromptTemplate::new("Summarize ({style}): {text}");
        let rendered = template.render(&[("style", "global"), ("text", "the meeting")]);
        assert_eq!(rendered, "Summarize (global): the meeting");
    }

    #[test]
    fn test_template_leaves_unknown_placeholders() {
        let template = PromptTemplate::new("{known} and {unknown}");
        let rendered = template.render(&[("known", "yes")]);
        assert_eq!(rendered, "yes and {unknown}");
    }

    #[tokio::test]
    async fn test_mock_returns_response() {
        let generator = MockGenerator::new().with_response("a summary");
        assert_eq!(generator.generate("prompt", 0.7).await.unwrap(), "a summary");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let generator = MockGenerator::new().with_failure();
        let result = generator.generate("prompt", 0.7).await;
        assert_eq!(result.unwrap_err(), "mock generation failure");
    }

    #[tokio::test]
    async fn test_mock_rule_sees_prompt() {
        let generator =
            MockGenerator::new().with_rule(|prompt| Ok(format!("len={}", prompt.len())));
        assert_eq!(generator.generate("12345", 0.0).await.unwrap(), "len=5");
    }

    #[tokio::test]
    async fn test_generator_trait_is_object_safe() {
        let generator: Box<dyn TextGenerator> = Box::new(MockGenerator::new());
        assert_eq!(generator.name(), "mock");
        assert!(generator.generate("x", 0.0).await.is_ok());
    }
}
