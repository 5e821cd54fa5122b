//! Port definitions for text generation
//!
//! Defines the trait (port) that generation adapters must implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Request for a single-turn completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Prompt text
    pub prompt: String,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Create a request that uses the engine's defaults
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token limit
    pub const fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }
}

/// Generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Extracted text, untrimmed
    pub text: String,
    /// Model that produced it
    pub model: String,
}

/// Port for text generation backends
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Generate text for a single prompt, one attempt, no retries
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_request_has_no_overrides() {
        let request = GenerationRequest::simple("hello");
        assert_eq!(request.prompt, "hello");
        assert!(request.model.is_none());
        assert!(request.max_output_tokens.is_none());
        assert!(request.temperature.is_none());
    }

    #[test]
    fn builder_sets_overrides() {
        let request = GenerationRequest::simple("hello")
            .with_model("gemini-pro")
            .with_temperature(0.2)
            .with_max_output_tokens(64);
        assert_eq!(request.model.as_deref(), Some("gemini-pro"));
        assert_eq!(request.max_output_tokens, Some(64));
        assert!(request.temperature.is_some_and(|t| (t - 0.2).abs() < f32::EPSILON));
    }

    #[test]
    fn request_serialization_skips_none() {
        let json = serde_json::to_string(&GenerationRequest::simple("hi")).unwrap();
        assert_eq!(json, r#"{"prompt":"hi"}"#);
    }
}
