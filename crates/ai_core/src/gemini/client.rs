//! Gemini client implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Header carrying the API key; the URL never does
const API_KEY_HEADER: &str = "x-goog-api-key";

use super::models::{GenerateContentRequest, extract_text};
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::ports::{GenerationEngine, GenerationRequest, GenerationResponse};

/// Generation engine backed by the Gemini REST API
pub struct GeminiClient {
    client: Client,
    config: GenerationConfig,
    api_key: SecretString,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GenerationConfig, api_key: SecretString) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Gemini generation client"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// `{base}/models/{model}:generateContent`
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    fn resolve_model<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        request.model.as_deref().unwrap_or(&self.config.model)
    }
}

#[async_trait]
impl GenerationEngine for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let model = self.resolve_model(&request).to_string();
        let body = GenerateContentRequest::single_turn(
            request.prompt,
            request
                .max_output_tokens
                .unwrap_or(self.config.max_output_tokens),
            request.temperature.unwrap_or(self.config.temperature),
        );

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint(&model))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.config.timeout_ms)
                } else {
                    GenerationError::from(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Generation backend rate limited the request");
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Generation request failed");
            return Err(if status.is_server_error() {
                GenerationError::ServerError(format!("Status {status}"))
            } else {
                GenerationError::RequestFailed(format!("Status {status}"))
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.without_url().to_string()))?;

        let text = extract_text(&value).ok_or_else(|| {
            GenerationError::InvalidResponse("response carried no text".to_string())
        })?;

        debug!(chars = text.len(), "Generation completed");

        Ok(GenerationResponse { text, model })
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}
