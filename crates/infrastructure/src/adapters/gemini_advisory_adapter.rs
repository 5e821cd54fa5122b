//! Advisory generator adapter - Implements AdvisoryGeneratorPort using ai_core
//!
//! Folds every transport result into a `GenerationOutcome`; nothing here
//! returns an error to the advisory engine.

use std::sync::Arc;

use ai_core::{GeminiClient, GenerationEngine, GenerationError, GenerationRequest};
use application::{
    error::ApplicationError,
    ports::{AdvisoryGeneratorPort, GenerationOutcome},
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{info, instrument};

use crate::config::AdvisoryAppConfig;

/// Adapter for the external advisory generator
pub struct GeminiAdvisoryAdapter {
    engine: Option<Arc<dyn GenerationEngine>>,
    enabled: bool,
}

impl std::fmt::Debug for GeminiAdvisoryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdvisoryAdapter")
            .field("enabled", &self.enabled)
            .field(
                "model",
                &self.engine.as_ref().map(|e| e.default_model().to_string()),
            )
            .finish()
    }
}

impl GeminiAdvisoryAdapter {
    /// Build from configuration
    ///
    /// A missing or blank API key leaves the adapter without an engine; it
    /// then reports `MissingCredential` instead of failing startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &AdvisoryAppConfig) -> Result<Self, ApplicationError> {
        let engine = match config
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
        {
            Some(key) => {
                let client = GeminiClient::new(config.generation_config(), key.clone())
                    .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
                Some(Arc::new(client) as Arc<dyn GenerationEngine>)
            },
            None => None,
        };

        if !config.enabled {
            info!("External advisory generation disabled by configuration");
        } else if engine.is_none() {
            info!("No advisory API key configured, rule-based advice only");
        }

        Ok(Self {
            engine,
            enabled: config.enabled,
        })
    }

    /// Wrap an existing engine
    pub fn with_engine(engine: Arc<dyn GenerationEngine>, enabled: bool) -> Self {
        Self {
            engine: Some(engine),
            enabled,
        }
    }

    /// Adapter that never calls out
    pub const fn disabled() -> Self {
        Self {
            engine: None,
            enabled: false,
        }
    }

    fn map_error(err: &GenerationError) -> GenerationOutcome {
        GenerationOutcome::Failed(err.to_string())
    }
}

#[async_trait]
impl AdvisoryGeneratorPort for GeminiAdvisoryAdapter {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> GenerationOutcome {
        if let Some(reason) = self.unavailable_reason() {
            return reason;
        }
        let Some(engine) = self.engine.as_ref() else {
            return GenerationOutcome::MissingCredential;
        };

        match engine.generate(GenerationRequest::simple(prompt)).await {
            Ok(response) if response.text.trim().is_empty() => GenerationOutcome::Empty,
            Ok(response) => GenerationOutcome::Text(response.text),
            Err(e) => Self::map_error(&e),
        }
    }

    fn unavailable_reason(&self) -> Option<GenerationOutcome> {
        if !self.enabled {
            Some(GenerationOutcome::Disabled)
        } else if self.engine.is_none() {
            Some(GenerationOutcome::MissingCredential)
        } else {
            None
        }
    }
}
