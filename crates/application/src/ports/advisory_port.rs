//! Advisory generator port
//!
//! Defines the boundary to the external text generator. Adapters never
//! raise: every result is folded into a [`GenerationOutcome`].

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Result of one external generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Generated text, as returned by the backend
    Text(String),
    /// Generation switched off by configuration
    Disabled,
    /// No API credential configured
    MissingCredential,
    /// Backend answered without usable text
    Empty,
    /// Transport or backend failure
    Failed(String),
}

impl GenerationOutcome {
    /// Trimmed text when the outcome carries a non-empty one
    #[must_use]
    pub fn usable_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.trim()).filter(|t| !t.is_empty()),
            _ => None,
        }
    }
}

/// Port for the external advisory generator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdvisoryGeneratorPort: Send + Sync {
    /// Single generation attempt for a prompt
    async fn generate(&self, prompt: &str) -> GenerationOutcome;

    /// Why the generator cannot be called, if it cannot
    ///
    /// Returns `Some(Disabled)` or `Some(MissingCredential)` when calling
    /// [`generate`](Self::generate) would be pointless.
    fn unavailable_reason(&self) -> Option<GenerationOutcome>;
}
