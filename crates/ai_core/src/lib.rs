//! AI Core - Text generation transport
//!
//! Provides the generation engine abstraction and a client for the
//! Gemini `generateContent` REST API used to phrase climate advisories.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use ports::{GenerationEngine, GenerationRequest, GenerationResponse};
