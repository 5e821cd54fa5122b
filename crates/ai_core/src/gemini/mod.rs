//! Gemini `generateContent` client

mod client;
mod models;

pub use client::GeminiClient;
pub use models::extract_text;
