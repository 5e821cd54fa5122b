//! Wire models for the Gemini REST API

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl GenerateContentRequest {
    pub(crate) fn single_turn(prompt: String, max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationSettings {
                max_output_tokens,
                temperature,
            },
        }
    }
}

/// Pull generated text out of a response body.
///
/// Tries a top-level `text` field first, then `candidates[0].content`,
/// which may be a plain string or an object whose `parts[*].text` are
/// concatenated. Returns `None` when none of these hold a string.
pub fn extract_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("text").and_then(Value::as_str) {
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    let content = body.get("candidates")?.get(0)?.get("content")?;
    if let Some(text) = content.as_str() {
        return Some(text.to_string());
    }

    let parts = content.get("parts")?.as_array()?;
    let joined: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if parts.iter().any(|part| part.get("text").is_some()) {
        Some(joined)
    } else {
        None
    }
}
