//! Wire types for Google's Generative Language `generateContent` endpoint.
//!
//! Only the fields this app sends or reads are modelled. The HTTP call itself
//! lives in the browser client; everything here is plain serde so it can be
//! tested off the web.

use serde::{Deserialize, Serialize};

use crate::config::Prompt;
use crate::error::GenerateError;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// URL of the `generateContent` method for `model`.
#[must_use]
pub fn generate_url(endpoint: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", endpoint.trim_end_matches('/'))
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

impl<'a> GenerateRequest<'a> {
    #[must_use]
    pub fn new(prompt: &'a Prompt) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text: &prompt.text }],
            }],
            generation_config: GenerationConfig {
                temperature: prompt.temperature,
                thinking_config: ThinkingConfig {
                    thinking_budget: prompt.thinking_budget,
                },
            },
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Decode a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Decode`] if `body` is not a response object.
    pub fn from_json(body: &str) -> Result<Self, GenerateError> {
        serde_json::from_str(body).map_err(|e| GenerateError::Decode(e.to_string()))
    }

    /// Text of the first candidate, parts joined. Empty when the model
    /// returned nothing.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
