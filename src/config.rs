//! App configuration.
//!
//! Values are layered: built-in defaults, then the environment at compile
//! time (`API_KEY`, `PI_TRACE_MODEL`, `PI_TRACE_ENDPOINT`), then an optional
//! JSON block embedded in the page. A blank value never overrides a set one.

use std::time::Duration;

use serde::Deserialize;

use crate::consts::REVEAL_INTERVAL_MS;
use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

const DEFAULT_PROMPT: &str = "Write a long, immersive, and poetic manifesto (approx 100-150 words) about the number Pi (π).
Describe its irrational, infinite decimal expansion as a digital heartbeat that never repeats and never resolves.
Connect this mathematical chaos deeply to the concept of \"Techno\", a relentless, purifying rhythm that destroys negative energy through repetition and variation.
The tone should be abstract, brutalist, mystical, and scientific.
Do not use standard formatting like headers. Just raw, powerful text.";

/// The fixed creative prompt sent to the text generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub temperature: f32,
    /// Tokens the model may spend thinking before it answers.
    pub thinking_budget: u32,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            text: DEFAULT_PROMPT.to_owned(),
            temperature: 0.9,
            thinking_budget: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// `None` means the explanation feature runs in fallback mode.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub prompt: Prompt,
    pub reveal_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            prompt: Prompt::default(),
            reveal_interval: Duration::from_millis(u64::from(REVEAL_INTERVAL_MS)),
        }
    }
}

/// Optional fields accepted from the page's JSON config block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Overrides {
    /// Values baked in by the environment of the build.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            api_key: option_env!("API_KEY").map(str::to_owned),
            model: option_env!("PI_TRACE_MODEL").map(str::to_owned),
            endpoint: option_env!("PI_TRACE_ENDPOINT").map(str::to_owned),
        }
    }

    /// Parse the page's JSON block.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl Config {
    /// Apply `overrides` on top of the current values, skipping blanks.
    #[must_use]
    pub fn with(mut self, overrides: Overrides) -> Self {
        if let Some(key) = non_blank(overrides.api_key) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_blank(overrides.model) {
            self.model = model;
        }
        if let Some(endpoint) = non_blank(overrides.endpoint) {
            self.endpoint = endpoint;
        }
        self
    }

    /// Defaults plus whatever the build environment provided.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::default().with(Overrides::from_build_env())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
