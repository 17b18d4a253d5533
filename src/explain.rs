//! The "why is π irrational" text, from a generator or a fallback.
//!
//! [`Explainer`] never fails: every path ends in a string the menu can show.

use std::future::Future;

use crate::config::Prompt;
use crate::error::GenerateError;

/// Shown when no API key is configured. No request is made.
pub const MISSING_KEY_TEXT: &str = "Please configure your API Key to fetch the explanation.";

/// Shown when the generator fails for any reason.
pub const UNAVAILABLE_TEXT: &str = "Unable to contact the cosmic AI at this moment.";

/// Shown when the generator succeeds with no text.
pub const EMPTY_TEXT: &str = "No explanation available.";

/// Something that turns a prompt into text.
pub trait TextGenerator {
    fn generate(&self, prompt: &Prompt) -> impl Future<Output = Result<String, GenerateError>>;
}

/// A configured generator, or none at all.
#[derive(Debug)]
pub enum Explainer<G> {
    Configured(G),
    Unconfigured,
}

impl<G> Explainer<G> {
    /// Build the configured variant when `api_key` is present.
    pub fn new(api_key: Option<String>, make: impl FnOnce(String) -> G) -> Self {
        match api_key {
            Some(key) => Self::Configured(make(key)),
            None => {
                log::warn!("no API key configured; explanations will use fallback text");
                Self::Unconfigured
            }
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

impl<G: TextGenerator> Explainer<G> {
    pub async fn explain(&self, prompt: &Prompt) -> String {
        let generator = match self {
            Self::Configured(g) => g,
            Self::Unconfigured => return MISSING_KEY_TEXT.to_owned(),
        };
        match generator.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => EMPTY_TEXT.to_owned(),
            Ok(text) => text,
            Err(err) => {
                log::error!("explanation request failed: {err}");
                UNAVAILABLE_TEXT.to_owned()
            }
        }
    }
}
