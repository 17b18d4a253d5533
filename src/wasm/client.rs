//! Gemini text generation over `fetch`.

use gloo_net::http::Request;

use crate::config::{Config, Prompt};
use crate::error::GenerateError;
use crate::explain::TextGenerator;
use crate::gemini::{self, GenerateRequest, GenerateResponse, API_KEY_HEADER};

#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, config: &Config) -> Self {
        Self {
            api_key,
            url: gemini::generate_url(&config.endpoint, &config.model),
        }
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        let response = Request::post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateRequest::new(prompt))
            .map_err(|e| GenerateError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        let ok = response.ok();
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;
        if !ok {
            return Err(GenerateError::Status { status, body });
        }
        Ok(GenerateResponse::from_json(&body)?.text())
    }
}
