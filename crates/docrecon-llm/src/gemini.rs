//! Gemini Provider Implementation
//!
//! Blocking client for Google's Generative Language REST API. The
//! pipeline is deliberately synchronous (one document at a time, serial
//! backend calls), so the blocking reqwest client is used directly and
//! retry policy stays with the caller.

use crate::LlmError;
use docrecon_domain::GenerativeProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Base URL for the Generative Language API
pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model, matching the schema-inference quality the pipeline
/// was tuned against
pub const DEFAULT_MODEL: &str = "gemini-2.0-pro-exp-02-05";

/// Environment variable consulted when no key is passed explicitly
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Request timeout; generation over large multi-source prompts is slow
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Gemini REST API provider
pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit API key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Communication(format!("Client build failed: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    /// Create a provider from an optional key, falling back to the
    /// `GEMINI_API_KEY` environment variable
    pub fn from_key_or_env(api_key: Option<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let key = api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                LlmError::MissingApiKey(format!(
                    "set {} or pass the key explicitly",
                    API_KEY_ENV
                ))
            })?;
        Self::new(key, model)
    }

    /// Model identifier this provider generates with
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerativeProvider for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "calling Gemini");

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Candidate contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}
