//! OCR backend over the Mistral OCR REST API
//!
//! Three-step protocol: upload the file for OCR processing, fetch a
//! signed URL for the uploaded document, then run OCR against that URL.
//! Per-page markdown is concatenated into one string with a blank-line
//! separator.

use crate::ExtractError;
use docrecon_domain::TextExtractor;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Base URL for the Mistral API
pub const API_BASE: &str = "https://api.mistral.ai/v1";

/// OCR model identifier
pub const OCR_MODEL: &str = "mistral-ocr-latest";

/// Environment variable consulted when no key is passed explicitly
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

/// Upload and OCR of large documents can take a while
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// OCR extraction backend backed by the Mistral OCR API
pub struct MistralOcr {
    api_key: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Deserialize)]
struct SignedUrl {
    url: String,
}

#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    pages: Vec<OcrPage>,
}

#[derive(Deserialize)]
struct OcrPage {
    #[serde(default)]
    markdown: String,
}

impl MistralOcr {
    /// Create a backend with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExtractError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ExtractError::Http(format!("Client build failed: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a backend from an optional key, falling back to the
    /// `MISTRAL_API_KEY` environment variable
    pub fn from_key_or_env(api_key: Option<String>) -> Result<Self, ExtractError> {
        let key = api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ExtractError::MissingApiKey(format!(
                    "set {} or pass the key explicitly",
                    API_KEY_ENV
                ))
            })?;
        Self::new(key)
    }

    fn upload(&self, path: &Path) -> Result<UploadedFile, ExtractError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        let part = reqwest::blocking::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::blocking::multipart::Form::new()
            .text("purpose", "ocr")
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/files", API_BASE))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| ExtractError::Http(format!("Upload failed: {}", e)))?;

        Self::check_status(&response.status())?;
        response
            .json()
            .map_err(|e| ExtractError::Api(format!("Unexpected upload response: {}", e)))
    }

    fn signed_url(&self, file_id: &str) -> Result<SignedUrl, ExtractError> {
        let response = self
            .client
            .get(format!("{}/files/{}/url", API_BASE, file_id))
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| ExtractError::Http(format!("Signed URL request failed: {}", e)))?;

        Self::check_status(&response.status())?;
        response
            .json()
            .map_err(|e| ExtractError::Api(format!("Unexpected signed URL response: {}", e)))
    }

    fn run_ocr(&self, document_url: &str) -> Result<OcrResponse, ExtractError> {
        let body = serde_json::json!({
            "model": OCR_MODEL,
            "document": {
                "type": "document_url",
                "document_url": document_url,
            },
        });

        let response = self
            .client
            .post(format!("{}/ocr", API_BASE))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ExtractError::Http(format!("OCR request failed: {}", e)))?;

        Self::check_status(&response.status())?;
        response
            .json()
            .map_err(|e| ExtractError::Api(format!("Unexpected OCR response: {}", e)))
    }

    fn check_status(status: &reqwest::StatusCode) -> Result<(), ExtractError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ExtractError::Api(format!("HTTP {}", status)))
        }
    }
}

impl TextExtractor for MistralOcr {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "ocr"
    }

    fn extract(&self, path: &Path) -> Result<String, Self::Error> {
        info!(path = %path.display(), "parsing with Mistral OCR");

        let uploaded = self.upload(path)?;
        debug!(file_id = %uploaded.id, "uploaded for OCR");

        let signed = self.signed_url(&uploaded.id)?;
        let ocr = self.run_ocr(&signed.url)?;

        let mut markdown = String::new();
        for page in &ocr.pages {
            markdown.push_str(&page.markdown);
            markdown.push_str("\n\n");
        }

        Ok(markdown)
    }
}
