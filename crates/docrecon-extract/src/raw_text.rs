//! Raw-text backend via `pdf-extract`
//!
//! One-shot whole-document text extraction. No layout reconstruction;
//! this is the cheapest of the PDF backends and often the noisiest.

use crate::ExtractError;
use docrecon_domain::TextExtractor;
use std::path::Path;
use tracing::info;

/// Whole-document raw text extraction backend
#[derive(Debug, Default, Clone, Copy)]
pub struct RawTextExtractor;

impl RawTextExtractor {
    /// Create the backend
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for RawTextExtractor {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "raw-text"
    }

    fn extract(&self, path: &Path) -> Result<String, Self::Error> {
        info!(path = %path.display(), "parsing with raw text extractor");

        pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}
