//! Trait definitions for external capabilities
//!
//! These traits define the boundaries between the reconciliation logic and
//! infrastructure. Implementations live in other crates (`docrecon-extract`,
//! `docrecon-llm`) or are test doubles.

use std::path::Path;

/// A text-extraction backend for PDF documents.
///
/// Implementations wrap one external capability (OCR service, layout
/// analyzer, raw text extractor). Backends are allowed to fail; the
/// bundle builder converts failures into sentinel placeholder text so a
/// single failing backend degrades the bundle without aborting the
/// document.
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error: std::fmt::Display;

    /// Stable backend identifier used as the bundle label
    fn name(&self) -> &str;

    /// Extract the document's text as one markdown-like string
    fn extract(&self, path: &Path) -> Result<String, Self::Error>;
}

/// The two artifacts produced by a markup-conversion backend
#[derive(Debug, Clone)]
pub struct MarkupExtraction {
    /// Styled markup rendition of the document
    pub html: String,
    /// Plain-text fallback
    pub text: String,
}

/// A markup-conversion backend for DOCX documents.
///
/// Unlike [`TextExtractor`], the downstream consumer needs both the
/// styled markup and a plain-text fallback, so the contract returns
/// both artifacts at once.
pub trait MarkupConverter {
    /// Error type for conversion operations
    type Error: std::fmt::Display;

    /// Convert the document into HTML plus a plain-text fallback
    fn convert(&self, path: &Path) -> Result<MarkupExtraction, Self::Error>;
}

/// A generative text capability.
///
/// Implemented by the infrastructure layer (`docrecon-llm`). The call is
/// blocking and may fail on quota or network errors; retry policy is the
/// caller's responsibility.
pub trait GenerativeProvider {
    /// Error type for generation operations
    type Error: std::fmt::Display;

    /// Generate a text completion for the given prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}
