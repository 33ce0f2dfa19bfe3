//! Layout-analysis backend via `lopdf`
//!
//! Walks pages in document order and extracts each page's text in layout
//! order, emitting one markdown-like string with pages separated by a
//! blank line. Raises on malformed input; the bundle builder downgrades
//! that to a sentinel entry.

use crate::ExtractError;
use docrecon_domain::TextExtractor;
use lopdf::Document;
use std::path::Path;
use tracing::info;

/// Page-ordered layout extraction backend
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutExtractor;

impl LayoutExtractor {
    /// Create the backend
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LayoutExtractor {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "layout"
    }

    fn extract(&self, path: &Path) -> Result<String, Self::Error> {
        info!(path = %path.display(), "parsing with layout extractor");

        let doc = Document::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;

        let mut pages_text = Vec::new();
        for page_number in doc.get_pages().keys() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| ExtractError::Pdf(e.to_string()))?;
            pages_text.push(text.trim_end().to_string());
        }

        Ok(pages_text.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_label() {
        assert_eq!(LayoutExtractor::new().name(), "layout");
    }

    #[test]
    fn test_malformed_pdf_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let result = LayoutExtractor::new().extract(&path);
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }
}
