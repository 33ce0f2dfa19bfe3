//! Source bundle assembly with adapter isolation
//!
//! Runs every extraction backend over one document and collects the
//! results. A backend failure becomes a sentinel placeholder entry, so
//! the bundle always carries one entry per configured backend and the
//! document still reaches the generative stages.

use docrecon_domain::{MarkupConverter, MarkupExtraction, SourceBundle, TextExtractor};
use std::path::Path;
use tracing::warn;

/// Object-safe text extractor with the error type erased to `String`.
///
/// Lets the processor hold a heterogeneous list of backends; any
/// [`TextExtractor`] implementation qualifies via the blanket impl.
pub trait SourceExtractor {
    /// Stable backend identifier used as the bundle label
    fn name(&self) -> &str;
    /// Extract the document's text
    fn extract(&self, path: &Path) -> Result<String, String>;
}

impl<T: TextExtractor> SourceExtractor for T {
    fn name(&self) -> &str {
        TextExtractor::name(self)
    }

    fn extract(&self, path: &Path) -> Result<String, String> {
        TextExtractor::extract(self, path).map_err(|e| e.to_string())
    }
}

/// Object-safe markup converter with the error type erased to `String`
pub trait SourceConverter {
    /// Convert the document into HTML plus a plain-text fallback
    fn convert(&self, path: &Path) -> Result<MarkupExtraction, String>;
}

impl<T: MarkupConverter> SourceConverter for T {
    fn convert(&self, path: &Path) -> Result<MarkupExtraction, String> {
        MarkupConverter::convert(self, path).map_err(|e| e.to_string())
    }
}

/// Run all PDF backends over one document.
///
/// The returned bundle has exactly one entry per backend; failed
/// backends contribute a sentinel placeholder instead of text.
pub fn collect_pdf_sources(
    extractors: &[Box<dyn SourceExtractor>],
    path: &Path,
) -> SourceBundle {
    let mut bundle = SourceBundle::new();
    for extractor in extractors {
        let label = extractor.name().to_string();
        match extractor.extract(path) {
            Ok(text) => bundle.push(label, text),
            Err(e) => {
                warn!(backend = %label, error = %e, "extraction backend failed");
                bundle.push(label.clone(), format!("Error parsing with {}", label));
            }
        }
    }
    bundle
}

/// Run the DOCX markup backend over one document.
///
/// Produces the `html` + `text` label pair; on failure both entries hold
/// placeholder text so the document still reaches the generative stages.
pub fn collect_docx_sources(converter: &dyn SourceConverter, path: &Path) -> SourceBundle {
    let mut bundle = SourceBundle::new();
    match converter.convert(path) {
        Ok(extraction) => {
            bundle.push_markup("html", extraction.html);
            bundle.push("text", extraction.text);
        }
        Err(e) => {
            warn!(error = %e, "DOCX conversion failed");
            bundle.push_markup("html", format!("<p>Error parsing with docx: {}</p>", e));
            bundle.push("text", format!("Error parsing with docx: {}", e));
        }
    }
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor {
        label: &'static str,
        reply: Result<&'static str, &'static str>,
    }

    impl TextExtractor for FixedExtractor {
        type Error = String;

        fn name(&self) -> &str {
            self.label
        }

        fn extract(&self, _path: &Path) -> Result<String, Self::Error> {
            self.reply
                .map(str::to_string)
                .map_err(str::to_string)
        }
    }

    #[test]
    fn test_all_backends_contribute_entries() {
        let extractors: Vec<Box<dyn SourceExtractor>> = vec![
            Box::new(FixedExtractor { label: "ocr", reply: Ok("ocr text") }),
            Box::new(FixedExtractor { label: "layout", reply: Ok("layout text") }),
            Box::new(FixedExtractor { label: "raw-text", reply: Ok("raw text") }),
        ];

        let bundle = collect_pdf_sources(&extractors, Path::new("doc.pdf"));
        assert_eq!(bundle.labels(), vec!["ocr", "layout", "raw-text"]);
        assert_eq!(bundle.get("layout"), Some("layout text"));
    }

    #[test]
    fn test_failing_backend_degrades_to_sentinel() {
        let extractors: Vec<Box<dyn SourceExtractor>> = vec![
            Box::new(FixedExtractor { label: "ocr", reply: Ok("ocr text") }),
            Box::new(FixedExtractor { label: "layout", reply: Err("backend exploded") }),
            Box::new(FixedExtractor { label: "raw-text", reply: Ok("raw text") }),
        ];

        let bundle = collect_pdf_sources(&extractors, Path::new("doc.pdf"));

        // Every label is present; only the failed one is a placeholder
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.get("layout"), Some("Error parsing with layout"));
        assert_eq!(bundle.get("ocr"), Some("ocr text"));
        assert_eq!(bundle.get("raw-text"), Some("raw text"));
    }

    struct FailingConverter;

    impl MarkupConverter for FailingConverter {
        type Error = String;

        fn convert(&self, _path: &Path) -> Result<MarkupExtraction, Self::Error> {
            Err("corrupt archive".to_string())
        }
    }

    #[test]
    fn test_docx_failure_keeps_both_labels() {
        let bundle = collect_docx_sources(&FailingConverter, Path::new("doc.docx"));

        assert_eq!(bundle.labels(), vec!["html", "text"]);
        assert!(bundle.get("html").unwrap().contains("corrupt archive"));
        assert!(bundle.get("text").unwrap().contains("corrupt archive"));
    }
}
