//! Source bundle: per-document extracted texts, one entry per backend

use serde::{Deserialize, Serialize};

/// Kind of text held by a bundle entry, used to pick the raw-output
/// file extension when artifacts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Markdown-like plain text (`.md` on disk)
    Markdown,
    /// Styled markup such as HTML (`.html` on disk)
    Markup,
}

impl SourceKind {
    /// File extension for raw-output artifacts of this kind
    pub fn extension(&self) -> &'static str {
        match self {
            SourceKind::Markdown => "md",
            SourceKind::Markup => "html",
        }
    }
}

/// One extraction backend's output for a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Stable backend identifier (e.g. "ocr", "layout", "raw-text")
    pub label: String,

    /// Extracted text; may be empty or an error placeholder when the
    /// backend failed
    pub text: String,

    /// Whether the text is markdown-like or styled markup
    pub kind: SourceKind,
}

/// The collection of extracted texts for a single document.
///
/// Built fresh per document, immutable once constructed, and owned
/// exclusively by one reconciliation run. Entry order is preserved so
/// prompts and raw-output files are deterministic.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    entries: Vec<SourceEntry>,
}

impl SourceBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a markdown-like entry
    pub fn push(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.entries.push(SourceEntry {
            label: label.into(),
            text: text.into(),
            kind: SourceKind::Markdown,
        });
    }

    /// Add a markup entry
    pub fn push_markup(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.entries.push(SourceEntry {
            label: label.into(),
            text: text.into(),
            kind: SourceKind::Markup,
        });
    }

    /// Look up an entry's text by label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.text.as_str())
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the bundle holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_preserves_order() {
        let mut bundle = SourceBundle::new();
        bundle.push("ocr", "a");
        bundle.push("layout", "b");
        bundle.push("raw-text", "c");

        assert_eq!(bundle.labels(), vec!["ocr", "layout", "raw-text"]);
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn test_bundle_lookup() {
        let mut bundle = SourceBundle::new();
        bundle.push("ocr", "page text");

        assert_eq!(bundle.get("ocr"), Some("page text"));
        assert_eq!(bundle.get("layout"), None);
    }

    #[test]
    fn test_markup_extension() {
        let mut bundle = SourceBundle::new();
        bundle.push_markup("html", "<p>hi</p>");
        bundle.push("text", "hi");

        let kinds: Vec<_> = bundle.iter().map(|e| e.kind.extension()).collect();
        assert_eq!(kinds, vec!["html", "md"]);
    }
}
