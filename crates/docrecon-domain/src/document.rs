//! Document-level types: input kinds, per-document outcomes, batch tally

use std::path::{Path, PathBuf};

/// Supported input document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
}

impl DocumentKind {
    /// Determine the kind from a path's extension (case-insensitive).
    ///
    /// Returns `None` for unsupported or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Canonical extension for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// Immutable record of one document's processing outcome.
///
/// Created when processing finishes; never mutated afterward. The
/// presence of a final JSON artifact is the durable success signal.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Document stem (file name without extension)
    pub stem: String,

    /// Whether the document produced a final JSON artifact
    pub success: bool,

    /// Paths of all artifacts written for this document
    pub artifacts: Vec<PathBuf>,

    /// Error description when `success` is false
    pub error: Option<String>,
}

impl ProcessingResult {
    /// Record a successful run with its persisted artifacts
    pub fn succeeded(stem: impl Into<String>, artifacts: Vec<PathBuf>) -> Self {
        Self {
            stem: stem.into(),
            success: true,
            artifacts,
            error: None,
        }
    }

    /// Record a failed run; partial artifacts may still exist on disk
    pub fn failed(
        stem: impl Into<String>,
        artifacts: Vec<PathBuf>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            stem: stem.into(),
            success: false,
            artifacts,
            error: Some(error.into()),
        }
    }
}

/// Running tally for a directory batch run.
///
/// A batch has no fatal condition: it always completes and reports
/// this summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Documents that produced a final JSON artifact
    pub successful: usize,
    /// Documents that did not
    pub failed: usize,
}

impl BatchSummary {
    /// Fold one document outcome into the tally
    pub fn record(&mut self, success: bool) {
        if success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Total documents seen
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }

    /// True when no document failed
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
