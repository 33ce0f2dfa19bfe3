//! Output materializer: deterministic flat-file artifact layout
//!
//! ```text
//! <root>/raw_outputs/<stem>_<label>.md|.html
//! <root>/json_outputs/<stem>.json
//! <root>/confidence_scores/<stem>_confidence.json
//! <root>/docx_copies/<stem>.docx
//! <root>/pdf_copies/<stem>.pdf
//! ```
//!
//! All writes are UTF-8 text, overwrite-on-conflict. Directories are
//! created eagerly and idempotently before any document is processed.

use docrecon_domain::{DocumentKind, SourceEntry};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const RAW_DIR: &str = "raw_outputs";
const JSON_DIR: &str = "json_outputs";
const CONFIDENCE_DIR: &str = "confidence_scores";
const DOCX_COPIES_DIR: &str = "docx_copies";
const PDF_COPIES_DIR: &str = "pdf_copies";

/// The on-disk artifact layout under one output root
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Create the layout description (no filesystem access yet)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create every output directory; idempotent
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [
            RAW_DIR,
            JSON_DIR,
            CONFIDENCE_DIR,
            DOCX_COPIES_DIR,
            PDF_COPIES_DIR,
        ] {
            fs::create_dir_all(self.root.join(dir))?;
        }
        Ok(())
    }

    /// Write one raw extraction artifact: `raw_outputs/<stem>_<label>.<ext>`
    pub fn write_raw(&self, stem: &str, entry: &SourceEntry) -> io::Result<PathBuf> {
        let path = self.root.join(RAW_DIR).join(format!(
            "{}_{}.{}",
            stem,
            entry.label,
            entry.kind.extension()
        ));
        fs::write(&path, &entry.text)?;
        Ok(path)
    }

    /// Write the confidence tree: `confidence_scores/<stem>_confidence.json`
    pub fn write_confidence(&self, stem: &str, json: &str) -> io::Result<PathBuf> {
        let path = self
            .root
            .join(CONFIDENCE_DIR)
            .join(format!("{}_confidence.json", stem));
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Write the final reconciled tree: `json_outputs/<stem>.json`
    pub fn write_final(&self, stem: &str, json: &str) -> io::Result<PathBuf> {
        let path = self.final_path(stem);
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Where the final JSON for a stem lives; its presence is the
    /// durable success signal for that document
    pub fn final_path(&self, stem: &str) -> PathBuf {
        self.root.join(JSON_DIR).join(format!("{}.json", stem))
    }

    /// Copy the source document into the copies directory for its kind
    pub fn copy_source(&self, stem: &str, source: &Path, kind: DocumentKind) -> io::Result<PathBuf> {
        let dir = match kind {
            DocumentKind::Pdf => PDF_COPIES_DIR,
            DocumentKind::Docx => DOCX_COPIES_DIR,
        };
        let path = self
            .root
            .join(dir)
            .join(format!("{}.{}", stem, kind.extension()));
        fs::copy(source, &path)?;
        Ok(path)
    }
}
