//! Per-document pipeline and directory batch orchestration
//!
//! Each document runs to completion before the next begins: all backends
//! sequentially, then both generative stages. One document's failure is
//! caught at the document boundary and counted; a batch always completes.

use crate::bundle::{collect_docx_sources, collect_pdf_sources, SourceConverter, SourceExtractor};
use crate::error::EngineError;
use crate::output::OutputLayout;
use crate::prompt::PromptSet;
use crate::reconcile::Reconciler;
use docrecon_domain::{BatchSummary, DocumentKind, GenerativeProvider, ProcessingResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Processes documents end to end: extraction, reconciliation, output
pub struct DocumentProcessor<G: GenerativeProvider> {
    extractors: Vec<Box<dyn SourceExtractor>>,
    converter: Box<dyn SourceConverter>,
    reconciler: Reconciler<G>,
    output: OutputLayout,
}

impl<G: GenerativeProvider> DocumentProcessor<G> {
    /// Create a processor.
    ///
    /// `extractors` are the PDF backends run per document, in order;
    /// `converter` handles DOCX input. Output directories are created
    /// eagerly here, before any document is processed.
    pub fn new(
        extractors: Vec<Box<dyn SourceExtractor>>,
        converter: Box<dyn SourceConverter>,
        reconciler: Reconciler<G>,
        output_root: impl Into<PathBuf>,
    ) -> Result<Self, EngineError> {
        let output = OutputLayout::new(output_root);
        output.ensure()?;
        Ok(Self {
            extractors,
            converter,
            reconciler,
            output,
        })
    }

    /// The artifact layout this processor writes into
    pub fn output(&self) -> &OutputLayout {
        &self.output
    }

    /// Process a single document to completion.
    ///
    /// Never panics and never propagates an error: any failure is folded
    /// into the returned [`ProcessingResult`]. Partial artifacts written
    /// before a failure stay on disk for inspection.
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        info!(path = %path.display(), "processing file");

        match self.run(path, &stem) {
            Ok(result) => {
                if result.success {
                    info!(stem = %result.stem, "✓ successfully processed");
                } else {
                    warn!(stem = %result.stem, error = ?result.error, "✗ processing failed");
                }
                result
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "✗ processing failed");
                ProcessingResult::failed(stem, vec![], e.to_string())
            }
        }
    }

    fn run(&self, path: &Path, stem: &str) -> Result<ProcessingResult, EngineError> {
        if !path.exists() {
            return Err(EngineError::NotFound(path.display().to_string()));
        }
        let kind = DocumentKind::from_path(path)
            .ok_or_else(|| EngineError::UnsupportedFileType(path.display().to_string()))?;

        let mut artifacts = Vec::new();

        // Keep a copy of the source next to its outputs
        artifacts.push(self.output.copy_source(stem, path, kind)?);

        let bundle = match kind {
            DocumentKind::Pdf => collect_pdf_sources(&self.extractors, path),
            DocumentKind::Docx => collect_docx_sources(&*self.converter, path),
        };

        for entry in bundle.iter() {
            artifacts.push(self.output.write_raw(stem, entry)?);
        }

        let prompts = PromptSet::for_kind(kind);

        info!(stem = %stem, "step 1: schema and confidence scores");
        let inferred = self.reconciler.schema_and_confidence(&bundle, &prompts);
        artifacts.push(self.output.write_confidence(stem, &inferred.confidence)?);

        info!(stem = %stem, "step 2: final structured JSON");
        match self.reconciler.final_json(&inferred.schema, &bundle, &prompts) {
            Ok(final_json) => {
                artifacts.push(self.output.write_final(stem, &final_json)?);
                Ok(ProcessingResult::succeeded(stem, artifacts))
            }
            // Exhausted retries: the document failed, but earlier
            // artifacts remain on disk for inspection. No final JSON is
            // written; its absence is the failure signal for this stem.
            Err(EngineError::Generation(e)) => {
                Ok(ProcessingResult::failed(stem, artifacts, e))
            }
            Err(e) => Err(e),
        }
    }

    /// Process every PDF and DOCX file in a directory, sequentially.
    ///
    /// Files are taken in name order, PDFs before DOCX, truncated to
    /// `limit` when given. A failing document is counted and skipped;
    /// the batch always runs to the end.
    pub fn process_directory(
        &self,
        directory: &Path,
        limit: Option<usize>,
    ) -> Result<BatchSummary, EngineError> {
        let mut files = list_documents(directory)?;

        if files.is_empty() {
            info!(directory = %directory.display(), "no PDF or DOCX files found");
            return Ok(BatchSummary::default());
        }

        let available = files.len();
        if let Some(limit) = limit.filter(|l| *l > 0) {
            files.truncate(limit);
            info!(
                "processing {} of {} files (limit set to {})",
                files.len(),
                available,
                limit
            );
        } else {
            info!("processing {} files from {}", files.len(), directory.display());
        }

        let mut summary = BatchSummary::default();
        let total = files.len();

        for (index, file) in files.iter().enumerate() {
            info!(
                "[{}/{}] processing: {}",
                index + 1,
                total,
                file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            );
            let result = self.process_file(file);
            summary.record(result.success);
        }

        info!(
            successful = summary.successful,
            failed = summary.failed,
            total = summary.total(),
            output_root = %self.output.root().display(),
            "batch complete"
        );

        Ok(summary)
    }
}

/// Enumerate processable files: PDFs first, then DOCX, each name-sorted
fn list_documents(directory: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let mut pdfs = Vec::new();
    let mut docx = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match DocumentKind::from_path(&path) {
            Some(DocumentKind::Pdf) => pdfs.push(path),
            Some(DocumentKind::Docx) => docx.push(path),
            None => {}
        }
    }

    pdfs.sort();
    docx.sort();
    pdfs.extend(docx);
    Ok(pdfs)
}
