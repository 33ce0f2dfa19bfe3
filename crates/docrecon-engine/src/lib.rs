//! Docrecon Reconciliation Engine
//!
//! The core of the pipeline: runs every extraction backend over one
//! document, merges their outputs into a multi-source prompt, drives the
//! two-stage generative reconciliation protocol with retry/backoff, and
//! materializes the resulting artifacts.
//!
//! # Architecture
//!
//! ```text
//! Document → SourceBundle → Stage 1 (schema + confidence)
//!                         → Stage 2 (final JSON)
//!                         → OutputLayout (flat files)
//! ```
//!
//! # Key Properties
//!
//! - **Adapter isolation**: a failing extraction backend degrades its
//!   bundle entry to a placeholder string, never the document
//! - **Bounded retries**: both generative stages retry up to 5 times
//!   with jittered exponential backoff, then degrade instead of raising
//! - **Document-granular crash safety**: one document's failure never
//!   affects siblings in a batch
//!
//! # Example
//!
//! ```no_run
//! use docrecon_engine::{DocumentProcessor, Reconciler};
//! use docrecon_llm::GeminiProvider;
//!
//! # struct NoDocx;
//! # impl docrecon_domain::MarkupConverter for NoDocx {
//! #     type Error = String;
//! #     fn convert(&self, _: &std::path::Path)
//! #         -> Result<docrecon_domain::MarkupExtraction, String> { unimplemented!() }
//! # }
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::from_key_or_env(None, docrecon_llm::gemini::DEFAULT_MODEL)?;
//! let reconciler = Reconciler::new(provider);
//! let processor = DocumentProcessor::new(vec![], Box::new(NoDocx), reconciler, "parsed_outputs")?;
//!
//! let summary = processor.process_directory(std::path::Path::new("inbox"), None)?;
//! println!("{} ok, {} failed", summary.successful, summary.failed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod bundle;
mod error;
mod output;
mod processor;
pub mod prompt;
mod reconcile;
pub mod retry;
pub mod sanitize;

pub use bundle::{collect_docx_sources, collect_pdf_sources, SourceConverter, SourceExtractor};
pub use error::EngineError;
pub use output::OutputLayout;
pub use processor::DocumentProcessor;
pub use reconcile::{Reconciler, SchemaConfidence};
pub use retry::{RecordingSleeper, RetryPolicy, Sleep, ThreadSleeper};
pub use sanitize::sanitize_json;
