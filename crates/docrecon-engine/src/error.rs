//! Error types for the reconciliation engine

use thiserror::Error;

/// Errors that can occur while processing a document
#[derive(Error, Debug)]
pub enum EngineError {
    /// Generative call failed after all retries were exhausted
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Filesystem error while materializing artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path does not exist
    #[error("File does not exist: {0}")]
    NotFound(String),

    /// Input has an extension the pipeline does not handle
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}
