//! Error types for the extraction backends

use thiserror::Error;

/// Errors that can occur inside an extraction backend
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network communication with a remote backend failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Remote backend returned an unusable response
    #[error("API error: {0}")]
    Api(String),

    /// PDF could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// DOCX container could not be opened
    #[error("ZIP error: {0}")]
    Zip(String),

    /// DOCX content XML could not be parsed
    #[error("XML error: {0}")]
    Xml(String),

    /// No API key supplied via argument or environment
    #[error("Missing API key: {0}")]
    MissingApiKey(String),
}
