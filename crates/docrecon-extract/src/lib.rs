//! Docrecon Extraction Adapters
//!
//! Wraps four independent text-extraction capabilities behind the
//! uniform contracts from `docrecon-domain`:
//!
//! - [`MistralOcr`]: cloud OCR over the Mistral OCR REST API
//! - [`LayoutExtractor`]: page-ordered layout extraction via `lopdf`
//! - [`RawTextExtractor`]: raw text extraction via `pdf-extract`
//! - [`DocxConverter`]: DOCX to HTML + plain text via ZIP/XML parsing
//!
//! Each backend is unreliable on its own; the reconciliation engine runs
//! all of them over the same input and merges the results. Backends
//! return `Result` here — converting failures into sentinel placeholder
//! text is the bundle builder's job, not theirs.

#![warn(missing_docs)]

mod docx;
mod error;
mod layout;
mod ocr;
mod raw_text;

pub use docx::DocxConverter;
pub use error::ExtractError;
pub use layout::LayoutExtractor;
pub use ocr::MistralOcr;
pub use raw_text::RawTextExtractor;
