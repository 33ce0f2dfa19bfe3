//! Docrecon Domain Layer
//!
//! This crate contains the core value objects and trait interfaces for the
//! document reconciliation pipeline. It stays free of infrastructure
//! concerns: HTTP clients, PDF libraries, and LLM providers live in other
//! crates and plug in through the traits defined here.
//!
//! ## Key Concepts
//!
//! - **SourceBundle**: the per-document collection of extracted texts, one
//!   entry per extraction backend
//! - **DocumentKind**: supported input formats (PDF, DOCX)
//! - **ProcessingResult**: immutable per-document outcome record
//! - **BatchSummary**: running success/failure tally for a directory run
//!
//! ## Architecture
//!
//! - No fixed schema for extracted business data: the inferred document
//!   structure varies per input and is carried as opaque JSON text
//! - Trait definitions for all external capabilities (extraction backends,
//!   generative provider); implementations are injected at construction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod document;
pub mod traits;

// Re-exports for convenience
pub use bundle::{SourceBundle, SourceEntry, SourceKind};
pub use document::{BatchSummary, DocumentKind, ProcessingResult};
pub use traits::{GenerativeProvider, MarkupConverter, MarkupExtraction, TextExtractor};
