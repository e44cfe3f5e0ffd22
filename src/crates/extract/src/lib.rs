//! Domain types for structured document extraction.
//!
//! This crate owns everything that is true about a parse regardless of how
//! the fields were obtained: the request and result types, the per-kind
//! field schemas, prompt construction for the primary model path, and the
//! deterministic pattern-based fallback extractor used when no model is
//! reachable.
//!
//! # Example
//!
//! ```rust
//! use extract::{DocumentKind, FallbackExtractor, ParseRequest};
//!
//! let request = ParseRequest::new("Jane Doe\njane@example.com", DocumentKind::Cv);
//! assert!(request.validate().is_ok());
//!
//! let extractor = FallbackExtractor::new();
//! let result = extractor.extract(&request);
//! assert!(result.is_degraded);
//! ```

pub mod document;
pub mod error;
pub mod fallback;
pub mod prompt;
pub mod result;
pub mod schema;

pub use document::{DocumentKind, ParseRequest, DEFAULT_MAX_TEXT_LEN};
pub use error::{ExtractError, Result};
pub use fallback::FallbackExtractor;
pub use prompt::build_prompt;
pub use result::{FieldValue, ParseResult};
pub use schema::{FieldKind, FieldSchema, FieldSpec};
