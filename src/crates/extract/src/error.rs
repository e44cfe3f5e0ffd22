//! Error types for document extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while validating or extracting from documents.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input document contained no usable text.
    #[error("empty document: {0}")]
    EmptyDocument(String),

    /// Input document exceeded the configured length limit.
    #[error("document too large: {actual} chars exceeds limit of {limit}")]
    DocumentTooLarge { actual: usize, limit: usize },
}
