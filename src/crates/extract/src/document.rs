//! Parse requests and document kinds.

use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};

/// Default upper bound on document length, in characters.
///
/// Generous enough for multi-page CVs and long job postings; anything
/// larger is almost certainly a mis-uploaded file and would blow the
/// model's context window anyway.
pub const DEFAULT_MAX_TEXT_LEN: usize = 200_000;

/// The kind of document being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A CV / resume.
    Cv,
    /// A job posting / job description.
    JobPosting,
}

impl DocumentKind {
    /// Human-readable label used in prompts and notes.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Cv => "CV/resume",
            DocumentKind::JobPosting => "job posting",
        }
    }
}

/// A single request to parse one document.
///
/// Created per incoming document, consumed once by the invoker, and
/// discarded. Carries the raw text, its kind, and a length limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Raw document text.
    pub text: String,

    /// What kind of document this is.
    pub kind: DocumentKind,

    /// Maximum accepted text length in characters.
    #[serde(default = "default_max_len")]
    pub max_len: usize,
}

fn default_max_len() -> usize {
    DEFAULT_MAX_TEXT_LEN
}

impl ParseRequest {
    /// Create a new parse request with the default length limit.
    pub fn new(text: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            text: text.into(),
            kind,
            max_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Override the maximum accepted text length.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Check the request's size constraints.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(ExtractError::EmptyDocument(format!(
                "no text content in {} request",
                self.kind.label()
            )));
        }

        let actual = self.text.chars().count();
        if actual > self.max_len {
            return Err(ExtractError::DocumentTooLarge {
                actual,
                limit: self.max_len,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_normal_text() {
        let request = ParseRequest::new("Jane Doe\nSoftware Engineer", DocumentKind::Cv);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        let request = ParseRequest::new("   \n\t ", DocumentKind::Cv);
        assert!(matches!(
            request.validate(),
            Err(ExtractError::EmptyDocument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let request =
            ParseRequest::new("x".repeat(100), DocumentKind::JobPosting).with_max_len(50);

        match request.validate() {
            Err(ExtractError::DocumentTooLarge { actual, limit }) => {
                assert_eq!(actual, 100);
                assert_eq!(limit, 50);
            }
            other => panic!("expected DocumentTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(DocumentKind::Cv.label(), "CV/resume");
        assert_eq!(DocumentKind::JobPosting.label(), "job posting");
    }
}
