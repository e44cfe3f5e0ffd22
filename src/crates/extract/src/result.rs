//! Parse results and field values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single extracted field value.
///
/// Fields are either free text or a list of strings; richer structures
/// (e.g. work-experience entries) are flattened to their display strings
/// by the schema coercion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single text value.
    Text(String),
    /// A list of text values.
    List(Vec<String>),
}

impl FieldValue {
    /// Whether this value is empty (empty string or empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// The list content, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// The outcome of parsing one document.
///
/// Always well-formed: every schema field is present (possibly with an
/// empty default), confidence is clamped to [0, 1], and degraded results
/// are flagged rather than raised as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    /// Extracted fields, keyed by schema field name.
    pub fields: BTreeMap<String, FieldValue>,

    /// Confidence in the extraction, in [0, 1].
    pub confidence: f64,

    /// Human-readable notes about how the parse went.
    pub parsing_notes: Vec<String>,

    /// Whether this result came from the fallback path rather than the
    /// primary model.
    pub is_degraded: bool,
}

impl ParseResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            confidence: 0.0,
            parsing_notes: Vec::new(),
            is_degraded: false,
        }
    }

    /// Set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the confidence score, clamped to [0, 1].
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Append a parsing note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.parsing_notes.push(note.into());
        self
    }

    /// Mark this result as degraded and cap its confidence.
    pub fn degraded(mut self, confidence_ceiling: f64) -> Self {
        self.is_degraded = true;
        self.confidence = self.confidence.min(confidence_ceiling).clamp(0.0, 1.0);
        self
    }

    /// Number of non-empty fields.
    pub fn populated_field_count(&self) -> usize {
        self.fields.values().filter(|v| !v.is_empty()).count()
    }
}

impl Default for ParseResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_is_empty() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::Text("   ".to_string()).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Text("x".to_string()).is_empty());
        assert!(!FieldValue::List(vec!["x".to_string()]).is_empty());
    }

    #[test]
    fn test_confidence_clamped() {
        let result = ParseResult::new().with_confidence(1.7);
        assert_eq!(result.confidence, 1.0);

        let result = ParseResult::new().with_confidence(-0.2);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_degraded_caps_confidence() {
        let result = ParseResult::new().with_confidence(0.9).degraded(0.3);
        assert!(result.is_degraded);
        assert_eq!(result.confidence, 0.3);

        // A lower confidence passes through unchanged
        let result = ParseResult::new().with_confidence(0.1).degraded(0.3);
        assert_eq!(result.confidence, 0.1);
    }

    #[test]
    fn test_populated_field_count() {
        let result = ParseResult::new()
            .with_field("email", "jane@example.com")
            .with_field("phone", "")
            .with_field("key_skills", vec!["Rust".to_string()]);

        assert_eq!(result.populated_field_count(), 2);
    }

    #[test]
    fn test_field_value_untagged_serde() {
        let text: FieldValue = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(text, FieldValue::Text("hello".to_string()));

        let list: FieldValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(
            list,
            FieldValue::List(vec!["a".to_string(), "b".to_string()])
        );
    }
}
