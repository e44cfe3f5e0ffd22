//! Prompt construction for the primary model path.
//!
//! The invoker owns the call; this module owns the words. Prompts demand
//! bare JSON output and forbid invented values, which keeps the downstream
//! cleanup and validation steps honest.

use crate::document::DocumentKind;
use crate::schema::{FieldKind, FieldSchema};

/// Build the parsing prompt for one document.
///
/// The rendered prompt lists every schema field with its expected shape,
/// states the output requirements, and appends the document text.
pub fn build_prompt(kind: DocumentKind, text: &str) -> String {
    let schema = FieldSchema::for_kind(kind);

    let mut field_lines = String::new();
    for spec in schema.fields() {
        let shape = match spec.kind {
            FieldKind::Text => "string",
            FieldKind::List => "array of strings",
        };
        field_lines.push_str(&format!("- \"{}\": {}\n", spec.name, shape));
    }

    format!(
        r#"You are a specialized extraction agent for parsing {label} documents. Return ONLY a valid JSON object - no explanations, no markdown formatting, no extra text before or after the JSON.

OUTPUT REQUIREMENTS:
- Return ONLY a valid JSON object
- The response must start with an opening brace and end with a closing brace
- All strings must be properly escaped for JSON
- Include every field listed below; use "" or [] when the source has no data

EXTRACTION RULES:
- Use only text that appears in the source document
- Every value must be a direct quote or exact phrase from the source
- Never create, infer, guess, or generate information that is not present
- Also include a "confidence_score" number between 0 and 1 and a "parsing_notes" array describing anything ambiguous

FIELDS:
{fields}
DOCUMENT:
{text}"#,
        label = kind.label(),
        fields = field_lines,
        text = text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_all_cv_fields() {
        let prompt = build_prompt(DocumentKind::Cv, "Jane Doe");

        for spec in FieldSchema::cv().fields() {
            assert!(
                prompt.contains(&format!("\"{}\"", spec.name)),
                "prompt missing field {}",
                spec.name
            );
        }
        assert!(prompt.contains("Jane Doe"));
    }

    #[test]
    fn test_prompt_states_json_contract() {
        let prompt = build_prompt(DocumentKind::JobPosting, "Senior Engineer");

        assert!(prompt.contains("ONLY a valid JSON object"));
        assert!(prompt.contains("job posting"));
        assert!(prompt.contains("confidence_score"));
    }
}
