//! Schema validation of parsed model output.
//!
//! Validation never rejects: missing or wrong-typed fields are coerced or
//! filled with empty defaults and annotated, and the completeness score
//! records how much of the schema the model actually delivered.

use extract::{FieldKind, FieldSchema, FieldValue};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Outcome of validating one parsed object against a schema.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Every schema field, extracted or defaulted.
    pub fields: BTreeMap<String, FieldValue>,

    /// Notes about missing or coerced fields.
    pub notes: Vec<String>,

    /// Fields present / fields expected, in [0, 1].
    pub completeness: f64,

    /// Confidence the model reported about itself, if any.
    pub model_confidence: Option<f64>,
}

/// Validate a parsed JSON value against the schema.
pub fn apply_schema(value: &Value, schema: &FieldSchema) -> ValidationOutcome {
    let empty = serde_json::Map::new();
    let object = value.as_object().unwrap_or(&empty);

    let mut fields = BTreeMap::new();
    let mut notes = Vec::new();
    let mut present = 0usize;

    for spec in schema.fields() {
        match object.get(&spec.name) {
            Some(raw) if !raw.is_null() => {
                present += 1;
                fields.insert(spec.name.clone(), coerce(raw, spec.kind, &spec.name, &mut notes));
            }
            _ => {
                notes.push(format!("missing field '{}' - filled with empty default", spec.name));
                fields.insert(spec.name.clone(), spec.kind.empty_value());
            }
        }
    }

    let completeness = if schema.is_empty() {
        1.0
    } else {
        present as f64 / schema.len() as f64
    };

    // Merge the model's own annotations when it supplied them
    let model_confidence = object.get("confidence_score").and_then(Value::as_f64);
    if let Some(Value::Array(model_notes)) = object.get("parsing_notes") {
        notes.extend(model_notes.iter().filter_map(|n| n.as_str().map(String::from)));
    }

    debug!(
        present,
        expected = schema.len(),
        completeness,
        "schema validation complete"
    );

    ValidationOutcome {
        fields,
        notes,
        completeness,
        model_confidence,
    }
}

/// Coerce a JSON value to the field's expected shape, noting lossy
/// conversions.
fn coerce(raw: &Value, kind: FieldKind, name: &str, notes: &mut Vec<String>) -> FieldValue {
    match kind {
        FieldKind::Text => match raw {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => FieldValue::Text(n.to_string()),
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            Value::Array(items) => {
                notes.push(format!("field '{}' arrived as a list - joined", name));
                FieldValue::Text(
                    items
                        .iter()
                        .map(stringify_element)
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            }
            other => {
                notes.push(format!("field '{}' had unexpected type - flattened", name));
                FieldValue::Text(stringify_element(other))
            }
        },
        FieldKind::List => match raw {
            Value::Array(items) => {
                FieldValue::List(items.iter().map(stringify_element).collect())
            }
            Value::String(s) => {
                notes.push(format!("field '{}' arrived as text - wrapped in a list", name));
                FieldValue::List(vec![s.clone()])
            }
            other => {
                notes.push(format!("field '{}' had unexpected type - flattened", name));
                FieldValue::List(vec![stringify_element(other)])
            }
        },
    }
}

/// Render one list element as display text. Structured entries (e.g. a
/// work-experience object) flatten to their scalar values in order.
fn stringify_element(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(stringify_element)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(map) => map
            .values()
            .map(stringify_element)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" - "),
    }
}
