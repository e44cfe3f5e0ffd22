//! Per-kind field schemas.
//!
//! A schema is the list of fields a well-formed parse must contain for a
//! given document kind, together with each field's shape. Validation fills
//! missing fields with empty defaults and drives the completeness score.

use crate::document::DocumentKind;
use crate::result::FieldValue;
use serde::{Deserialize, Serialize};

/// The shape of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single text value.
    Text,
    /// List of text values.
    List,
}

impl FieldKind {
    /// The empty default for this field kind.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::List => FieldValue::List(Vec::new()),
        }
    }
}

/// One named field in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in model output.
    pub name: String,

    /// Expected shape.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
        }
    }

    /// Create a list field.
    pub fn list(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::List,
        }
    }
}

/// The required field list for one document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    /// Build a schema from an explicit field list.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The schema for a given document kind.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Cv => Self::cv(),
            DocumentKind::JobPosting => Self::job_posting(),
        }
    }

    /// Schema for CV/resume documents.
    pub fn cv() -> Self {
        Self::new(vec![
            FieldSpec::text("full_name"),
            FieldSpec::text("email"),
            FieldSpec::text("phone"),
            FieldSpec::text("location"),
            FieldSpec::text("linkedin_url"),
            FieldSpec::text("portfolio_url"),
            FieldSpec::list("professional_summary"),
            FieldSpec::list("key_skills"),
            FieldSpec::list("work_experience"),
            FieldSpec::list("education"),
            FieldSpec::list("certifications"),
            FieldSpec::list("projects"),
            FieldSpec::list("publications"),
            FieldSpec::list("languages"),
            FieldSpec::list("achievements"),
            FieldSpec::list("volunteer_work"),
        ])
    }

    /// Schema for job-posting documents.
    pub fn job_posting() -> Self {
        Self::new(vec![
            FieldSpec::text("job_title"),
            FieldSpec::text("company_name"),
            FieldSpec::text("location"),
            FieldSpec::list("job_summary"),
            FieldSpec::list("required_skills"),
            FieldSpec::list("preferred_skills"),
            FieldSpec::list("required_experience"),
            FieldSpec::list("required_education"),
            FieldSpec::list("required_qualifications"),
            FieldSpec::list("preferred_qualifications"),
            FieldSpec::list("key_responsibilities"),
            FieldSpec::list("work_environment"),
            FieldSpec::list("team_structure"),
            FieldSpec::text("salary_range"),
            FieldSpec::list("compensation_details"),
            FieldSpec::list("benefits_package"),
            FieldSpec::text("job_type"),
            FieldSpec::text("employment_duration"),
            FieldSpec::text("work_schedule"),
            FieldSpec::text("remote_work_policy"),
            FieldSpec::text("travel_requirements"),
            FieldSpec::list("company_description"),
            FieldSpec::list("company_culture"),
            FieldSpec::text("company_size"),
            FieldSpec::text("industry"),
            FieldSpec::list("application_process"),
            FieldSpec::text("application_deadline"),
            FieldSpec::text("contact_information"),
        ])
    }

    /// Iterate over the fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
