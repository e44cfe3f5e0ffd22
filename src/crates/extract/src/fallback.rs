//! Deterministic pattern-based fallback extraction.
//!
//! When no model is reachable the system still has to answer. This module
//! extracts what regexes and line heuristics can find, returns it in the
//! same schema shape as the primary path, and marks the result degraded
//! with a low confidence so callers can tell the difference.

use crate::document::{DocumentKind, ParseRequest};
use crate::result::ParseResult;
use crate::schema::FieldSchema;
use regex::Regex;
use tracing::debug;

/// Confidence reported by fallback extraction.
const FALLBACK_CONFIDENCE: f64 = 0.2;

/// Technology and skill keywords scanned for in CV text.
const SKILL_KEYWORDS: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C++",
    "C#",
    "Rust",
    "Go",
    "PHP",
    "Ruby",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "Machine Learning",
    "Data Science",
    "Analytics",
];

/// Pattern-based extractor for when LLM services are unavailable.
///
/// Compiles its regexes once at construction; a single instance can serve
/// any number of requests.
pub struct FallbackExtractor {
    email: Regex,
    phone: Regex,
    url: Regex,
    year: Regex,
    bullet: Regex,
    section_header: Regex,
}

impl FallbackExtractor {
    /// Create a new extractor with compiled patterns.
    pub fn new() -> Self {
        // Patterns are static literals; compilation cannot fail.
        Self {
            email: Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap(),
            phone: Regex::new(r"\+?[\d][\d\s().-]{8,}\d").unwrap(),
            url: Regex::new(r"(?i)(?:https?://|www\.)[^\s,;]+|linkedin\.com/[^\s,;]+").unwrap(),
            year: Regex::new(r"\b20\d{2}\b").unwrap(),
            bullet: Regex::new(r"^\s*[-*•·]\s*(.+)$").unwrap(),
            section_header: Regex::new(
                r"(?i)^\s*(requirements?|qualifications?|responsibilit\w*|duties|benefits?|perks|skills|about\s+(?:us|the\s+company)|location)\b",
            )
            .unwrap(),
        }
    }

    /// Extract what patterns can find from the request's text.
    ///
    /// The result covers every schema field for the request's kind, is
    /// flagged degraded, and carries notes explaining the mode.
    pub fn extract(&self, request: &ParseRequest) -> ParseResult {
        debug!(kind = ?request.kind, "running pattern-based fallback extraction");

        let mut result = match request.kind {
            DocumentKind::Cv => self.extract_cv(&request.text),
            DocumentKind::JobPosting => self.extract_job(&request.text),
        };

        // Fill any fields the pattern pass did not touch.
        let schema = FieldSchema::for_kind(request.kind);
        for spec in schema.fields() {
            result
                .fields
                .entry(spec.name.clone())
                .or_insert_with(|| spec.kind.empty_value());
        }

        result
            .with_note("FALLBACK MODE: pattern-based extraction without LLM")
            .with_confidence(FALLBACK_CONFIDENCE)
            .degraded(FALLBACK_CONFIDENCE)
    }

    fn extract_cv(&self, text: &str) -> ParseResult {
        let lines: Vec<&str> = text.lines().collect();

        let mut result = ParseResult::new()
            .with_field("full_name", self.extract_name(&lines))
            .with_field("email", self.first_match(&self.email, text))
            .with_field("phone", self.first_match(&self.phone, text).trim());

        let (linkedin, portfolio) = self.extract_urls(text);
        result = result
            .with_field("linkedin_url", linkedin.as_str())
            .with_field("portfolio_url", portfolio.as_str())
            .with_field("key_skills", self.extract_skills(text))
            .with_field("work_experience", self.extract_experience(&lines));

        result
    }

    fn extract_job(&self, text: &str) -> ParseResult {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

        let job_title = lines.first().map(|l| l.trim()).unwrap_or_default();
        let company_name = lines.get(1).map(|l| l.trim()).unwrap_or_default();

        let mut required_skills = Vec::new();
        let mut responsibilities = Vec::new();
        let mut benefits = Vec::new();
        let mut location = String::new();
        let mut section = JobSection::None;

        // Line-by-line classification: section headers switch the active
        // bucket, bullet lines land in it.
        for line in &lines {
            let trimmed = line.trim();

            if let Some(captures) = self.section_header.captures(trimmed) {
                let header = captures.get(1).map(|m| m.as_str().to_lowercase());
                section = match header.as_deref() {
                    Some(h) if h.starts_with("requirement") || h.starts_with("qualification") => {
                        JobSection::Requirements
                    }
                    Some(h) if h.starts_with("skill") => JobSection::Requirements,
                    Some(h) if h.starts_with("responsibilit") || h.starts_with("dut") => {
                        JobSection::Responsibilities
                    }
                    Some(h) if h.starts_with("benefit") || h.starts_with("perk") => {
                        JobSection::Benefits
                    }
                    Some(h) if h.starts_with("location") => {
                        if let Some((_, value)) = trimmed.split_once(':') {
                            location = value.trim().to_string();
                        }
                        JobSection::None
                    }
                    _ => JobSection::None,
                };
                continue;
            }

            if let Some(captures) = self.bullet.captures(trimmed) {
                let item = captures[1].trim().to_string();
                match section {
                    JobSection::Requirements => required_skills.push(item),
                    JobSection::Responsibilities => responsibilities.push(item),
                    JobSection::Benefits => benefits.push(item),
                    JobSection::None => {}
                }
            }
        }

        ParseResult::new()
            .with_field("job_title", job_title)
            .with_field("company_name", company_name)
            .with_field("location", location.as_str())
            .with_field("required_skills", required_skills)
            .with_field("key_responsibilities", responsibilities)
            .with_field("benefits_package", benefits)
    }

    /// Take the first plausible name from the top of the document: short,
    /// no digits, not an email address.
    fn extract_name<'t>(&self, lines: &[&'t str]) -> &'t str {
        for line in lines.iter().take(5) {
            let trimmed = line.trim();
            if !trimmed.is_empty()
                && trimmed.len() > 2
                && trimmed.split_whitespace().count() <= 4
                && !trimmed.contains('@')
                && !trimmed.chars().any(|c| c.is_ascii_digit())
            {
                return trimmed;
            }
        }
        lines.first().map(|l| l.trim()).unwrap_or_default()
    }

    fn first_match<'t>(&self, pattern: &Regex, text: &'t str) -> &'t str {
        pattern.find(text).map(|m| m.as_str()).unwrap_or_default()
    }

    fn extract_urls(&self, text: &str) -> (String, String) {
        let mut linkedin = String::new();
        let mut portfolio = String::new();

        for m in self.url.find_iter(text) {
            let url = m.as_str().trim_end_matches(['.', ')']);
            if url.to_lowercase().contains("linkedin") {
                if linkedin.is_empty() {
                    linkedin = url.to_string();
                }
            } else if portfolio.is_empty() {
                portfolio = url.to_string();
            }
        }

        (linkedin, portfolio)
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        let text_upper = text.to_uppercase();
        SKILL_KEYWORDS
            .iter()
            .filter(|skill| text_upper.contains(&skill.to_uppercase()))
            .take(10)
            .map(|s| s.to_string())
            .collect()
    }

    /// Year-anchored experience lines, with following bullet lines folded
    /// into the same entry. Capped at three entries.
    fn extract_experience(&self, lines: &[&str]) -> Vec<String> {
        let mut entries: Vec<String> = Vec::new();

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if self.year.is_match(trimmed) {
                if entries.len() >= 3 {
                    break;
                }
                entries.push(trimmed.to_string());
            } else if let (Some(current), Some(captures)) =
                (entries.last_mut(), self.bullet.captures(trimmed))
            {
                current.push_str("; ");
                current.push_str(captures[1].trim());
            }
        }

        entries
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum JobSection {
    None,
    Requirements,
    Responsibilities,
    Benefits,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CV: &str = "\
Jane Doe
Senior Software Engineer
jane.doe@example.com | +1 (555) 123-4567
https://linkedin.com/in/janedoe | https://janedoe.dev

EXPERIENCE
Acme Corp - Backend Engineer, 2021 - Present
- Built Rust services on AWS
- Led PostgreSQL migration
Initech - Developer, 2018 - 2021
- Python and Django work
";

    const SAMPLE_JD: &str = "\
Senior Backend Engineer
Acme Corp

Location: Berlin, Germany

Requirements:
- 5+ years of Rust or Go
- Experience with PostgreSQL

Responsibilities:
- Design and operate backend services
- Mentor junior engineers

Benefits:
- Remote-friendly
";

    #[test]
    fn test_cv_contact_extraction() {
        let extractor = FallbackExtractor::new();
        let request = ParseRequest::new(SAMPLE_CV, DocumentKind::Cv);
        let result = extractor.extract(&request);

        assert_eq!(
            result.fields["email"].as_text(),
            Some("jane.doe@example.com")
        );
        assert_eq!(result.fields["full_name"].as_text(), Some("Jane Doe"));
        assert!(result.fields["phone"]
            .as_text()
            .unwrap()
            .contains("555"));
        assert!(result.fields["linkedin_url"]
            .as_text()
            .unwrap()
            .contains("linkedin.com/in/janedoe"));
        assert_eq!(
            result.fields["portfolio_url"].as_text(),
            Some("https://janedoe.dev")
        );
    }

    #[test]
    fn test_cv_skills_and_experience() {
        let extractor = FallbackExtractor::new();
        let request = ParseRequest::new(SAMPLE_CV, DocumentKind::Cv);
        let result = extractor.extract(&request);

        let skills = result.fields["key_skills"].as_list().unwrap();
        assert!(skills.contains(&"Rust".to_string()));
        assert!(skills.contains(&"PostgreSQL".to_string()));

        let experience = result.fields["work_experience"].as_list().unwrap();
        assert_eq!(experience.len(), 2);
        assert!(experience[0].contains("Acme Corp"));
        assert!(experience[0].contains("Built Rust services"));
    }

    #[test]
    fn test_cv_result_is_degraded_and_complete() {
        let extractor = FallbackExtractor::new();
        let request = ParseRequest::new(SAMPLE_CV, DocumentKind::Cv);
        let result = extractor.extract(&request);

        assert!(result.is_degraded);
        assert!(result.confidence <= FALLBACK_CONFIDENCE);
        assert!(!result.parsing_notes.is_empty());

        // Every schema field must be present, populated or not
        for spec in FieldSchema::cv().fields() {
            assert!(
                result.fields.contains_key(&spec.name),
                "missing field {}",
                spec.name
            );
        }
    }

    #[test]
    fn test_job_line_classification() {
        let extractor = FallbackExtractor::new();
        let request = ParseRequest::new(SAMPLE_JD, DocumentKind::JobPosting);
        let result = extractor.extract(&request);

        assert_eq!(
            result.fields["job_title"].as_text(),
            Some("Senior Backend Engineer")
        );
        assert_eq!(result.fields["company_name"].as_text(), Some("Acme Corp"));
        assert_eq!(
            result.fields["location"].as_text(),
            Some("Berlin, Germany")
        );

        let skills = result.fields["required_skills"].as_list().unwrap();
        assert_eq!(skills.len(), 2);
        assert!(skills[0].contains("Rust or Go"));

        let responsibilities = result.fields["key_responsibilities"].as_list().unwrap();
        assert!(responsibilities[1].contains("Mentor"));

        let benefits = result.fields["benefits_package"].as_list().unwrap();
        assert_eq!(benefits, &["Remote-friendly".to_string()]);
    }

    #[test]
    fn test_job_section_header_word_forms() {
        let extractor = FallbackExtractor::new();
        let text = "\
Platform Engineer
Initech

Responsibilities:
- Operate the build farm

Duties:
- Carry the pager

Qualifications:
- Rust experience
";
        let request = ParseRequest::new(text, DocumentKind::JobPosting);
        let result = extractor.extract(&request);

        let responsibilities = result.fields["key_responsibilities"].as_list().unwrap();
        assert_eq!(
            responsibilities,
            &[
                "Operate the build farm".to_string(),
                "Carry the pager".to_string()
            ]
        );

        let skills = result.fields["required_skills"].as_list().unwrap();
        assert_eq!(skills, &["Rust experience".to_string()]);
    }

    #[test]
    fn test_job_without_sections_still_answers() {
        let extractor = FallbackExtractor::new();
        let request = ParseRequest::new("Just one line", DocumentKind::JobPosting);
        let result = extractor.extract(&request);

        assert_eq!(result.fields["job_title"].as_text(), Some("Just one line"));
        assert!(result.is_degraded);
        for spec in FieldSchema::job_posting().fields() {
            assert!(result.fields.contains_key(&spec.name));
        }
    }
}
