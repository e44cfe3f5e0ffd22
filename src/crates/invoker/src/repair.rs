//! Response cleanup and JSON-repair heuristics.
//!
//! Models are asked for bare JSON and frequently answer with markdown
//! fences, prose around the object, or output truncated mid-structure.
//! Cleanup is deterministic string surgery: strip fences, slice to the
//! outermost object, then run a short ordered list of repair heuristics,
//! re-parsing after each. Each heuristic is an independent function so it
//! can be unit-tested against a known malformed sample.

use llm::{LlmError, Result};
use serde_json::Value;
use tracing::debug;

/// One named repair transformation.
struct Repair {
    name: &'static str,
    apply: fn(&str) -> String,
}

/// Heuristics in application order. String-level fixes run before
/// structural ones so bracket counting sees sane input.
const REPAIRS: &[Repair] = &[
    Repair {
        name: "escape_control_chars",
        apply: escape_control_chars,
    },
    Repair {
        name: "close_unterminated_string",
        apply: close_unterminated_string,
    },
    Repair {
        name: "remove_trailing_commas",
        apply: remove_trailing_commas,
    },
    Repair {
        name: "close_open_brackets",
        apply: close_open_brackets,
    },
];

/// Clean a raw model response and parse it as JSON, repairing if needed.
///
/// Returns the parsed value and whether repair was required. Responses
/// with no recognizable JSON object, or that survive every heuristic
/// unparsed, are `InvalidResponse` errors (malformed-response class).
pub fn parse_with_repair(raw: &str) -> Result<(Value, bool)> {
    let cleaned = strip_code_fences(raw);
    let candidate = slice_to_object(cleaned)
        .ok_or_else(|| LlmError::InvalidResponse("no JSON object in response".to_string()))?;

    if let Ok(value) = serde_json::from_str(candidate) {
        return Ok((value, false));
    }

    debug!(len = candidate.len(), "strict JSON parse failed, attempting repair");

    // Heuristics apply cumulatively; stop at the first parse success.
    let mut repaired = candidate.to_string();
    for repair in REPAIRS {
        repaired = (repair.apply)(&repaired);
        if let Ok(value) = serde_json::from_str(&repaired) {
            debug!(heuristic = repair.name, "JSON repair succeeded");
            return Ok((value, true));
        }
    }

    Err(LlmError::InvalidResponse(
        "irreparable JSON in model response".to_string(),
    ))
}

/// Strip a wrapping markdown code fence, tolerating a language tag and
/// surrounding prose.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        // Drop a language tag such as `json` on the fence line
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after[body_start..];

        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
        // Unterminated fence: take everything after it
        return body.trim();
    }

    trimmed
}

/// Slice to the outermost `{...}`. When the closing brace is missing
/// (truncated output), take everything from the opening brace so the
/// structural heuristics can finish the job.
pub fn slice_to_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text
        .rfind('}')
        .filter(|&e| e > start)
        .map(|e| e + 1)
        .unwrap_or(text.len());
    Some(text[start..end].trim())
}

/// Replace raw control characters inside string literals with spaces.
/// Models sometimes emit literal newlines mid-string, which strict JSON
/// rejects.
pub fn escape_control_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string && c.is_control() {
            // A backslash before the control char is a dangling escape
            // that would break the string on its own; drop it too
            if escaped {
                out.pop();
                escaped = false;
            }
            out.push(' ');
            continue;
        }
        out.push(c);

        match c {
            '\\' if in_string && !escaped => escaped = true,
            '"' if !escaped => in_string = !in_string,
            _ => escaped = false,
        }
        if c != '\\' {
            escaped = false;
        }
    }

    out
}

/// Close a string literal left open at end of input.
pub fn close_unterminated_string(input: &str) -> String {
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        match c {
            '\\' if in_string && !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => in_string = !in_string,
            _ => {}
        }
        escaped = false;
    }

    if in_string {
        let mut out = input.to_string();
        out.push('"');
        out
    } else {
        input.to_string()
    }
}

/// Remove commas that directly precede a closing brace or bracket, or
/// dangle at end of input.
pub fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    in_string = false;
                    escaped = false;
                }
                _ => escaped = false,
            }
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }

        if c == ',' {
            // Look past whitespace for a closer or end of input
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']') | None) {
                continue;
            }
        }

        out.push(c);
    }

    out
}

/// Append closers for any brackets or braces still open at end of input.
pub fn close_open_brackets(input: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    in_string = false;
                    escaped = false;
                }
                _ => escaped = false,
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }

    let mut out = input.trim_end().to_string();
    // A dangling comma before the appended closers would re-break the JSON
    if !stack.is_empty() && out.ends_with(',') {
        out.pop();
    }
    while let Some(closer) = stack.pop() {
        out.push(closer);
    }
    out
}
