//! Tolerant parsing of extracted JSON candidates.

use crate::error::AttemptError;
use serde_json::Value;

/// Parses `candidate` into a generic JSON tree, repairing truncated output
/// where possible.
///
/// A strict parse is attempted first. On failure, the one repair heuristic is
/// to append the closing braces a truncated object is missing and retry once.
/// The repair is deliberately asymmetric: it never removes excess closers and
/// cannot mend interior corruption (such as a string cut mid-value), so those
/// inputs fail. All failures surface as [`AttemptError::Parse`], which the
/// retry loop recovers from.
pub fn parse_lenient(candidate: &str) -> Result<Value, AttemptError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(AttemptError::Parse("empty input".to_string()));
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            let missing = unclosed_braces(trimmed);
            if missing == 0 {
                return Err(AttemptError::Parse(strict_err.to_string()));
            }
            let repaired = format!("{}{}", trimmed, "}".repeat(missing));
            serde_json::from_str(&repaired).map_err(|e| AttemptError::Parse(e.to_string()))
        }
    }
}

/// Counts opening braces without a matching closer, ignoring braces inside
/// string literals. Excess closers clamp to zero rather than going negative.
fn unclosed_braces(text: &str) -> usize {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}
