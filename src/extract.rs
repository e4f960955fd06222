//! Isolates a single JSON object from noisy model output.
//!
//! Backends wrap their JSON in markdown fences, surround it with prose, or
//! return it double-escaped through their own string quoting. This module
//! recovers the object text without parsing it; parsing belongs to
//! [`crate::parse`].

const FENCE: &str = "```";

/// Extracts the first brace-balanced JSON object from `text`.
///
/// Fence markers are stripped, then the object is located by depth-counted
/// brace matching. The scan is string-aware: braces inside double-quoted
/// string literals (with backslash escapes honored) do not affect the depth,
/// so nested objects and brace characters in string values are both handled.
/// A greedy regex match would over-capture across multiple top-level objects.
///
/// When no balanced object exists but an opener does, the tail from the first
/// `{` is returned so the parser's brace repair can finish a truncated
/// response. Returns an empty string only when no `{` appears at all.
pub fn extract_json(text: &str) -> String {
    let text = text.replace(FENCE, "");
    // Double-escaped payloads defeat string tracking (every quote arrives as
    // \"), so fall back to counting raw braces when the aware scan finds no
    // balanced object.
    let Some(candidate) = braced_object(&text)
        .or_else(|| braced_object_naive(&text))
        .or_else(|| truncated_tail(&text))
    else {
        return String::new();
    };

    // Up to two unescape passes recover output that the backend escaped
    // through its own quoting. A pass only runs when a backslash sits outside
    // every string literal, which valid JSON never has; failed passes are
    // skipped rather than aborting extraction.
    let mut candidate = candidate.to_string();
    for _ in 0..2 {
        if !has_stray_backslash(&candidate) {
            break;
        }
        match unescape(&candidate) {
            Some(unescaped) => candidate = unescaped,
            None => break,
        }
    }
    candidate.trim().to_string()
}

/// Locates the first `{` and its matching `}` by depth tracking.
fn braced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
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
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Depth counting over raw braces, blind to string literals.
fn braced_object_naive(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    for (i, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// A truncated object has an opener but no closer to match it. The tail is
/// handed onward as-is; the parser's repair step appends the missing braces.
fn truncated_tail(text: &str) -> Option<&str> {
    text.find('{').map(|start| text[start..].trim_end())
}

/// True when a backslash appears outside every string literal, the signature
/// of a double-escaped payload.
fn has_stray_backslash(text: &str) -> bool {
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
        } else if ch == '"' {
            in_string = true;
        } else if ch == '\\' {
            return true;
        }
    }
    false
}

/// Resolves one level of backslash escaping. Unknown escapes are kept
/// verbatim; a malformed `\u` sequence fails the whole pass.
fn unescape(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'u' => out.push(unescape_unicode(&mut chars)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}

/// Decodes a `\uXXXX` escape, consuming a trailing low surrogate when the
/// first unit is a high surrogate.
fn unescape_unicode(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let high = hex4(chars)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high);
    }
    if chars.next()? != '\\' || chars.next()? != 'u' {
        return None;
    }
    let low = hex4(chars)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
