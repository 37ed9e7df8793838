//! Escape transcoding between string-literal bodies and editable text.
//!
//! Extraction unescapes just enough to make the embedded document readable
//! (`\"`, `\\`, and optionally `\n`); write-back goes through the full JSON
//! string encoder so control characters are covered. The two directions are
//! intentionally not symmetric: real newlines introduced by the `\n`
//! expansion are re-escaped only as part of standard JSON string encoding.

use serde_json::Value;

/// Result of converting edited text back into a string-literal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBack {
    /// The escaped literal body, without surrounding quotes.
    pub body: String,
    /// Whether the edited text parsed as JSON. When false, the text was
    /// encoded as a plain string and the caller should warn the user.
    pub valid_json: bool,
}

/// Unescape a string-literal body into editable text.
///
/// One optional pair of surrounding quotes is stripped first, so callers
/// may pass the body either bare or quoted. If the unescaped text parses
/// as JSON it is pretty-printed (2-space indent, key order preserved);
/// otherwise it is returned as-is so the user can repair it in the
/// editable copy.
pub fn to_editable(body: &str, expand_newlines: bool) -> String {
    let unescaped = unescape(strip_quotes(body), expand_newlines);
    match serde_json::from_str::<Value>(&unescaped) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(unescaped),
        Err(_) => unescaped,
    }
}

/// Re-escape edited text into a string-literal body. Total: malformed JSON
/// degrades to an escaped plain string instead of failing the save.
pub fn to_literal(edited: &str) -> WriteBack {
    let trimmed = edited.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => WriteBack {
            body: encode_string_body(&value.to_string()),
            valid_json: true,
        },
        Err(_) => WriteBack {
            body: encode_string_body(trimmed),
            valid_json: false,
        },
    }
}

/// Strip one optional leading and one optional trailing `"`.
fn strip_quotes(body: &str) -> &str {
    let body = body.strip_prefix('"').unwrap_or(body);
    body.strip_suffix('"').unwrap_or(body)
}

/// Undo `\"` and `\\` (and `\n` when expanding) in one left-to-right pass.
/// Every other escape sequence passes through untouched.
fn unescape(body: &str, expand_newlines: bool) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') if expand_newlines => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            // trailing lone backslash, keep it
            None => out.push('\\'),
        }
    }
    out
}

/// JSON-string-encode `text` and strip the surrounding quotes.
fn encode_string_body(text: &str) -> String {
    let quoted = Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
