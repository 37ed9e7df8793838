//! Locating a JSON string literal in source text.
//!
//! Detection is deliberately narrow: only single-line, double-quoted
//! literals are recognized. A literal spanning multiple lines is never
//! matched; callers report "no target" instead of guessing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::position::{Position, Range};

// One JSON string literal on a single line: quote, then runs of
// non-quote/non-backslash characters or backslash-escape pairs, then quote.
static STRING_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap());

/// The substring chosen for editing and its span in the source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditTarget {
    /// Raw content between the quotes, still escaped.
    pub body: String,
    /// Span of the body in the source, quotes excluded.
    pub range: Range,
}

/// Find the string literal under the caret on a single line.
///
/// `line` is the 1-based line number of `line_text` in the buffer,
/// `caret_col` a 1-based byte column within it. Literals are scanned left
/// to right and the first one whose quoted span contains the caret wins;
/// a caret sitting exactly on either quote still counts as inside. Ties
/// between adjacent literals go to the leftmost.
pub fn locate_caret(line_text: &str, line: u32, caret_col: u32) -> Option<EditTarget> {
    let caret = (caret_col as usize).saturating_sub(1);

    for caps in STRING_LITERAL_RE.captures_iter(line_text) {
        let whole = caps.get(0)?;
        if caret < whole.start() || caret > whole.end() {
            continue;
        }
        let body = caps.get(1)?;
        return Some(EditTarget {
            body: body.as_str().to_string(),
            range: Range::new(
                Position::new(line, body.start() as u32 + 1),
                Position::new(line, body.end() as u32 + 1),
            ),
        });
    }
    None
}

/// Normalize an explicit selection into an edit target.
///
/// The selection may cover the bare content or include the surrounding
/// quotes; both yield the same target. The range is adjusted to match the
/// trimmed text.
pub fn locate_selection(selected: &str, range: Range) -> EditTarget {
    let mut body = selected;
    let mut range = range;

    if body.starts_with('"') {
        body = &body[1..];
        range.start.column += 1;
    }
    if body.ends_with('"') && range.end.column > 1 {
        body = &body[..body.len() - 1];
        range.end.column -= 1;
    }

    EditTarget {
        body: body.to_string(),
        range,
    }
}
