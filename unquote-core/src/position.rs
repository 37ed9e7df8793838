//! Line/column positions and byte-offset conversion.
//!
//! Positions are 1-based. Column values are byte offsets within the line
//! (1-based), so they stay valid for splicing regardless of the characters
//! on the line.

use std::fmt;

use serde::Serialize;

/// A 1-based line:column position in a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A start/end position pair, exclusive on the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// A collapsed range has nothing selected.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parse a "line:col" position string
pub fn parse_position(pos: &str) -> Option<Position> {
    let parts: Vec<&str> = pos.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let line = parts[0].parse::<u32>().ok()?;
    let column = parts[1].parse::<u32>().ok()?;
    Some(Position::new(line, column))
}

/// Parse a "line:col-line:col" range string
pub fn parse_range(range: &str) -> Option<Range> {
    let (start, end) = range.split_once('-')?;
    Some(Range::new(parse_position(start)?, parse_position(end)?))
}

/// Convert a 1-based line:column position to a byte offset in `source`.
///
/// Returns `None` if the position is out of bounds. An offset equal to
/// `source.len()` (one past the last byte) is in bounds.
pub fn position_to_offset(source: &str, pos: Position) -> Option<usize> {
    if pos.line == 0 || pos.column == 0 {
        return None;
    }
    let col_offset = (pos.column as usize) - 1;

    let mut current_line = 1u32;
    let mut line_start = 0usize;

    if current_line != pos.line {
        let mut found = false;
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                current_line += 1;
                if current_line == pos.line {
                    line_start = i + 1;
                    found = true;
                    break;
                }
            }
        }
        if !found {
            return None;
        }
    }

    let offset = line_start + col_offset;
    if offset <= source.len() {
        Some(offset)
    } else {
        None
    }
}

/// Resolve a range to a byte span within `source`.
///
/// Returns `None` when either end is out of bounds or the range is
/// inverted.
pub fn resolve_span(source: &str, range: Range) -> Option<(usize, usize)> {
    let start = position_to_offset(source, range.start)?;
    let end = position_to_offset(source, range.end)?;
    if start <= end {
        Some((start, end))
    } else {
        None
    }
}
