//! Character-based source positions.
//!
//! Positions count Unicode scalar values, never bytes: `"é"` is one column
//! wide even though it takes two bytes in UTF-8.

use std::fmt;

/// A zero-based line/character position inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,      // Line number (0-based)
    pub character: u32, // Unicode scalar offset from the start of the line (0-based)
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A half-open `[start, end)` span between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// Builds a range that stays on a single line.
    pub const fn on_line(line: u32, start: u32, end: u32) -> Self {
        Range::new(Position::new(line, start), Position::new(line, end))
    }

    /// Returns true when `position` lies within the range, both ends included.
    ///
    /// Cursor queries treat the end as inclusive so that a caret placed right
    /// after the last character of a word still addresses that word.
    pub fn touches(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_line_then_character() {
        assert!(Position::new(0, 10) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }

    #[test]
    fn test_touches_includes_both_ends() {
        let range = Range::on_line(3, 2, 6);
        assert!(range.touches(Position::new(3, 2)));
        assert!(range.touches(Position::new(3, 6)));
        assert!(!range.touches(Position::new(3, 7)));
        assert!(!range.touches(Position::new(2, 4)));
    }

    #[test]
    fn test_touches_across_lines() {
        let range = Range::new(Position::new(1, 4), Position::new(3, 2));
        assert!(range.touches(Position::new(2, 100)));
        assert!(!range.touches(Position::new(1, 3)));
        assert!(!range.touches(Position::new(3, 3)));
    }

    #[test]
    fn test_display_is_one_indexed() {
        assert_eq!(Range::on_line(0, 0, 5).to_string(), "1:1-1:6");
    }
}
