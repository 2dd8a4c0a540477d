//! Source positions and ranges.
//!
//! Positions use 1-based lines and 1-based UTF-8 byte columns. A
//! [`SourceRange`] is inclusive on both ends: `end` addresses the last
//! byte that belongs to the node.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Byte column within the line (1-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The source extent of a node, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    /// First byte of the node.
    pub start: Position,
    /// Last byte of the node.
    pub end: Position,
}

impl SourceRange {
    /// Creates a new range.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns true if the range is usable: both ends are 1-based and the
    /// end does not precede the start.
    ///
    /// Ranges failing this check come from a parser bug. Renderers skip
    /// such nodes instead of emitting corrupt markup.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start.line >= 1 && self.start.column >= 1 && self.end.line >= 1 && self.start <= self.end
    }

    /// Returns true if `line` falls within this range.
    #[inline]
    pub const fn contains_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Number of source lines covered by the range.
    #[inline]
    pub const fn line_count(&self) -> u32 {
        if self.end.line < self.start.line {
            0
        } else {
            self.end.line - self.start.line + 1
        }
    }
}
