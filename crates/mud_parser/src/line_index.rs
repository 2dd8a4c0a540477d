//! Byte offset to line/column mapping.

use mud_ast::{Position, SourceRange};

/// Maps byte offsets in a source text to 1-based line and byte-column
/// positions.
///
/// Built once per parse; lookups are a binary search over line starts.
///
/// # Example
///
/// ```rust
/// use mud_ast::Position;
/// use mud_parser::LineIndex;
///
/// let index = LineIndex::new("ab\ncd\n");
/// assert_eq!(index.position(0), Position::new(1, 1));
/// assert_eq!(index.position(4), Position::new(2, 2));
/// assert_eq!(index.line_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first byte of each line.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Indexes the line starts of `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Number of lines, counting the (possibly empty) line after a final
    /// newline.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the given 1-based line starts.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let idx = (line as usize).checked_sub(1)?;
        self.line_starts.get(idx).copied()
    }

    /// Converts a byte offset into a 1-based position. Offsets past the end
    /// clamp to the end of the text.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let column = offset - self.line_starts[idx] + 1;
        Position::new(to_u32(idx + 1), to_u32(column))
    }

    /// Converts a half-open byte span into an inclusive range.
    ///
    /// The end addresses the last byte of the span; an empty span collapses
    /// onto its start.
    pub fn range(&self, start: usize, end: usize) -> SourceRange {
        let last = end.saturating_sub(1).max(start);
        SourceRange::new(self.position(start), self.position(last))
    }
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
