use std::fmt;

/// A 1-based line/column location in a source text.
///
/// Columns count characters, not bytes, so a position points at the same
/// glyph an editor would highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Maps byte offsets of a source text to [`Position`]s.
///
/// The index records the byte offset at which every line starts, so a lookup
/// is a binary search followed by a character count within one line.
///
/// # Example
/// ```
/// use desiscript::util::position::{LineIndex, Position};
///
/// let index = LineIndex::new("rakho x = 1;\nchaap x;");
///
/// assert_eq!(index.position(0), Position::new(1, 1));
/// assert_eq!(index.position(19), Position::new(2, 7));
/// ```
pub struct LineIndex<'a> {
    source:      &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Builds the index for `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1))
                                            .collect();
        Self { source, line_starts }
    }

    /// Returns the position of the byte at `offset`.
    ///
    /// Offsets past the end of the text resolve to the position just after the
    /// last character.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source
                         .get(line_start..offset)
                         .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position::new(line, column + 1)
    }
}
