//! Source location spans.
//!
//! A span records the byte range of a syntax element together with the
//! 1-based line and column of its first character, so errors raised long
//! after lexing (binding, execution) can still report `[Ln:L Col:C]`
//! without access to the source text.

use std::fmt;

/// Line and column of a character, both 1-based.
///
/// Columns count characters, not bytes, so identifiers written in
/// non-Latin scripts report the column an editor would show.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Ln:{} Col:{}]", self.line, self.col)
    }
}

/// Source location span.
///
/// - `start`/`end`: byte offsets (end exclusive)
/// - `line`/`col`: position of `start`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub col: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        col: 0,
    };

    /// Create a span with a known start position.
    #[inline]
    pub const fn new(start: u32, end: u32, pos: Position) -> Self {
        Span {
            start,
            end,
            line: pos.line,
            col: pos.col,
        }
    }

    /// Position of the first character.
    #[inline]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one covering both.
    ///
    /// The position is taken from whichever span starts first.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        let (first, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            col: first.col,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}@{}:{}", self.start, self.end, self.line, self.col)
    }
}

/// Byte-offset to line/column lookup table for one source text.
#[derive(Clone, Debug)]
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offset at which each line starts. Always contains `0`.
    line_starts: Vec<u32>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(to_u32(offset + 1));
            }
        }
        LineIndex {
            source,
            line_starts,
        }
    }

    /// Position of the character starting at `offset`.
    pub fn position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let end = (offset as usize).min(self.source.len());
        let col = self
            .source
            .get(line_start..end)
            .map_or(end - line_start, |text| text.chars().count());
        Position::new(to_u32(line + 1), to_u32(col + 1))
    }

    /// Build a span for a byte range of this source.
    pub fn span(&self, range: std::ops::Range<usize>) -> Span {
        let start = to_u32(range.start);
        Span::new(start, to_u32(range.end), self.position(start))
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Saturating conversion for offsets; sources beyond 4 GiB clamp.
#[inline]
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
