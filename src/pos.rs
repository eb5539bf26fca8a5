//! Source positions for diagnostics

use std::fmt;
use std::sync::Arc;

/// A position in an input stream: file name plus 1-indexed line and column.
///
/// Positions are attached to entries, field values, and diagnostics so that
/// consumers can anchor messages long after parsing finished. Cloning is
/// cheap: the file name is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pos {
    file: Arc<str>,
    line: u32,
    column: u32,
}

impl Pos {
    /// Create a position from its parts.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The name of the input stream this position refers to.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number, 1-indexed.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Column number in characters, 1-indexed.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::new("<input>", 1, 1)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Maps byte offsets in one input stream to [`Pos`] values.
///
/// Line starts are collected once up front; each lookup is a binary search
/// plus a character count over the containing line.
pub(crate) struct SourceMap<'a> {
    file: Arc<str>,
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub(crate) fn new(file: impl Into<Arc<str>>, text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| i + 1));
        Self {
            file: file.into(),
            text,
            line_starts,
        }
    }

    /// Resolve a byte offset (which must lie on a character boundary).
    pub(crate) fn pos(&self, offset: usize) -> Pos {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.text[line_start..offset].chars().count() + 1;
        Pos {
            file: Arc::clone(&self.file),
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u32::try_from(column).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_to_positions() {
        let map = SourceMap::new("test.bib", "abc\ndef\n\nx");
        assert_eq!(map.pos(0), Pos::new("test.bib", 1, 1));
        assert_eq!(map.pos(2), Pos::new("test.bib", 1, 3));
        assert_eq!(map.pos(4), Pos::new("test.bib", 2, 1));
        assert_eq!(map.pos(8), Pos::new("test.bib", 3, 1));
        assert_eq!(map.pos(9), Pos::new("test.bib", 4, 1));
        assert_eq!(map.pos(10), Pos::new("test.bib", 4, 2));
    }

    #[test]
    fn test_columns_count_characters() {
        let map = SourceMap::new("test.bib", "Kö=");
        assert_eq!(map.pos(3).column(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pos::new("refs.bib", 12, 7).to_string(), "refs.bib:12:7");
    }
}
