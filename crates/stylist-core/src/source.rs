//! Source text primitives: byte spans and line lookup.

/// Half-open byte range `[start, end)` into a file's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span. `end` is clamped so it never precedes `start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Creates an empty span at `offset`.
    #[must_use]
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both.
    #[must_use]
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Line start table for a text buffer.
///
/// Lines are split on `\n`; a preceding `\r` is treated as part of the
/// terminator. Line numbers and columns are 0-based. Columns count
/// characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines. An empty text has one (empty) line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Byte offset where `line` starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.starts.get(line).copied().unwrap_or(self.len)
    }

    /// Span of `line` including its terminator.
    #[must_use]
    pub fn full_line_span(&self, line: usize) -> Span {
        let start = self.line_start(line);
        let end = self.starts.get(line + 1).copied().unwrap_or(self.len);
        Span::new(start, end)
    }

    /// Span of `line` without its terminator.
    #[must_use]
    pub fn line_span(&self, text: &str, line: usize) -> Span {
        let full = self.full_line_span(line);
        let bytes = text.as_bytes();
        let mut end = full.end;
        if end > full.start && bytes.get(end - 1) == Some(&b'\n') {
            end -= 1;
            if end > full.start && bytes.get(end - 1) == Some(&b'\r') {
                end -= 1;
            }
        }
        Span::new(full.start, end)
    }

    /// Text of `line` without its terminator.
    #[must_use]
    pub fn line_text<'a>(&self, text: &'a str, line: usize) -> &'a str {
        let span = self.line_span(text, line);
        text.get(span.start..span.end).unwrap_or("")
    }

    /// Span of the terminator of `line`; empty for the last line.
    #[must_use]
    pub fn line_break(&self, text: &str, line: usize) -> Span {
        let content = self.line_span(text, line);
        let full = self.full_line_span(line);
        Span::new(content.end, full.end)
    }

    /// Resolves `offset` to a 0-based (line, character column) pair.
    #[must_use]
    pub fn position(&self, text: &str, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        let start = self.line_start(line);
        let column = text
            .get(start..offset.min(text.len()))
            .map_or(0, |prefix| prefix.chars().count());
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_lookup() {
        let text = "ab\ncd\r\nef";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(2), 0);
        assert_eq!(index.line_of(3), 1);
        assert_eq!(index.line_of(7), 2);
        assert_eq!(index.line_text(text, 1), "cd");
        assert_eq!(index.line_text(text, 2), "ef");
    }

    #[test]
    fn test_line_breaks() {
        let text = "ab\ncd\r\nef";
        let index = LineIndex::new(text);
        assert_eq!(index.line_break(text, 0), Span::new(2, 3));
        assert_eq!(index.line_break(text, 1), Span::new(5, 7));
        assert!(index.line_break(text, 2).is_empty());
    }

    #[test]
    fn test_position_counts_characters() {
        let text = "x\n\tä = 1;";
        let index = LineIndex::new(text);
        // 'ä' is two bytes; '=' sits at byte 6 but character column 3.
        assert_eq!(index.position(text, 6), (1, 3));
    }

    #[test]
    fn test_empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_of(0), 0);
    }
}
