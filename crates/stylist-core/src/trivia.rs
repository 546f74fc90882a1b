//! Non-semantic text between tokens.

use crate::source::Span;

/// Classification of a trivia item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// Run of spaces and tabs.
    Whitespace,
    /// `\n` or `\r\n`.
    EndOfLine,
    /// `// ...` comment.
    SingleLineComment,
    /// `/// ...` or `/** ... */` documentation comment.
    DocComment,
    /// `/* ... */` comment.
    MultiLineComment,
    /// Anything else found between tokens.
    Skipped,
}

/// One trivia item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    /// Kind of the item.
    pub kind: TriviaKind,
    /// Location of the item.
    pub span: Span,
}

impl Trivia {
    /// Source text of the item.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }

    /// Returns true for any comment kind.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            TriviaKind::SingleLineComment | TriviaKind::DocComment | TriviaKind::MultiLineComment
        )
    }
}

/// Classifies comment text by its opening marker.
#[must_use]
pub fn classify_comment(text: &str) -> TriviaKind {
    if text.starts_with("///") && !text.starts_with("////") {
        TriviaKind::DocComment
    } else if text.starts_with("//") {
        TriviaKind::SingleLineComment
    } else if text.starts_with("/**") && !text.starts_with("/**/") {
        TriviaKind::DocComment
    } else {
        TriviaKind::MultiLineComment
    }
}

/// Splits the gap `span` of `text` into trivia. `comments` must be sorted.
#[must_use]
pub fn lex(text: &str, span: Span, comments: &[Span]) -> Vec<Trivia> {
    let bytes = text.as_bytes();
    let end = span.end.min(text.len());
    let mut items = Vec::new();
    let mut comment_idx = comments.partition_point(|c| c.start < span.start);
    let mut pos = span.start;

    while pos < end {
        while comments.get(comment_idx).is_some_and(|c| c.start < pos) {
            comment_idx += 1;
        }
        let next_comment = comments.get(comment_idx).filter(|c| c.start < end);
        if let Some(comment) = next_comment.filter(|c| c.start == pos) {
            let comment_span = Span::new(pos, comment.end.min(end));
            let kind = classify_comment(text.get(comment_span.start..comment_span.end).unwrap_or(""));
            items.push(Trivia {
                kind,
                span: comment_span,
            });
            pos = comment_span.end.max(pos + 1);
            comment_idx += 1;
            continue;
        }
        let stop = next_comment.map_or(end, |c| c.start);

        let (kind, len) = match bytes[pos] {
            b'\n' => (TriviaKind::EndOfLine, 1),
            b'\r' if bytes.get(pos + 1) == Some(&b'\n') => (TriviaKind::EndOfLine, 2),
            b' ' | b'\t' | b'\x0c' | b'\x0b' | b'\r' => {
                let run = bytes[pos..stop]
                    .iter()
                    .take_while(|&&b| {
                        matches!(b, b' ' | b'\t' | b'\x0c' | b'\x0b')
                            || b == b'\r'
                    })
                    .count();
                // A trailing `\r` belongs to the following `\r\n`.
                let run = if run > 1
                    && bytes[pos + run - 1] == b'\r'
                    && bytes.get(pos + run) == Some(&b'\n')
                {
                    run - 1
                } else {
                    run
                };
                (TriviaKind::Whitespace, run.max(1))
            }
            _ => {
                let run = bytes[pos..stop]
                    .iter()
                    .take_while(|&&b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
                    .count();
                (TriviaKind::Skipped, run.max(1))
            }
        };
        // Keep multi-byte characters intact.
        let mut next = (pos + len).min(end);
        while next < end && !text.is_char_boundary(next) {
            next += 1;
        }
        items.push(Trivia {
            kind,
            span: Span::new(pos, next),
        });
        pos = next;
    }
    items
}

/// Number of line breaks in `trivia`.
#[must_use]
pub fn count_line_breaks(trivia: &[Trivia]) -> usize {
    trivia
        .iter()
        .filter(|t| t.kind == TriviaKind::EndOfLine)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, comments: &[Span]) -> Vec<TriviaKind> {
        lex(text, Span::new(0, text.len()), comments)
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_classify_comment() {
        assert_eq!(classify_comment("// x"), TriviaKind::SingleLineComment);
        assert_eq!(classify_comment("/// x"), TriviaKind::DocComment);
        assert_eq!(classify_comment("//// x"), TriviaKind::SingleLineComment);
        assert_eq!(classify_comment("/** x */"), TriviaKind::DocComment);
        assert_eq!(classify_comment("/**/"), TriviaKind::MultiLineComment);
        assert_eq!(classify_comment("/* x */"), TriviaKind::MultiLineComment);
    }

    #[test]
    fn test_lex_mixed_gap() {
        let text = "\t// a\r\n  /// b\n";
        let comments = [Span::new(1, 5), Span::new(9, 14)];
        assert_eq!(
            kinds(text, &comments),
            vec![
                TriviaKind::Whitespace,
                TriviaKind::SingleLineComment,
                TriviaKind::EndOfLine,
                TriviaKind::Whitespace,
                TriviaKind::DocComment,
                TriviaKind::EndOfLine,
            ]
        );
        let items = lex(text, Span::new(0, text.len()), &comments);
        assert_eq!(items[2].span, Span::new(5, 7));
        assert_eq!(count_line_breaks(&items), 2);
    }

    #[test]
    fn test_lex_trailing_carriage_return_before_newline() {
        let text = "  \r\n";
        assert_eq!(
            kinds(text, &[]),
            vec![TriviaKind::Whitespace, TriviaKind::EndOfLine]
        );
    }

    #[test]
    fn test_lex_skipped_text() {
        let text = "#region Foo\n";
        assert_eq!(
            kinds(text, &[]),
            vec![
                TriviaKind::Skipped,
                TriviaKind::Whitespace,
                TriviaKind::Skipped,
                TriviaKind::EndOfLine
            ]
        );
    }
}
