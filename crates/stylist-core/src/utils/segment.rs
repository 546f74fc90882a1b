//! Grouping of sibling statements into blank-line separated segments.

use crate::trivia::{count_line_breaks, Trivia, TriviaKind};

/// A maximal run of siblings with no blank line between consecutive members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<T> {
    /// First member.
    pub first: T,
    /// Last member.
    pub last: T,
    /// Number of members.
    pub len: usize,
}

enum State<T> {
    Empty,
    Building {
        segment: Segment<T>,
        end_line: usize,
    },
}

/// Partitions `members` into segments.
///
/// `lines` returns the (start, end) line of a member. A member joins the
/// running segment when it starts no later than the line after the
/// segment's current end.
pub fn group<T, I, F>(members: I, lines: F) -> Vec<Segment<T>>
where
    T: Copy,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> (usize, usize),
{
    let mut segments = Vec::new();
    let mut state = State::Empty;

    for member in members {
        let (start, end) = lines(&member);
        state = match state {
            State::Building {
                mut segment,
                end_line,
            } if start <= end_line + 1 => {
                segment.last = member;
                segment.len += 1;
                State::Building {
                    segment,
                    end_line: end,
                }
            }
            previous => {
                if let State::Building { segment, .. } = previous {
                    segments.push(segment);
                }
                State::Building {
                    segment: Segment {
                        first: member,
                        last: member,
                        len: 1,
                    },
                    end_line: end,
                }
            }
        };
    }

    if let State::Building { segment, .. } = state {
        segments.push(segment);
    }
    segments
}

/// Returns true if the last single-line comment in `leading` is separated
/// from the code after it by at most one line break.
#[must_use]
pub fn has_preceding_comment(leading: &[Trivia]) -> bool {
    leading
        .iter()
        .rposition(|t| t.kind == TriviaKind::SingleLineComment)
        .is_some_and(|last| count_line_breaks(&leading[last..]) <= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Span;

    fn trivia(kind: TriviaKind) -> Trivia {
        Trivia {
            kind,
            span: Span::empty(0),
        }
    }

    #[test]
    fn test_group_splits_on_blank_lines() {
        // (id, start, end)
        let members = [(0, 1, 1), (1, 2, 4), (2, 5, 5), (3, 7, 7), (4, 9, 9), (5, 10, 10)];
        let segments = group(members, |m| (m.1, m.2));
        let ids: Vec<_> = segments.iter().map(|s| (s.first.0, s.last.0, s.len)).collect();
        assert_eq!(ids, vec![(0, 2, 3), (3, 3, 1), (4, 5, 2)]);
    }

    #[test]
    fn test_group_partitions_every_member_once() {
        let members: Vec<(usize, usize)> = vec![(0, 0), (2, 3), (4, 4), (8, 9), (10, 10)];
        let segments = group(members.iter().copied(), |m| *m);
        let total: usize = segments.iter().map(|s| s.len).sum();
        assert_eq!(total, members.len());
        assert_eq!(segments.first().map(|s| s.first), Some((0, 0)));
        assert_eq!(segments.last().map(|s| s.last), Some((10, 10)));
    }

    #[test]
    fn test_group_empty() {
        let segments = group(Vec::<(usize, usize)>::new(), |m| *m);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_preceding_comment() {
        use TriviaKind::{EndOfLine, SingleLineComment, Whitespace};

        let attached = [trivia(Whitespace), trivia(SingleLineComment), trivia(EndOfLine), trivia(Whitespace)];
        assert!(has_preceding_comment(&attached));

        let detached = [trivia(SingleLineComment), trivia(EndOfLine), trivia(EndOfLine), trivia(Whitespace)];
        assert!(!has_preceding_comment(&detached));

        assert!(!has_preceding_comment(&[trivia(Whitespace)]));
        assert!(!has_preceding_comment(&[trivia(TriviaKind::DocComment), trivia(EndOfLine)]));
    }
}
