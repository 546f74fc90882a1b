//! Comment coverage and comment shape.
//!
//! # Rationale
//!
//! A method body reads as a sequence of paragraphs. Each blank-line
//! separated run of statements (a segment) opens with a comment saying what
//! it does, so the body can be skimmed by its comments alone.
//!
//! # Detected Patterns
//!
//! - A segment whose first statement is not directly preceded by a line
//!   comment (`CommentedSegments`)
//! - A comment block that follows code without an empty line in between
//!   (`NewlineBeforeComment`)
//! - A trailing comment not separated from code by exactly two spaces
//!   (`SpacesBeforeTrailingComment`)
//! - `//comment` without a space after the marker (`CommentStartsWithSpace`)
//!
//! A block holding a single one-line statement, and a closing segment made
//! of a lone `return` or `throw`, need no comment.

use stylist_core::utils::{group_segments, has_preceding_comment, Segment};
use stylist_core::{
    classify_comment, Analyzer, FileContext, Node, NodeKind, Rule, Span, SyntaxTree, TriviaKind,
    Violation,
};

use crate::catalog::{
    COMMENTED_SEGMENTS, COMMENT_STARTS_WITH_SPACE, NEWLINE_BEFORE_COMMENT,
    SPACES_BEFORE_TRAILING_COMMENT,
};

/// Analyzer name for comments.
pub const NAME: &str = "comment";

static RULES: &[&Rule] = &[
    &COMMENTED_SEGMENTS,
    &NEWLINE_BEFORE_COMMENT,
    &SPACES_BEFORE_TRAILING_COMMENT,
    &COMMENT_STARTS_WITH_SPACE,
];

const TRAILING_GAP: &str = "  ";

/// Checks comment placement inside blocks and the shape of line comments.
#[derive(Debug, Clone, Default)]
pub struct CommentAnalyzer;

impl CommentAnalyzer {
    /// Creates a new comment analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for CommentAnalyzer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn rules(&self) -> &'static [&'static Rule] {
        RULES
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut violations = Vec::new();
        for block in tree.nodes().filter(|n| n.kind() == NodeKind::Block) {
            check_block(ctx, block, &mut violations);
        }
        check_comment_text(ctx, tree, &mut violations);
        violations
    }
}

fn check_block(ctx: &FileContext, block: Node<'_>, violations: &mut Vec<Violation>) {
    let members: Vec<_> = block
        .children()
        .filter(|n| n.kind() != NodeKind::Directive)
        .collect();

    for member in &members {
        check_leading_comment_space(ctx, *member, violations);
        check_trailing_comment_space(ctx, *member, violations);
    }

    // A lone one-line statement explains itself.
    if let [only] = members.as_slice() {
        if only.start_line() == only.end_line() {
            return;
        }
    }

    let segments = group_segments(members.iter().copied(), |m| (m.start_line(), m.end_line()));
    let count = segments.len();
    for (index, segment) in segments.into_iter().enumerate() {
        if index + 1 == count && is_lone_exit(&segment) {
            continue;
        }
        if !has_preceding_comment(&segment.first.leading_trivia()) {
            violations.push(ctx.violation(
                &COMMENTED_SEGMENTS,
                segment.first.span().cover(segment.last.span()),
                &[],
            ));
        }
    }
}

/// A closing `return` or `throw` on its own.
fn is_lone_exit(segment: &Segment<Node<'_>>) -> bool {
    segment.len == 1 && matches!(segment.first.kind(), NodeKind::Return | NodeKind::Throw)
}

/// Comments that start a comment block need an empty line or an opening
/// brace above them.
fn check_leading_comment_space(ctx: &FileContext, member: Node<'_>, violations: &mut Vec<Violation>) {
    let mut previous_line: Option<usize> = None;
    for comment in member
        .leading_trivia()
        .into_iter()
        .filter(|t| t.kind == TriviaKind::SingleLineComment)
    {
        let line = ctx.lines.line_of(comment.span.start);
        let continues = previous_line.is_some_and(|p| p + 1 == line);
        previous_line = Some(line);
        if continues || line == 0 {
            continue;
        }

        let above = ctx.lines.line_text(ctx.content, line - 1).trim();
        if above != "{" && !above.is_empty() {
            violations.push(ctx.violation(&NEWLINE_BEFORE_COMMENT, comment.span, &[]));
        }
    }
}

fn check_trailing_comment_space(ctx: &FileContext, member: Node<'_>, violations: &mut Vec<Violation>) {
    let trailing = member.trailing_trivia();
    let violation = match trailing.as_slice() {
        [comment, ..] if comment.kind == TriviaKind::SingleLineComment => ctx.fixable_violation(
            &SPACES_BEFORE_TRAILING_COMMENT,
            comment.span,
            &[],
            Span::empty(comment.span.start),
            TRAILING_GAP,
        ),
        [gap, comment, ..]
            if gap.kind == TriviaKind::Whitespace
                && comment.kind == TriviaKind::SingleLineComment
                && gap.text(ctx.content) != TRAILING_GAP =>
        {
            ctx.fixable_violation(
                &SPACES_BEFORE_TRAILING_COMMENT,
                comment.span,
                &[],
                gap.span,
                TRAILING_GAP,
            )
        }
        _ => return,
    };
    violations.push(violation);
}

/// Every non-empty line comment has a space after its marker.
fn check_comment_text(ctx: &FileContext, tree: &SyntaxTree, violations: &mut Vec<Violation>) {
    for &span in tree.comments() {
        let text = tree.slice(span);
        if classify_comment(text) != TriviaKind::SingleLineComment {
            continue;
        }
        if text.as_bytes().get(2).is_some_and(|&b| b != b' ') {
            violations.push(ctx.fixable_violation(
                &COMMENT_STARTS_WITH_SPACE,
                span,
                &[],
                Span::empty(span.start + 2),
                " ",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use stylist_core::SourceParser;
    use stylist_csharp::CSharpParser;

    fn check_code(code: &str) -> Vec<Violation> {
        let tree = CSharpParser::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("Test.cs"), Path::new(""), &tree);
        CommentAnalyzer::new().check(&ctx, &tree)
    }

    /// Wraps statements into a method body starting on line 7.
    fn in_method(code: &str) -> String {
        format!("namespace Namespace\n{{\n\tclass Class\n\t{{\n\t\tvoid Method()\n\t\t{{\n{code}\n\t\t}}\n\t}}\n}}\n")
    }

    fn codes(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.rule.as_str()).collect()
    }

    #[test]
    fn test_uncommented_segment_spans_all_statements() {
        let code = in_method("\t\t\tint i = 0;\n\t\t\tint u = 0;");
        let violations = check_code(&code);
        assert_eq!(codes(&violations), vec!["CommentedSegments"]);
        let v = &violations[0];
        assert_eq!((v.location.line, v.location.column), (7, 4));
        assert_eq!(
            &code[v.location.offset..v.location.offset + v.location.length],
            "int i = 0;\n\t\t\tint u = 0;"
        );
    }

    #[test]
    fn test_comment_covers_segment() {
        let violations = check_code(&in_method("\t\t\t// Foo\n\t\t\tint i = 0;\n\t\t\tint u = 0;"));
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_each_segment_needs_a_comment() {
        let violations = check_code(&in_method(
            "\t\t\t// Foo\n\t\t\tint i = 0;\n\n\t\t\tint u = 0;\n\t\t\tint w = 0;",
        ));
        assert_eq!(codes(&violations), vec!["CommentedSegments"]);
        assert_eq!(violations[0].location.line, 10);
    }

    #[test]
    fn test_comment_separated_by_blank_line_does_not_count() {
        let violations = check_code(&in_method("\t\t\t// Foo\n\n\t\t\tint i = 0;\n\t\t\tint u = 0;"));
        assert_eq!(codes(&violations), vec!["CommentedSegments"]);
    }

    #[test]
    fn test_exemptions() {
        let violations = check_code(&in_method("\t\t\tFoo();"));
        assert!(violations.is_empty(), "{violations:?}");

        let violations = check_code(&in_method(
            "\t\t\t// Compute.\n\t\t\tint i = 0;\n\t\t\tFoo( i );\n\n\t\t\treturn;",
        ));
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_newline_before_comment() {
        let violations = check_code(&in_method(
            "\t\t\t// A\n\t\t\tint i = 0;\n\t\t\t// B\n\t\t\t// B continues\n\t\t\tint u = 0;",
        ));
        assert_eq!(codes(&violations), vec!["NewlineBeforeComment"]);
        assert_eq!(violations[0].location.line, 9);
    }

    #[test]
    fn test_trailing_comment_spacing() {
        let violations = check_code(&in_method(
            "\t\t\t// A\n\t\t\tint i = 0; // one\n\t\t\tint u = 0;// none\n\t\t\tint w = 0;  // two",
        ));
        assert_eq!(
            codes(&violations),
            vec!["SpacesBeforeTrailingComment", "SpacesBeforeTrailingComment"]
        );
        assert_eq!((violations[0].location.line, violations[0].location.column), (8, 15));
        assert_eq!((violations[1].location.line, violations[1].location.column), (9, 14));

        let fix = violations[0]
            .suggestion
            .as_ref()
            .and_then(|s| s.replacement.as_ref())
            .unwrap();
        assert_eq!(fix.new_text, "  ");
        assert_eq!(fix.location.length, 1);
    }

    #[test]
    fn test_comment_starts_with_space() {
        let violations = check_code("class A\n{\n\t//bad\n\t//\n\t/// <summary>Doc</summary>\n\tint x;\n}\n");
        assert_eq!(codes(&violations), vec!["CommentStartsWithSpace"]);
        assert_eq!(violations[0].location.line, 3);
        let fix = violations[0]
            .suggestion
            .as_ref()
            .and_then(|s| s.replacement.as_ref())
            .unwrap();
        assert_eq!((fix.location.column, fix.new_text.as_str()), (4, " "));
    }
}
