//! Whitespace just inside brackets.
//!
//! Non-empty parameter lists, argument lists, initializers, accessor lists,
//! parenthesized expressions and the condition of `if`, `while`, `for`,
//! `foreach` and `do` keep a space after the opening and before the closing
//! bracket:
//!
//! ```csharp
//! Foo( a, b[ 0 ] );
//! if( ready ) { }
//! ```
//!
//! Empty pairs such as `()` are left alone.

use stylist_core::{Analyzer, FileContext, Node, NodeKind, Rule, Span, SyntaxTree, Violation};

use crate::catalog::SPACES_WITHIN_BRACKETS;

/// Analyzer name for bracket spacing.
pub const NAME: &str = "spacing";

static RULES: &[&Rule] = &[&SPACES_WITHIN_BRACKETS];

/// Checks the space within bracket pairs.
#[derive(Debug, Clone, Default)]
pub struct SpacingAnalyzer;

impl SpacingAnalyzer {
    /// Creates a new spacing analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for SpacingAnalyzer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn rules(&self) -> &'static [&'static Rule] {
        RULES
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut violations = Vec::new();
        for node in tree.nodes() {
            let pair = match node.kind() {
                NodeKind::AccessorList
                | NodeKind::ArgumentList
                | NodeKind::Initializer
                | NodeKind::AttributeArgumentList
                | NodeKind::BracketedArgumentList
                | NodeKind::ParameterList
                | NodeKind::ParenthesizedExpression => node.first_token().zip(node.last_token()),
                NodeKind::If | NodeKind::For | NodeKind::Foreach | NodeKind::While => {
                    leading_parens(tree, node)
                }
                NodeKind::Do => trailing_parens(tree, node),
                _ => None,
            };
            if let Some((open, close)) = pair {
                check_pair(ctx, open, close, &mut violations);
            }
        }
        violations
    }
}

fn check_pair(ctx: &FileContext, open: Span, close: Span, violations: &mut Vec<Violation>) {
    if open.end >= close.start {
        return;
    }
    let Some(kind) = bracket_name(ctx.content.get(open.start..open.end).unwrap_or("")) else {
        return;
    };

    if let Some(c) = ctx.content[open.end..].chars().next().filter(|c| !c.is_whitespace()) {
        violations.push(ctx.fixable_violation(
            &SPACES_WITHIN_BRACKETS,
            Span::new(open.end, open.end + c.len_utf8()),
            &[kind],
            Span::empty(open.end),
            " ",
        ));
    }
    if let Some(c) = ctx.content[..close.start].chars().next_back().filter(|c| !c.is_whitespace()) {
        violations.push(ctx.fixable_violation(
            &SPACES_WITHIN_BRACKETS,
            Span::new(close.start - c.len_utf8(), close.start),
            &[kind],
            Span::empty(close.start),
            " ",
        ));
    }
}

fn bracket_name(open: &str) -> Option<&'static str> {
    match open {
        "{" => Some("brace"),
        "[" => Some("bracket"),
        "(" => Some("parenthesis"),
        _ => None,
    }
}

/// The first parenthesis of a statement and its match.
fn leading_parens(tree: &SyntaxTree, node: Node<'_>) -> Option<(Span, Span)> {
    let tokens = node.tokens();
    let open = tokens.iter().position(|&t| tree.slice(t) == "(")?;
    let mut depth = 0usize;
    for (i, &token) in tokens.iter().enumerate().skip(open) {
        match tree.slice(token) {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return Some((tokens[open], tokens[i]));
                }
            }
            _ => {}
        }
    }
    None
}

/// The condition parentheses closing a `do` statement.
fn trailing_parens(tree: &SyntaxTree, node: Node<'_>) -> Option<(Span, Span)> {
    let tokens = node.tokens();
    let close = tokens.iter().rposition(|&t| tree.slice(t) == ")")?;
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match tree.slice(tokens[i]) {
            ")" => depth += 1,
            "(" => {
                depth -= 1;
                if depth == 0 {
                    return Some((tokens[i], tokens[close]));
                }
            }
            _ => {}
        }
    }
    None
}
