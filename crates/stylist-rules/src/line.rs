//! Line layout: indentation, line width, line endings, brace and parameter
//! placement.
//!
//! # Rationale
//!
//! Code is read far more often than written. Tab indentation, a fixed line
//! width and predictable brace placement keep diffs small and let every
//! reader pick their own indent width.
//!
//! # Detected Patterns
//!
//! - Space indentation after any leading tabs
//! - Two or more trailing whitespace characters
//! - Lines wider than the limit, with tabs expanded to the tab width
//! - Line endings other than CRLF (one violation per file)
//! - Opening braces sharing a line with code, closing braces followed by
//!   anything but `)`, `;`, `,`, a `while` trailer or a line comment
//! - Continuation lines of a statement indented less than two levels deeper
//!   than its first line
//! - Parameters sharing a line, and multi-line parameter lists closing on
//!   the last parameter's line
//!
//! # Configuration
//!
//! In the `KeepLinesWithin120Characters` section:
//!
//! - `max_line_length`: Maximum display width (default: 120)
//! - `tab_width`: Columns per tab stop (default: 4)

use once_cell::sync::Lazy;
use regex::Regex;
use stylist_core::utils::{measure, text_width};
use stylist_core::{
    Analyzer, Config, FileContext, Field, Node, NodeKind, Rule, Span, SyntaxTree, TriviaKind,
    Violation,
};

use crate::catalog::{
    BRACES_ON_OWN_LINE, CLOSING_PAREN_ON_OWN_LINE, DOUBLE_TAB_CONTINUATION, INDENT_WITH_TABS,
    KEEP_LINES_WITHIN_LIMIT, NO_TRAILING_WHITESPACE, PARAMETERS_ON_OWN_LINES,
    USE_WINDOWS_LINE_ENDING,
};

/// Analyzer name for line layout.
pub const NAME: &str = "line";

/// Default maximum display width.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

/// Default tab stop width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

static RULES: &[&Rule] = &[
    &INDENT_WITH_TABS,
    &DOUBLE_TAB_CONTINUATION,
    &NO_TRAILING_WHITESPACE,
    &USE_WINDOWS_LINE_ENDING,
    &KEEP_LINES_WITHIN_LIMIT,
    &BRACES_ON_OWN_LINE,
    &PARAMETERS_ON_OWN_LINES,
    &CLOSING_PAREN_ON_OWN_LINE,
];

static SPACE_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\t*( +)").expect("valid space indent regex"));

static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\s+$").expect("valid trailing whitespace regex"));

static VALID_CLOSE_BRACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\}\s*($|[);,]|//|while\b)").expect("valid close brace regex")
});

static LEADING_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\t ]*").expect("valid indent regex"));

/// Checks the layout of lines, blocks and parameter lists.
#[derive(Debug, Clone)]
pub struct LineAnalyzer {
    max_line_length: usize,
    tab_width: usize,
}

impl Default for LineAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAnalyzer {
    /// Creates a new analyzer with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Creates an analyzer with limits read from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut analyzer = Self::new();
        if let Some(section) = config.rule_config(&KEEP_LINES_WITHIN_LIMIT) {
            if let Ok(max) = usize::try_from(section.get_int("max_line_length", 0)) {
                if max > 0 {
                    analyzer.max_line_length = max;
                }
            }
            if let Ok(width) = usize::try_from(section.get_int("tab_width", 0)) {
                if width > 0 {
                    analyzer.tab_width = width;
                }
            }
        }
        analyzer
    }

    /// Sets the maximum display width.
    #[must_use]
    pub fn max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Sets the tab stop width.
    #[must_use]
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.max(1);
        self
    }
}

impl Analyzer for LineAnalyzer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn rules(&self) -> &'static [&'static Rule] {
        RULES
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut visitor = LineVisitor {
            ctx,
            config: self,
            violations: Vec::new(),
        };
        visitor.check_lines();
        for node in tree.nodes() {
            match node.kind() {
                NodeKind::Block => visitor.check_block(node),
                NodeKind::Property => visitor.check_property(node),
                NodeKind::Method | NodeKind::Constructor | NodeKind::LocalFunction => {
                    visitor.check_parameters(node);
                }
                _ => {}
            }
        }
        visitor.violations
    }
}

struct LineVisitor<'a> {
    ctx: &'a FileContext<'a>,
    config: &'a LineAnalyzer,
    violations: Vec<Violation>,
}

impl<'a> LineVisitor<'a> {
    fn line_text(&self, line: usize) -> &'a str {
        self.ctx.lines.line_text(self.ctx.content, line)
    }

    fn check_lines(&mut self) {
        let ctx = self.ctx;
        let mut bad_endings = Vec::new();

        for line in 0..ctx.lines.line_count() {
            let span = ctx.lines.line_span(ctx.content, line);
            let text = self.line_text(line);

            let width = measure(text, self.config.max_line_length, self.config.tab_width);
            if let Some(threshold) = width.threshold {
                let offset = text
                    .char_indices()
                    .nth(threshold)
                    .map_or(text.len(), |(i, _)| i);
                let limit = self.config.max_line_length.to_string();
                self.violations.push(ctx.violation(
                    &KEEP_LINES_WITHIN_LIMIT,
                    Span::new(span.start + offset, span.end),
                    &[&limit],
                ));
            }

            if let Some(spaces) = SPACE_INDENT.captures(text).and_then(|c| c.get(1)) {
                let indent = Span::new(span.start + spaces.start(), span.start + spaces.end());
                let tabs = "\t".repeat(spaces.len().div_ceil(self.config.tab_width));
                self.violations.push(ctx.fixable_violation(
                    &INDENT_WITH_TABS,
                    indent,
                    &[],
                    indent,
                    tabs,
                ));
            }

            if let Some(trailing) = TRAILING_WHITESPACE.find(text) {
                let whitespace = Span::new(span.start + trailing.start(), span.end);
                self.violations.push(ctx.fixable_violation(
                    &NO_TRAILING_WHITESPACE,
                    whitespace,
                    &[],
                    whitespace,
                    "",
                ));
            }

            // The last line has no ending.
            let ending = ctx.lines.line_break(ctx.content, line);
            if !ending.is_empty() && ctx.content.get(ending.start..ending.end) != Some("\r\n") {
                bad_endings.push(ending);
            }
        }

        if let Some((&first, rest)) = bad_endings.split_first() {
            let additional = rest.iter().map(|span| ctx.location(*span)).collect();
            self.violations.push(
                ctx.fixable_violation(&USE_WINDOWS_LINE_ENDING, first, &[], first, "\r\n")
                    .with_additional_locations(additional),
            );
        }
    }

    fn check_block(&mut self, block: Node<'_>) {
        let owner = block.parent().unwrap_or(block);
        self.check_brace_lines(owner, block);

        for statement in block.children() {
            self.check_continuation(statement);
        }
    }

    fn check_property(&mut self, property: Node<'_>) {
        // Expression-bodied properties have no accessor list.
        let Some(accessors) = property
            .child_by_field(Field::Accessors)
            .or_else(|| property.first_child(NodeKind::AccessorList))
        else {
            return;
        };
        self.check_brace_lines(property, accessors);
    }

    /// Checks that the braces delimiting `body` sit on their own lines,
    /// unless the whole body shares a line with its owner's name.
    fn check_brace_lines(&mut self, owner: Node<'_>, body: Node<'_>) {
        let tree = body.tree();
        let (Some(open), Some(close)) = (body.first_token(), body.last_token()) else {
            return;
        };
        if tree.slice(open) != "{" || tree.slice(close) != "}" {
            return;
        }

        let lines = self.ctx.lines;
        // The name is a better anchor than the start, which may be an attribute.
        let owner_line = owner
            .name()
            .map_or_else(|| owner.start_line(), |name| name.start_line());
        let open_line = lines.line_of(open.start);
        let close_line = lines.line_of(close.start);
        if owner_line == open_line && open_line == close_line {
            return;
        }

        if self.line_text(open_line).trim() != "{" {
            self.violations
                .push(self.ctx.violation(&BRACES_ON_OWN_LINE, open, &[]));
        }
        if !VALID_CLOSE_BRACE.is_match(self.line_text(close_line)) {
            self.violations
                .push(self.ctx.violation(&BRACES_ON_OWN_LINE, close, &[]));
        }
    }

    /// Requires the second line of a multi-line statement to be indented
    /// two tab stops deeper than the first.
    fn check_continuation(&mut self, statement: Node<'_>) {
        if matches!(
            statement.kind(),
            NodeKind::If
                | NodeKind::Foreach
                | NodeKind::For
                | NodeKind::Do
                | NodeKind::Switch
                | NodeKind::While
                | NodeKind::Lock
                | NodeKind::Checked
                | NodeKind::Using
                | NodeKind::Block
                | NodeKind::Directive
        ) {
            return;
        }

        let leading = statement.leading_trivia();
        if leading.is_empty() {
            return;
        }

        let text = statement.text();
        let mut lines = text.split('\n');
        let (Some(first), Some(second)) = (lines.next(), lines.next()) else {
            return;
        };
        let second_trimmed = second.trim();
        if second_trimmed == "{" || second_trimmed.is_empty() {
            return;
        }

        // Indent of the statement's own line: whitespace after the last line break.
        let last_line_start = leading
            .iter()
            .rposition(|t| t.kind == TriviaKind::EndOfLine)
            .map_or(0, |i| i + 1);
        let first_indent = leading[last_line_start..]
            .iter()
            .find(|t| t.kind == TriviaKind::Whitespace)
            .map_or("", |t| t.text(self.ctx.content));

        let tab_width = self.config.tab_width;
        let second_indent = LEADING_INDENT.find(second).map_or("", |m| m.as_str());
        let expected = text_width(first_indent, tab_width) + 2 * tab_width;
        if text_width(second_indent, tab_width) < expected {
            let start = statement.span().start + first.len() + 1 + second_indent.len();
            self.violations.push(self.ctx.violation(
                &DOUBLE_TAB_CONTINUATION,
                Span::new(start, start + 1),
                &[],
            ));
        }
    }

    fn check_parameters(&mut self, declaration: Node<'_>) {
        let Some(list) = declaration
            .child_by_field(Field::Parameters)
            .or_else(|| declaration.first_child(NodeKind::ParameterList))
        else {
            return;
        };

        let mut previous_line = None;
        for parameter in list.children_of_kind(NodeKind::Parameter) {
            let line = parameter.start_line();
            if previous_line == Some(line) {
                let name = parameter.name_text().unwrap_or_else(|| parameter.text());
                self.violations.push(self.ctx.violation(
                    &PARAMETERS_ON_OWN_LINES,
                    parameter.span(),
                    &[name],
                ));
            }
            previous_line = Some(line);
        }

        let (Some(open), Some(close)) = (list.first_token(), list.last_token()) else {
            return;
        };
        let close_line = self.ctx.lines.line_of(close.start);
        if self.ctx.lines.line_of(open.start) != close_line && previous_line == Some(close_line) {
            self.violations
                .push(self.ctx.violation(&CLOSING_PAREN_ON_OWN_LINE, close, &[]));
        }
    }
}
