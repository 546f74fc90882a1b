//! Context types for analyzer execution.

use crate::rule::Rule;
use crate::source::{LineIndex, Span};
use crate::syntax::SyntaxTree;
use crate::types::{Location, Replacement, Suggestion, Violation};
use std::path::{Path, PathBuf};

/// Context provided to analyzers for one file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// File name without extension (e.g., `Foo` for `src/Foo.cs`).
    pub file_stem: String,
    /// Line table of `content`.
    pub lines: &'a LineIndex,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context over a parsed tree.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path, tree: &'a SyntaxTree) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let file_stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            content: tree.text(),
            relative_path,
            file_stem,
            lines: tree.lines(),
        }
    }

    /// Resolves a span to a 1-indexed location.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        let (line, column) = self.lines.position(self.content, span.start);
        Location::new(self.relative_path.clone(), line + 1, column + 1)
            .with_span(span.start, span.len())
    }

    /// Creates a violation of `rule` at `span`.
    #[must_use]
    pub fn violation(&self, rule: &Rule, span: Span, args: &[&str]) -> Violation {
        Violation::from_rule(
            rule,
            self.location(span),
            args.iter().map(ToString::to_string).collect(),
        )
    }

    /// Creates a violation of `rule` at `span` whose fix replaces `fix_span`
    /// with `new_text`.
    #[must_use]
    pub fn fixable_violation(
        &self,
        rule: &Rule,
        span: Span,
        args: &[&str],
        fix_span: Span,
        new_text: impl Into<String>,
    ) -> Violation {
        let replacement = Replacement::new(self.location(fix_span), new_text);
        self.violation(rule, span, args)
            .with_suggestion(Suggestion::with_fix(rule.title, replacement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Category;
    use crate::syntax::TreeBuilder;

    const RULE: Rule = Rule {
        id: "Stylist_Test",
        name: "Test",
        category: Category::Spacing,
        title: "Test rule",
        message: "Found '{0}'",
        enabled_by_default: true,
        fixable: true,
    };

    #[test]
    fn test_relative_path_and_stem() {
        let tree = TreeBuilder::new().finish("");
        let path = Path::new("/repo/src/Foo.cs");
        let ctx = FileContext::new(path, Path::new("/repo"), &tree);
        assert_eq!(ctx.relative_path, PathBuf::from("src/Foo.cs"));
        assert_eq!(ctx.file_stem, "Foo");
    }

    #[test]
    fn test_location_is_one_indexed() {
        let tree = TreeBuilder::new().finish("line1\nline2\nline3");
        let ctx = FileContext::new(Path::new("a.cs"), Path::new(""), &tree);
        let loc = ctx.location(Span::new(8, 10));
        assert_eq!((loc.line, loc.column), (2, 3));
        assert_eq!((loc.offset, loc.length), (8, 2));
    }

    #[test]
    fn test_fixable_violation_carries_replacement() {
        let tree = TreeBuilder::new().finish("a  \n");
        let ctx = FileContext::new(Path::new("a.cs"), Path::new(""), &tree);
        let v = ctx.fixable_violation(&RULE, Span::new(1, 3), &["x"], Span::new(1, 3), "");
        assert_eq!(v.message, "Found 'x'");
        let fix = v.suggestion.and_then(|s| s.replacement).unwrap();
        assert_eq!(fix.new_text, "");
        assert_eq!(fix.location.column, 2);
    }
}
