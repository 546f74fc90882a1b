//! Rule records and the analyzer trait.

use crate::context::FileContext;
use crate::syntax::SyntaxTree;
use crate::types::Violation;
use serde::{Deserialize, Serialize};

/// Rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Identifier naming conventions.
    Naming,
    /// Indentation.
    Indent,
    /// Whitespace inside lines.
    Spacing,
    /// Line breaks and line layout.
    Newlines,
    /// Comment placement and shape.
    Comments,
    /// XML documentation.
    Documentation,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Naming => "Naming",
            Self::Indent => "Indent",
            Self::Spacing => "Spacing",
            Self::Newlines => "Newlines",
            Self::Comments => "Comments",
            Self::Documentation => "Documentation",
        };
        f.write_str(name)
    }
}

/// Static description of a style rule.
///
/// The `id` is the stable identifier that configuration, allow directives and
/// tooling bind against.
#[derive(Debug, PartialEq, Eq)]
pub struct Rule {
    /// Stable identifier (e.g., `Stylist_IndentWithTabs`).
    pub id: &'static str,
    /// Rule name without namespace (e.g., `IndentWithTabs`).
    pub name: &'static str,
    /// Category.
    pub category: Category,
    /// Short title.
    pub title: &'static str,
    /// Message template with `{0}`, `{1}` placeholders.
    pub message: &'static str,
    /// Whether the lenient profile enables this rule.
    pub enabled_by_default: bool,
    /// Whether violations carry an automatic fix.
    pub fixable: bool,
}

impl Rule {
    /// Substitutes `args` into the message template.
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> String {
        args.iter()
            .enumerate()
            .fold(self.message.to_string(), |message, (i, arg)| {
                message.replace(&format!("{{{i}}}"), arg.as_ref())
            })
    }

    /// Returns true if `key` is this rule's name or id.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        key == self.name || key == self.id
    }
}

/// A per-file analyzer over the syntax tree.
///
/// Analyzers are pure: each call to [`Analyzer::check`] depends only on the
/// file context and tree it receives.
///
/// # Example
///
/// ```ignore
/// use stylist_core::{Analyzer, FileContext, Rule, SyntaxTree, Violation};
///
/// pub struct NoTabs;
///
/// impl Analyzer for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn rules(&self) -> &'static [&'static Rule] { &[&NO_TABS] }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
///         tree.tokens()
///             .iter()
///             .filter(|span| tree.slice(**span).contains('\t'))
///             .map(|span| ctx.violation(&NO_TABS, *span, &[]))
///             .collect()
///     }
/// }
/// ```
pub trait Analyzer: Send + Sync {
    /// Kebab-case name of this analyzer.
    fn name(&self) -> &'static str;

    /// Rules this analyzer can report.
    fn rules(&self) -> &'static [&'static Rule];

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation>;
}

/// Type alias for boxed Analyzer trait objects.
pub type AnalyzerBox = Box<dyn Analyzer>;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Rule = Rule {
        id: "Stylist_Sample",
        name: "Sample",
        category: Category::Naming,
        title: "Sample rule",
        message: "The {0} '{1}' is wrong",
        enabled_by_default: true,
        fixable: false,
    };

    #[test]
    fn test_render_substitutes_args() {
        assert_eq!(
            SAMPLE.render(&["class", "foo"]),
            "The class 'foo' is wrong"
        );
    }

    #[test]
    fn test_render_keeps_missing_placeholders() {
        assert_eq!(SAMPLE.render::<&str>(&[]), "The {0} '{1}' is wrong");
    }

    #[test]
    fn test_matches_name_or_id() {
        assert!(SAMPLE.matches("Sample"));
        assert!(SAMPLE.matches("Stylist_Sample"));
        assert!(!SAMPLE.matches("Other"));
    }
}
