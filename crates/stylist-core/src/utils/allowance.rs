//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // stylist: allow(KeepLinesWithin120Characters) reason="generated table"
//! ```
//!
//! A directive applies to its own line and to the line below it. Rules are
//! named by rule name or full id; `all` matches every rule.

use crate::rule::Rule;
use std::collections::{HashMap, HashSet};

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names or ids that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule: &Rule) -> bool {
        self.rules.contains("all") || self.rules.contains(rule.name) || self.rules.contains(rule.id)
    }
}

/// All directives of one file, keyed by 1-indexed line.
#[derive(Debug, Clone, Default)]
pub struct AllowIndex {
    directives: HashMap<usize, AllowDirective>,
}

impl AllowIndex {
    /// Scans `content` for directives.
    #[must_use]
    pub fn new(content: &str) -> Self {
        let directives = content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| parse_allow_directive(line).map(|d| (i + 1, d)))
            .collect();
        Self { directives }
    }

    /// Returns true if the file has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Checks whether `rule` is allowed on `line` (1-indexed).
    #[must_use]
    pub fn check(&self, line: usize, rule: &Rule) -> AllowCheck {
        [line.saturating_sub(1), line]
            .into_iter()
            .filter(|&l| l > 0)
            .filter_map(|l| self.directives.get(&l))
            .find(|d| d.covers(rule))
            .map_or(AllowCheck::Denied, |d| AllowCheck::Allowed {
                reason: d.reason.clone(),
            })
    }
}

/// Parses an allowance directive from a comment line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    // The directive may trail code on the same line.
    let comment_start = line.find("//")?;
    let comment_content = line[comment_start..].trim_start_matches('/').trim();

    let directive = comment_content.strip_prefix("stylist:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Category;

    const LONG_LINES: Rule = Rule {
        id: "Stylist_KeepLinesWithin120Characters",
        name: "KeepLinesWithin120Characters",
        category: Category::Newlines,
        title: "",
        message: "",
        enabled_by_default: true,
        fixable: false,
    };

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// stylist: allow(IndentWithTabs)").unwrap();
        assert!(directive.rules.contains("IndentWithTabs"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive("\t\tFoo(); // stylist: allow(all) reason=\"vendored\"").unwrap();
        assert!(directive.rules.contains("all"));
        assert_eq!(directive.reason, Some("vendored".to_string()));
    }

    #[test]
    fn test_parse_multiple_rules() {
        let directive = parse_allow_directive("// stylist: allow(rule1, rule2, rule3)").unwrap();
        assert_eq!(directive.rules.len(), 3);
        assert!(directive.rules.contains("rule2"));
    }

    #[test]
    fn test_non_directive_comments_are_ignored() {
        assert!(parse_allow_directive("// allow(IndentWithTabs)").is_none());
        assert!(parse_allow_directive("// stylist: allow()").is_none());
        assert!(parse_allow_directive("int x = 0;").is_none());
    }

    #[test]
    fn test_check_line_and_line_below() {
        let content = "class A\n{\n\t// stylist: allow(KeepLinesWithin120Characters) reason=\"table\"\n\tint x;\n\tint y;\n}";
        let index = AllowIndex::new(content);

        let result = index.check(4, &LONG_LINES);
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("table"));
        assert!(index.check(3, &LONG_LINES).is_allowed());
        assert!(!index.check(5, &LONG_LINES).is_allowed());
    }

    #[test]
    fn test_check_by_id() {
        let content = "// stylist: allow(Stylist_KeepLinesWithin120Characters)\nx";
        let index = AllowIndex::new(content);
        assert!(index.check(2, &LONG_LINES).is_allowed());
        assert!(!AllowIndex::new("x").check(1, &LONG_LINES).is_allowed());
    }
}
