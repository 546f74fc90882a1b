//! Analyzer sets and profile-aware rule selection.

use crate::catalog::ALL_RULES;
use crate::{CommentAnalyzer, DocumentationAnalyzer, LineAnalyzer, NamingAnalyzer, SpacingAnalyzer};
use stylist_core::{AnalyzerBox, Config, Rule};

/// Returns every built-in analyzer with default options.
#[must_use]
pub fn all_analyzers() -> Vec<AnalyzerBox> {
    vec![
        Box::new(NamingAnalyzer::new()),
        Box::new(LineAnalyzer::new()),
        Box::new(SpacingAnalyzer::new()),
        Box::new(CommentAnalyzer::new()),
        Box::new(DocumentationAnalyzer::new()),
    ]
}

/// Returns every built-in analyzer with options read from `config`.
///
/// Which rules report is decided by the engine from the same
/// configuration; this only carries analyzer options such as the line
/// length limit.
#[must_use]
pub fn configured_analyzers(config: &Config) -> Vec<AnalyzerBox> {
    vec![
        Box::new(NamingAnalyzer::new()),
        Box::new(LineAnalyzer::from_config(config)),
        Box::new(SpacingAnalyzer::new()),
        Box::new(CommentAnalyzer::new()),
        Box::new(DocumentationAnalyzer::new()),
    ]
}

/// Catalog rules enabled under `config`, in catalog order.
#[must_use]
pub fn enabled_rules(config: &Config) -> Vec<&'static Rule> {
    ALL_RULES
        .iter()
        .copied()
        .filter(|rule| config.is_rule_enabled(rule))
        .collect()
}
