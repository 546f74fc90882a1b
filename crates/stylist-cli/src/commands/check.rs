//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use stylist_core::{Config, Engine, Profile};
use stylist_csharp::CSharpParser;
use stylist_rules::catalog::{self, ALL_RULES};
use stylist_rules::configured_analyzers;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `stylist check`.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or ids to restrict the run to.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Profile overriding the configuration file.
    pub profile: Option<Profile>,
}

/// Runs the check command.
///
/// Returns `true` when violations at or above the `fail_on` threshold
/// were found.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let mut config = source.load()?;
    if let Some(profile) = options.profile {
        config.profile = profile;
    }
    if let Some(filter) = &options.rules {
        restrict_rules(&mut config, filter);
    }
    let fail_on = config.fail_on_severity();
    let profile = config.profile;

    let engine = Engine::builder()
        .root(path)
        .parser(CSharpParser::new())
        .analyzers(configured_analyzers(&config))
        .excludes(options.exclude.iter().cloned())
        .config(config)
        .build()
        .context("Failed to build engine")?;

    tracing::info!(
        "Analyzing {} with {} rules ({profile} profile)",
        path.display(),
        engine.rule_count()
    );

    let result = engine.analyze().context("Analysis failed")?;
    super::output::print(&result, options.format, engine.root())?;

    Ok(result.has_violations_at(fail_on))
}

/// Enables exactly the rules named in `filter`, leaving other settings of
/// their configuration sections untouched.
fn restrict_rules(config: &mut Config, filter: &str) {
    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    for name in &wanted {
        if catalog::find(name).is_none() {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    for rule in ALL_RULES {
        // Keep editing the section the user wrote, if any.
        let key = if config.rules.contains_key(rule.id) && !config.rules.contains_key(rule.name) {
            rule.id
        } else {
            rule.name
        };
        config.rules.entry(key.to_string()).or_default().enabled =
            Some(wanted.iter().any(|name| rule.matches(name)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stylist_rules::enabled_rules;
    use tempfile::TempDir;

    #[test]
    fn rules_filter_enables_only_listed_rules() {
        let mut config = Config::parse(
            r#"
[rules.Stylist_IndentWithTabs]
severity = "error"
"#,
        )
        .unwrap();
        restrict_rules(&mut config, "IndentWithTabs, Stylist_CommentedSegments,NoSuchRule");

        let names: Vec<_> = enabled_rules(&config).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["IndentWithTabs", "CommentedSegments"]);

        let tabs = catalog::find("IndentWithTabs").unwrap();
        assert_eq!(
            config.rule_severity(tabs),
            Some(stylist_core::Severity::Error)
        );
    }

    #[test]
    fn run_reports_failure_at_threshold() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Test.cs"), "class Test\r\n{\r\n    int x;\r\n}\r\n").unwrap();

        let options = CheckOptions {
            format: OutputFormat::Compact,
            rules: Some("IndentWithTabs".to_string()),
            ..CheckOptions::default()
        };
        assert!(run(dir.path(), &options, &ConfigSource::Default).unwrap());

        fs::write(dir.path().join("Test.cs"), "class Test\r\n{\r\n\tint x;\r\n}\r\n").unwrap();
        assert!(!run(dir.path(), &options, &ConfigSource::Default).unwrap());
    }

    #[test]
    fn fail_on_error_ignores_warnings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Test.cs"), "class Test\r\n{\r\n    int x;\r\n}\r\n").unwrap();
        let config = dir.path().join("stylist.toml");
        fs::write(&config, "fail_on = \"error\"\n").unwrap();

        let options = CheckOptions {
            format: OutputFormat::Compact,
            rules: Some("IndentWithTabs".to_string()),
            ..CheckOptions::default()
        };
        let failed = run(dir.path(), &options, &ConfigSource::Explicit(config)).unwrap();
        assert!(!failed);
    }
}
