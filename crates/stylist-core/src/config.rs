//! Configuration types for stylist.

use crate::rule::Rule;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Which rules are on when configuration says nothing about them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Every rule is enabled.
    #[default]
    Strict,
    /// Only rules enabled by default in the catalog.
    Lenient,
}

impl Profile {
    /// Returns true if this profile enables `rule`.
    #[must_use]
    pub fn enables(self, rule: &Rule) -> bool {
        match self {
            Self::Strict => true,
            Self::Lenient => rule.enabled_by_default,
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown profile '{other}'")),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// Top-level configuration for stylist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rule profile (default: strict).
    #[serde(default)]
    pub profile: Profile,

    /// Severity threshold for a failing run (default: "warning").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name or id.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Configuration section for `rule`, looked up by name, then id.
    #[must_use]
    pub fn rule_config(&self, rule: &Rule) -> Option<&RuleConfig> {
        self.rules
            .get(rule.name)
            .or_else(|| self.rules.get(rule.id))
    }

    /// Checks if a rule is enabled under this configuration.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &Rule) -> bool {
        self.rule_config(rule)
            .and_then(|c| c.enabled)
            .unwrap_or_else(|| self.profile.enables(rule))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule: &Rule) -> Option<Severity> {
        self.rule_config(rule).and_then(|c| c.severity)
    }

    /// Parsed `fail_on` threshold (default: warning).
    #[must_use]
    pub fn fail_on_severity(&self) -> Severity {
        self.fail_on
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Severity::Warning)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/bin/**".to_string(), "**/obj/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Category;

    const ON: Rule = Rule {
        id: "Stylist_On",
        name: "On",
        category: Category::Naming,
        title: "",
        message: "",
        enabled_by_default: true,
        fixable: false,
    };

    const OFF: Rule = Rule {
        id: "Stylist_Off",
        name: "Off",
        category: Category::Naming,
        title: "",
        message: "",
        enabled_by_default: false,
        fixable: false,
    };

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.profile, Profile::Strict);
        assert!(config.analyzer.respect_gitignore);
        assert_eq!(config.analyzer.exclude, vec!["**/bin/**", "**/obj/**"]);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on_severity(), Severity::Warning);
    }

    #[test]
    fn test_profiles() {
        let mut config = Config::default();
        assert!(config.is_rule_enabled(&OFF));
        config.profile = Profile::Lenient;
        assert!(config.is_rule_enabled(&ON));
        assert!(!config.is_rule_enabled(&OFF));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
profile = "lenient"
fail_on = "error"

[analyzer]
root = "./src"
exclude = ["**/Generated/**"]

[rules.Off]
enabled = true
severity = "error"

[rules.Stylist_On]
enabled = false
max_line_length = 100
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.profile, Profile::Lenient);
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.fail_on_severity(), Severity::Error);
        assert!(config.is_rule_enabled(&OFF));
        assert!(!config.is_rule_enabled(&ON));
        assert_eq!(config.rule_severity(&OFF), Some(Severity::Error));

        let rule_config = config.rule_config(&ON).unwrap();
        assert_eq!(rule_config.get_int("max_line_length", 120), 100);
    }

    #[test]
    fn test_parse_rejects_unknown_profile() {
        assert!(Config::parse("profile = \"loose\"").is_err());
    }
}
