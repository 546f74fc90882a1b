//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "stylist.toml";

const DEFAULT_CONFIG: &str = r#"# stylist configuration

# "strict" enables every rule, "lenient" only the rules on by default
profile = "strict"

# Exit with status 1 when violations at or above this severity exist
fail_on = "warning"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/bin/**",
    "**/obj/**",
]

# Respect .gitignore files
respect_gitignore = true

# Cap on files analyzed in parallel
# parallelism = 4

# Rule configurations, keyed by rule name or full id.
# Each rule can be enabled/disabled and have its severity overridden.

[rules.KeepLinesWithin120Characters]
max_line_length = 120
tab_width = 4

# [rules.UseWindowsLineEnding]
# enabled = false

# [rules.XmlDocumentEverythingWithSummary]
# severity = "info"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);
    write_config(config_path, force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: stylist check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylist_core::{Config, Profile};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.profile, Profile::Strict);
        assert_eq!(config.analyzer.exclude.len(), 2);
        let section = config.rules.get("KeepLinesWithin120Characters").unwrap();
        assert_eq!(section.get_int("max_line_length", 0), 120);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "profile = \"lenient\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "profile = \"lenient\"\n"
        );

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
