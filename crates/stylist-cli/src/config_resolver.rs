//! Locating and loading `stylist.toml`.
//!
//! Lookup order:
//!
//! 1. `--config` flag or `$STYLIST_CONFIG`
//! 2. `stylist.toml` or `.stylist.toml` in the checked directory or the
//!    nearest ancestor holding one
//! 3. `config.toml` in `$STYLIST_CONFIG_DIR`, else in `~/.stylist/`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use stylist_core::Config;

/// Project-level config file names, checked in order within a directory.
const PROJECT_CONFIG_NAMES: &[&str] = &["stylist.toml", ".stylist.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line.
    Explicit(PathBuf),
    /// Found next to the sources.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration this source points at.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the configuration for checking `target`.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(target, explicit, global_config_dir())
}

fn resolve_in(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = find_project_config(target) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Walks from `target` up to the filesystem root.
fn find_project_config(target: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(target).unwrap_or_else(|_| target.to_path_buf());
    let start = if absolute.is_file() {
        absolute.parent()?.to_path_buf()
    } else {
        absolute
    };

    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// User-wide config directory: `$STYLIST_CONFIG_DIR`, else `~/.stylist/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("STYLIST_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".stylist"))
}
