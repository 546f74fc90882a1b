//! Engine orchestrating parsing and analysis over a directory tree.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Analyzer, AnalyzerBox, Rule};
use crate::syntax::{SourceParser, SyntaxTree};
use crate::types::{LintResult, Violation};
use crate::utils::allowance::AllowIndex;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum EngineError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// A source file is not valid UTF-8.
    #[error("Cannot decode {path}: {message}")]
    Decode {
        /// Path to the undecodable file.
        path: PathBuf,
        /// Decoding error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// No parser was registered.
    #[error("No source parser configured")]
    MissingParser,

    /// Worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    root: Option<PathBuf>,
    parser: Option<Box<dyn SourceParser>>,
    analyzers: Vec<AnalyzerBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the source parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an analyzer.
    #[must_use]
    pub fn analyzer<A: Analyzer + 'static>(mut self, analyzer: A) -> Self {
        self.analyzers.push(Box::new(analyzer));
        self
    }

    /// Adds a boxed analyzer.
    #[must_use]
    pub fn analyzer_box(mut self, analyzer: AnalyzerBox) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    /// Adds multiple boxed analyzers.
    #[must_use]
    pub fn analyzers(mut self, analyzers: impl IntoIterator<Item = AnalyzerBox>) -> Self {
        self.analyzers.extend(analyzers);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, an exclude pattern is invalid
    /// or the current directory cannot be resolved.
    pub fn build(self) -> Result<Engine, EngineError> {
        let parser = self.parser.ok_or(EngineError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Config excludes already carry the bin/obj defaults.
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let compiled = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Engine {
            root,
            parser,
            analyzers: self.analyzers,
            exclude_patterns,
            compiled_excludes: compiled,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The engine that runs analyzers over source files.
///
/// Use [`Engine::builder()`] to construct an instance.
pub struct Engine {
    root: PathBuf,
    parser: Box<dyn SourceParser>,
    analyzers: Vec<AnalyzerBox>,
    exclude_patterns: Vec<String>,
    compiled_excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of enabled rules across all analyzers.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.analyzers
            .iter()
            .flat_map(|a| a.rules().iter())
            .filter(|r| self.config.is_rule_enabled(r))
            .count()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery, reading or the worker pool fails,
    /// or if a file fails to decode or parse while `fail_on_parse_error` is
    /// set.
    pub fn analyze(&self) -> Result<LintResult, EngineError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files();
        info!("Found {} files to analyze", files.len());

        let outcomes: Vec<Result<Vec<Violation>, EngineError>> =
            match self.config.analyzer.parallelism {
                Some(threads) => rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?
                    .install(|| files.par_iter().map(|f| self.analyze_file(f)).collect()),
                None => files.par_iter().map(|f| self.analyze_file(f)).collect(),
            };

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e @ (EngineError::Parse { .. } | EngineError::Decode { .. })) => {
                    warn!("Skipping file: {e}");
                    if self.fail_on_parse_error {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        sort_violations(&mut result.violations);

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes one in-memory source buffer as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to parse.
    pub fn check_source(&self, path: &Path, text: &str) -> Result<Vec<Violation>, EngineError> {
        let tree = self.parser.parse(text).map_err(|e| EngineError::Parse {
            path: path.to_path_buf(),
            message: e.message,
        })?;
        let mut violations = self.check_tree(path, &tree);
        sort_violations(&mut violations);
        Ok(violations)
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, EngineError> {
        debug!("Analyzing: {}", path.display());
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| EngineError::Decode {
            path: path.to_path_buf(),
            message: e.utf8_error().to_string(),
        })?;
        self.check_source(path, &content)
    }

    /// Runs every analyzer over a parsed file.
    fn check_tree(&self, path: &Path, tree: &SyntaxTree) -> Vec<Violation> {
        let ctx = FileContext::new(path, &self.root, tree);
        let allow = AllowIndex::new(ctx.content);
        let mut violations = Vec::new();

        for analyzer in &self.analyzers {
            let rules = analyzer.rules();
            if !rules.iter().any(|r| self.config.is_rule_enabled(r)) {
                debug!("Skipping disabled analyzer: {}", analyzer.name());
                continue;
            }

            for mut violation in analyzer.check(&ctx, tree) {
                let Some(rule) = find_rule(rules, &violation.code) else {
                    continue;
                };
                if !self.config.is_rule_enabled(rule) {
                    continue;
                }
                if let Some(severity) = self.config.rule_severity(rule) {
                    violation.severity = severity;
                }
                let allowed = allow.check(violation.location.line, rule);
                if allowed.is_allowed() {
                    debug!(
                        "Allowed {} at {}:{} ({})",
                        rule.id,
                        ctx.relative_path.display(),
                        violation.location.line,
                        allowed.reason().unwrap_or("no reason")
                    );
                    continue;
                }
                violations.push(violation);
            }
        }

        violations
    }

    /// Discovers all source files handled by the parser.
    fn discover_files(&self) -> Vec<PathBuf> {
        let extensions = self.parser.extensions();
        let walker = ignore::WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore)
            .parents(self.config.analyzer.respect_gitignore)
            .build();

        let mut files: Vec<PathBuf> = walker
            .flatten()
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            })
            .filter(|path| {
                let excluded = self.should_exclude(path);
                if excluded {
                    debug!("Excluding: {}", path.display());
                }
                !excluded
            })
            .collect();

        files.sort();
        files
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let candidates = [path.to_string_lossy(), relative.to_string_lossy()];

        for (pattern, compiled) in self.exclude_patterns.iter().zip(&self.compiled_excludes) {
            if candidates.iter().any(|c| compiled.matches(c)) {
                return true;
            }

            // Also check as substring for patterns like "**/bin/**"
            let normalized_pattern = pattern.replace("**", "");
            if normalized_pattern.len() > 1 && candidates.iter().any(|c| c.contains(&normalized_pattern))
            {
                return true;
            }
        }

        false
    }
}

fn find_rule<'r>(rules: &[&'r Rule], code: &str) -> Option<&'r Rule> {
    rules.iter().copied().find(|r| r.id == code)
}

fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.location.column.cmp(&b.location.column))
            .then(a.code.cmp(&b.code))
    });
}
