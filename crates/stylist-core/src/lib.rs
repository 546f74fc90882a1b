//! # stylist-core
//!
//! Core framework for source-style linting over a language-neutral syntax
//! tree.
//!
//! This crate provides the foundational types for building style analyzers:
//!
//! - [`SyntaxTree`] and [`TreeBuilder`], the boundary a host parser lowers into
//! - [`Trivia`] derived from the gaps between tokens
//! - [`Rule`] records and the [`Analyzer`] trait
//! - [`Engine`] for orchestrating analysis over a directory tree
//! - [`Violation`] for representing style findings
//!
//! ## Example
//!
//! ```ignore
//! use stylist_core::Engine;
//!
//! let engine = Engine::builder()
//!     .root("./src")
//!     .parser(CSharpParser::new())
//!     .analyzer(MyAnalyzer::new())
//!     .build()?;
//!
//! let result = engine.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod engine;
mod rule;
mod source;
mod syntax;
mod trivia;
mod types;

/// Utility modules for analyzer implementations.
pub mod utils;

pub use config::{AnalyzerConfig, Config, ConfigError, Profile, RuleConfig};
pub use context::FileContext;
pub use engine::{Engine, EngineBuilder, EngineError};
pub use rule::{Analyzer, AnalyzerBox, Category, Rule};
pub use source::{LineIndex, Span};
pub use syntax::{Field, Node, NodeKind, ParseError, SourceParser, SyntaxTree, TreeBuilder};
pub use trivia::{classify_comment, count_line_breaks, Trivia, TriviaKind};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
