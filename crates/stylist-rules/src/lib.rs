//! # stylist-rules
//!
//! Built-in C# style analyzers for stylist.
//!
//! Each analyzer owns a group of catalog rules. Rule ids have the form
//! `Stylist_<RuleName>` and are stable: configuration files, severity
//! overrides and inline allowances bind against them.
//!
//! ## Analyzers
//!
//! | Analyzer | Rules |
//! |----------|-------|
//! | [`NamingAnalyzer`] | `Name*` casing, prefix, suffix and file-name rules |
//! | [`LineAnalyzer`] | indentation, trailing whitespace, line endings, width, brace and parameter layout |
//! | [`SpacingAnalyzer`] | `SpacesWithinBrackets` |
//! | [`CommentAnalyzer`] | `CommentedSegments` and comment spacing |
//! | [`DocumentationAnalyzer`] | `Xml*` documentation rules |
//!
//! The full table lives in [`catalog::ALL_RULES`].
//!
//! ## Usage
//!
//! ```ignore
//! use stylist_core::Engine;
//! use stylist_csharp::CSharpParser;
//! use stylist_rules::all_analyzers;
//!
//! let engine = Engine::builder()
//!     .root("./src")
//!     .parser(CSharpParser::new())
//!     .analyzers(all_analyzers())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod comment;
mod doc_xml;
mod documentation;
mod line;
mod naming;
mod presets;
mod spacing;

pub use comment::CommentAnalyzer;
pub use documentation::DocumentationAnalyzer;
pub use line::{LineAnalyzer, DEFAULT_MAX_LINE_LENGTH, DEFAULT_TAB_WIDTH};
pub use naming::NamingAnalyzer;
pub use presets::{all_analyzers, configured_analyzers, enabled_rules};
pub use spacing::SpacingAnalyzer;

/// Re-export core types for convenience.
pub use stylist_core::{Analyzer, Config, Profile, Rule, Severity, Violation};
