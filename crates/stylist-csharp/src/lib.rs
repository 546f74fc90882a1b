//! # stylist-csharp
//!
//! Tree-sitter based C# front end for stylist.
//!
//! Parses C# source with `tree-sitter-c-sharp` and lowers the concrete tree
//! into the language-neutral [`stylist_core::SyntaxTree`] the analyzers run
//! on. Comments are kept as trivia; every other leaf becomes a token.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod kinds;
mod parser;

pub use parser::CSharpParser;
