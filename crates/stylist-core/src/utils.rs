//! Shared primitives for analyzer implementations.

pub mod allowance;
pub mod case;
pub mod segment;
pub mod width;

// Re-export commonly used utilities for analyzer implementations
#[doc(inline)]
pub use allowance::{AllowCheck, AllowIndex};
#[doc(inline)]
pub use case::{check_prefix, classify, is_camel_case, is_pascal_case, CaseStyle, PrefixCheck};
#[doc(inline)]
pub use segment::{group as group_segments, has_preceding_comment, Segment};
#[doc(inline)]
pub use width::{measure, text_width, LineWidth};
