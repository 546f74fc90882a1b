//! Identifier case classification.
//!
//! Words are either a capitalized run (`Foo`, tolerating up to two extra
//! leading capitals for short abbreviations such as `XYCoordinate`) or a run
//! of digits. A name may end in a one or two letter abbreviation optionally
//! followed by digits (`UserID`, `SomethingA1`).
//!
//! camelCase shares that tail, so `userID` is accepted even though the
//! classic grammar allows only one trailing capital (`userI`).

use once_cell::sync::Lazy;
use regex::Regex;

static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z]{1,3}[a-z]+|[0-9]+)*(?:[A-Z]{1,2}[0-9]*)?$")
        .expect("valid pascal case regex")
});

static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]+(?:[A-Z]{1,3}[a-z]+|[0-9]+)*(?:[A-Z]{1,2}[0-9]*)?$")
        .expect("valid camel case regex")
});

static CAPITAL_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").expect("valid capital case regex")
});

/// Case style of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    /// `FooBar`
    Pascal,
    /// `fooBar`
    Camel,
    /// `FOO_BAR`
    Capital,
    /// None of the above.
    Unknown,
}

/// Returns true if `name` is `PascalCase`.
#[must_use]
pub fn is_pascal_case(name: &str) -> bool {
    !name.is_empty() && PASCAL_CASE.is_match(name)
}

/// Returns true if `name` is `camelCase`.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    CAMEL_CASE.is_match(name)
}

/// Returns true if `name` is `CAPITAL_CASE`.
#[must_use]
pub fn is_capital_case(name: &str) -> bool {
    CAPITAL_CASE.is_match(name)
}

/// Classifies `name`. Pascal wins over capital for short names like `ID`.
#[must_use]
pub fn classify(name: &str) -> CaseStyle {
    if is_pascal_case(name) {
        CaseStyle::Pascal
    } else if is_camel_case(name) {
        CaseStyle::Camel
    } else if is_capital_case(name) {
        CaseStyle::Capital
    } else {
        CaseStyle::Unknown
    }
}

/// Outcome of a required-prefix check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCheck<'a> {
    /// Prefix present; carries the remainder after it.
    Valid(&'a str),
    /// Prefix absent or not followed by a new word; carries the whole name.
    Missing(&'a str),
    /// The name is the prefix alone.
    Bare,
}

impl<'a> PrefixCheck<'a> {
    /// Name to run casing checks on, if any remains.
    #[must_use]
    pub fn casing_target(self) -> Option<&'a str> {
        match self {
            Self::Valid(rest) | Self::Missing(rest) => Some(rest),
            Self::Bare => None,
        }
    }
}

/// Checks that `name` starts with `prefix` followed by a capitalized word or
/// digit.
#[must_use]
pub fn check_prefix<'a>(prefix: &str, name: &'a str) -> PrefixCheck<'a> {
    if name == prefix {
        return PrefixCheck::Bare;
    }
    match name.strip_prefix(prefix) {
        Some(rest)
            if rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) =>
        {
            PrefixCheck::Valid(rest)
        }
        _ => PrefixCheck::Missing(name),
    }
}
