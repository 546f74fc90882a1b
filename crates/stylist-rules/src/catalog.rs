//! Static rule catalog.
//!
//! Every rule any analyzer can report is declared here once. Ids are stable
//! (`Stylist_<RuleName>`) and are what configuration sections, allow
//! directives and tooling bind against.

use stylist_core::{Category, Rule};

macro_rules! rule {
    (
        $(#[$doc:meta])*
        $ident:ident = $name:ident, $category:ident, default: $default:literal, fixable: $fixable:literal,
        title: $title:literal,
        message: $message:literal $(,)?
    ) => {
        $(#[$doc])*
        pub static $ident: Rule = Rule {
            id: concat!("Stylist_", stringify!($name)),
            name: stringify!($name),
            category: Category::$category,
            title: $title,
            message: $message,
            enabled_by_default: $default,
            fixable: $fixable,
        };
    };
}

// Naming

rule! {
    /// Type names and type parameters use PascalCase. Args: kind label, name.
    NAME_TYPES = NameTypesWithPascalCasing, Naming, default: true, fixable: false,
    title: "Name types with PascalCasing",
    message: "The {0} '{1}' must be named with PascalCasing",
}

rule! {
    /// Method and local function names use PascalCase. Args: name.
    NAME_METHODS = NameMethodsWithPascalCasing, Naming, default: true, fixable: false,
    title: "Name methods with PascalCasing",
    message: "Method '{0}' must be named with PascalCasing",
}

rule! {
    /// Every namespace component uses PascalCase. Args: component.
    NAME_NAMESPACES = NameNamespacesWithPascalCasing, Naming, default: true, fixable: false,
    title: "Name namespaces with PascalCasing",
    message: "Namespace '{0}' must be named with PascalCasing",
}

rule! {
    /// Local variables and parameters use camelCase. Args: name.
    NAME_VARIABLES = NameVariablesWithCamelCase, Naming, default: true, fixable: false,
    title: "Name variables with camelCase",
    message: "Variable '{0}' must be named with camelCase",
}

rule! {
    /// Property names use PascalCase. Args: name.
    NAME_PROPERTIES = NamePropertiesWithPascalCase, Naming, default: true, fixable: false,
    title: "Name properties with PascalCase",
    message: "Property '{0}' must be named with PascalCase",
}

rule! {
    /// Event names use PascalCase. Args: name.
    NAME_EVENTS = NameEventsWithPascalCase, Naming, default: true, fixable: false,
    title: "Name events with PascalCase",
    message: "Event '{0}' must be named with PascalCase",
}

rule! {
    /// Instance and readonly fields use camelCase. Args: name.
    NAME_FIELDS = NameFieldsWithCamelCase, Naming, default: true, fixable: false,
    title: "Name fields with camelCase",
    message: "Field '{0}' must be named with camelCase",
}

rule! {
    /// Constants use PascalCase. Args: name.
    NAME_CONSTANTS = NameConstantsWithPascalCase, Naming, default: true, fixable: false,
    title: "Name constants with PascalCase",
    message: "Constant '{0}' must be named with PascalCase",
}

rule! {
    /// Enum values use PascalCase. Args: name.
    NAME_ENUM_VALUES = NameEnumValuesWithPascalCase, Naming, default: true, fixable: false,
    title: "Name enum values with PascalCase",
    message: "Enum value '{0}' must be named with PascalCase",
}

rule! {
    /// Types deriving from an exception end in `Exception`. Args: name.
    NAME_EXCEPTIONS = NameExceptionsWithExceptionSuffix, Naming, default: true, fixable: false,
    title: "Name exceptions with an Exception suffix",
    message: "Exception type '{0}' must end with 'Exception'",
}

rule! {
    /// Interfaces start with `I`. Args: name.
    NAME_INTERFACES = NameInterfacesWithIPrefix, Naming, default: true, fixable: false,
    title: "Name interfaces with an I prefix",
    message: "Interface '{0}' must start with the prefix 'I'",
}

rule! {
    /// Type parameters start with `T`. Args: name.
    NAME_TYPE_PARAMETERS = NameTypeParametersWithTPrefix, Naming, default: true, fixable: false,
    title: "Name type parameters with a T prefix",
    message: "Type parameter '{0}' must start with the prefix 'T'",
}

rule! {
    /// A required prefix is not the whole name. Args: name.
    NAME_DESCRIPTIVELY = NameSymbolsDescriptively, Naming, default: true, fixable: false,
    title: "Name symbols descriptively",
    message: "'{0}' is not a descriptive name",
}

rule! {
    /// Top-level types live in a file named after them. Args: name, expected file.
    NAME_FILES = NameFilesAccordingToTypeNames, Naming, default: false, fixable: false,
    title: "Name files according to type names",
    message: "Type '{0}' must be declared in a file named '{1}'",
}

// Indent

rule! {
    /// Lines are indented with tabs only.
    INDENT_WITH_TABS = IndentWithTabs, Indent, default: true, fixable: true,
    title: "Indent with tabs",
    message: "Indent with tabs instead of spaces",
}

rule! {
    /// Continuation lines carry two extra indent levels.
    DOUBLE_TAB_CONTINUATION = DoubleTabContinuationIndent, Indent, default: true, fixable: false,
    title: "Double-tab continuation indent",
    message: "Indent continuation lines with two additional tabs",
}

// Spacing

rule! {
    /// Lines do not end in a run of whitespace.
    NO_TRAILING_WHITESPACE = NoTrailingWhitespace, Spacing, default: true, fixable: true,
    title: "No trailing whitespace",
    message: "Remove trailing whitespace",
}

rule! {
    /// Non-empty brackets keep a space just inside. Args: bracket kind.
    SPACES_WITHIN_BRACKETS = SpacesWithinBrackets, Spacing, default: false, fixable: true,
    title: "Spaces within brackets",
    message: "Leave a space within the {0}",
}

// Newlines

rule! {
    /// Lines end in CRLF.
    USE_WINDOWS_LINE_ENDING = UseWindowsLineEnding, Newlines, default: false, fixable: true,
    title: "Use Windows line endings",
    message: "Use CRLF line endings",
}

rule! {
    /// Lines stay within the column limit. Args: limit.
    KEEP_LINES_WITHIN_LIMIT = KeepLinesWithin120Characters, Newlines, default: true, fixable: false,
    title: "Keep lines within 120 characters",
    message: "Keep lines within {0} characters",
}

rule! {
    /// Multi-line braces sit alone on their lines.
    BRACES_ON_OWN_LINE = BracesOnTheirOwnLine, Newlines, default: true, fixable: false,
    title: "Braces on their own line",
    message: "Place the brace on its own line",
}

rule! {
    /// Parameters do not share a line. Args: parameter name.
    PARAMETERS_ON_OWN_LINES = ParametersOnTheirOwnLines, Newlines, default: true, fixable: false,
    title: "Parameters on their own lines",
    message: "Parameter '{0}' must be on its own line",
}

rule! {
    /// A multi-line parameter list closes on its own line.
    CLOSING_PAREN_ON_OWN_LINE = ClosingParameterParenthesesOnTheirOwnLines, Newlines, default: true, fixable: false,
    title: "Closing parameter parentheses on their own lines",
    message: "Place the closing parenthesis of a multi-line parameter list on its own line",
}

// Comments

rule! {
    /// Every blank-line separated segment of statements is commented.
    COMMENTED_SEGMENTS = CommentedSegments, Comments, default: false, fixable: false,
    title: "Commented segments",
    message: "Describe the code segment with a comment",
}

rule! {
    /// A comment block is preceded by an empty line or an opening brace.
    NEWLINE_BEFORE_COMMENT = NewlineBeforeComment, Comments, default: true, fixable: false,
    title: "Newline before comment",
    message: "Leave an empty line before the comment",
}

rule! {
    /// Trailing comments are separated from code by exactly two spaces.
    SPACES_BEFORE_TRAILING_COMMENT = SpacesBeforeTrailingComment, Comments, default: true, fixable: true,
    title: "Spaces before trailing comment",
    message: "Separate the trailing comment from code with two spaces",
}

rule! {
    /// Comment text starts with a space.
    COMMENT_STARTS_WITH_SPACE = CommentStartsWithSpace, Comments, default: true, fixable: true,
    title: "Comment starts with space",
    message: "Start the comment with a space",
}

// Documentation

rule! {
    /// Declarations carry a documentation summary. Args: kind label, name.
    DOCUMENT_WITH_SUMMARY = XmlDocumentEverythingWithSummary, Documentation, default: false, fixable: false,
    title: "Document everything with a summary",
    message: "The {0} '{1}' must be documented with an XML summary",
}

rule! {
    /// Every method parameter is documented. Args: parameter name.
    DOCUMENT_ALL_PARAMS = XmlDocumentAllMethodParams, Documentation, default: true, fixable: false,
    title: "Document all method parameters",
    message: "Parameter '{0}' must be documented",
}

rule! {
    /// Non-void methods document their return value. Args: method name.
    DOCUMENT_RETURN_VALUES = XmlDocumentReturnValues, Documentation, default: true, fixable: false,
    title: "Document return values",
    message: "The return value of '{0}' must be documented",
}

rule! {
    /// Documented parameters exist. Args: documented name.
    NO_MISMATCHED_PARAM = XmlDocumentationNoMismatchedParam, Documentation, default: true, fixable: false,
    title: "No mismatched parameter documentation",
    message: "Documented parameter '{0}' does not exist",
}

rule! {
    /// Documentation elements have content. Args: element name.
    NO_EMPTY_CONTENT = XmlDocumentationNoEmptyContent, Documentation, default: true, fixable: false,
    title: "No empty documentation content",
    message: "The <{0}> element must not be empty",
}

rule! {
    /// A declaration has a single documentation block.
    NO_MULTIPLE_DOC_SEGMENTS = XmlNoMultipleXmlDocumentationSegments, Documentation, default: true, fixable: false,
    title: "No multiple documentation segments",
    message: "Merge the documentation blocks into one",
}

rule! {
    /// A parameter is documented once. Args: parameter name.
    NO_DUPLICATE_PARAMS = XmlNoMultipleParamsWithSameName, Documentation, default: true, fixable: false,
    title: "No multiple params with the same name",
    message: "Parameter '{0}' is documented more than once",
}

/// Every rule in the catalog, in catalog order.
pub static ALL_RULES: &[&Rule] = &[
    &NAME_TYPES,
    &NAME_METHODS,
    &NAME_NAMESPACES,
    &NAME_VARIABLES,
    &NAME_PROPERTIES,
    &NAME_EVENTS,
    &NAME_FIELDS,
    &NAME_CONSTANTS,
    &NAME_ENUM_VALUES,
    &NAME_EXCEPTIONS,
    &NAME_INTERFACES,
    &NAME_TYPE_PARAMETERS,
    &NAME_DESCRIPTIVELY,
    &NAME_FILES,
    &INDENT_WITH_TABS,
    &DOUBLE_TAB_CONTINUATION,
    &NO_TRAILING_WHITESPACE,
    &USE_WINDOWS_LINE_ENDING,
    &KEEP_LINES_WITHIN_LIMIT,
    &BRACES_ON_OWN_LINE,
    &PARAMETERS_ON_OWN_LINES,
    &CLOSING_PAREN_ON_OWN_LINE,
    &SPACES_WITHIN_BRACKETS,
    &COMMENTED_SEGMENTS,
    &NEWLINE_BEFORE_COMMENT,
    &SPACES_BEFORE_TRAILING_COMMENT,
    &COMMENT_STARTS_WITH_SPACE,
    &DOCUMENT_WITH_SUMMARY,
    &DOCUMENT_ALL_PARAMS,
    &DOCUMENT_RETURN_VALUES,
    &NO_MISMATCHED_PARAM,
    &NO_EMPTY_CONTENT,
    &NO_MULTIPLE_DOC_SEGMENTS,
    &NO_DUPLICATE_PARAMS,
];

/// Looks a rule up by name or id.
#[must_use]
pub fn find(key: &str) -> Option<&'static Rule> {
    ALL_RULES.iter().copied().find(|rule| rule.matches(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_namespaced() {
        let ids: HashSet<_> = ALL_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), ALL_RULES.len());
        for rule in ALL_RULES {
            assert_eq!(rule.id, format!("Stylist_{}", rule.name));
        }
    }

    #[test]
    fn test_find_by_name_or_id() {
        assert_eq!(find("IndentWithTabs").map(|r| r.id), Some("Stylist_IndentWithTabs"));
        assert_eq!(
            find("Stylist_CommentedSegments").map(|r| r.name),
            Some("CommentedSegments")
        );
        assert!(find("NoSuchRule").is_none());
    }

    #[test]
    fn test_default_off_rules() {
        let off: Vec<_> = ALL_RULES
            .iter()
            .filter(|r| !r.enabled_by_default)
            .map(|r| r.name)
            .collect();
        assert_eq!(
            off,
            vec![
                "NameFilesAccordingToTypeNames",
                "UseWindowsLineEnding",
                "SpacesWithinBrackets",
                "CommentedSegments",
                "XmlDocumentEverythingWithSummary",
            ]
        );
    }

    #[test]
    fn test_message_rendering() {
        assert_eq!(
            NAME_FILES.render(&["Foo", "Foo.cs"]),
            "Type 'Foo' must be declared in a file named 'Foo.cs'"
        );
    }
}
