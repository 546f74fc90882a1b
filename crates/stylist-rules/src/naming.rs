//! Naming conventions for declared symbols.
//!
//! # Rationale
//!
//! Consistent casing tells a reader what kind of symbol a name refers to
//! without looking up its declaration. Types and members that are visible
//! outside their body use PascalCase; storage that is local to a type or
//! method uses camelCase.
//!
//! # Rules
//!
//! | Symbol | Rule | Shape |
//! |--------|------|-------|
//! | namespace component | `NameNamespacesWithPascalCasing` | PascalCase |
//! | class, struct, enum, record, delegate | `NameTypesWithPascalCasing` | PascalCase |
//! | interface | `NameTypesWithPascalCasing`, `NameInterfacesWithIPrefix` | `I` + PascalCase |
//! | type parameter | `NameTypesWithPascalCasing`, `NameTypeParametersWithTPrefix` | `T` + PascalCase |
//! | method, local function | `NameMethodsWithPascalCasing` | PascalCase |
//! | property | `NamePropertiesWithPascalCase` | PascalCase |
//! | event | `NameEventsWithPascalCase` | PascalCase |
//! | enum value | `NameEnumValuesWithPascalCase` | PascalCase |
//! | const field | `NameConstantsWithPascalCase` | PascalCase |
//! | field, readonly field | `NameFieldsWithCamelCase` | camelCase |
//! | local variable, parameter | `NameVariablesWithCamelCase` | camelCase |
//!
//! A name that is nothing but its required prefix (`T`, `I`) is reported
//! as `NameSymbolsDescriptively` instead of being cased.
//!
//! Classes deriving from a type ending in `Exception` must end in
//! `Exception` themselves. Top-level types must be declared in a file named
//! after them, except a static `<X>Helper`, `<X>Extension` or
//! `<X>Extensions` class declared next to an enum `X`.
//!
//! # Suppression
//!
//! ```csharp
//! // stylist: allow(NameFieldsWithCamelCase) reason="interop layout"
//! public int Raw_Value;
//! ```

use stylist_core::utils::{check_prefix, is_camel_case, is_pascal_case, PrefixCheck};
use stylist_core::{Analyzer, FileContext, Field, Node, NodeKind, Rule, SyntaxTree, Violation};

use crate::catalog::{
    NAME_CONSTANTS, NAME_DESCRIPTIVELY, NAME_ENUM_VALUES, NAME_EVENTS, NAME_EXCEPTIONS,
    NAME_FIELDS, NAME_FILES, NAME_INTERFACES, NAME_METHODS, NAME_NAMESPACES, NAME_PROPERTIES,
    NAME_TYPES, NAME_TYPE_PARAMETERS, NAME_VARIABLES,
};

/// Analyzer name for naming conventions.
pub const NAME: &str = "naming";

static RULES: &[&Rule] = &[
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
];

/// Suffixes marking a static helper class for a sibling enum.
const HELPER_SUFFIXES: &[&str] = &["Helper", "Extensions", "Extension"];

const EXCEPTION_SUFFIX: &str = "Exception";

/// Required letter casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Pascal,
    Camel,
}

impl Casing {
    fn accepts(self, name: &str) -> bool {
        match self {
            Self::Pascal => is_pascal_case(name),
            Self::Camel => is_camel_case(name),
        }
    }
}

/// What kind of symbol a name declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolCategory {
    Namespace,
    /// Non-interface type, with its display label.
    Type(&'static str),
    Interface,
    TypeParameter,
    Method,
    Property,
    Event,
    EnumValue,
    Constant,
    Field,
    Variable,
}

impl SymbolCategory {
    fn rule(self) -> &'static Rule {
        match self {
            Self::Namespace => &NAME_NAMESPACES,
            Self::Type(_) | Self::Interface | Self::TypeParameter => &NAME_TYPES,
            Self::Method => &NAME_METHODS,
            Self::Property => &NAME_PROPERTIES,
            Self::Event => &NAME_EVENTS,
            Self::EnumValue => &NAME_ENUM_VALUES,
            Self::Constant => &NAME_CONSTANTS,
            Self::Field => &NAME_FIELDS,
            Self::Variable => &NAME_VARIABLES,
        }
    }

    fn casing(self) -> Casing {
        match self {
            Self::Field | Self::Variable => Casing::Camel,
            _ => Casing::Pascal,
        }
    }

    /// Label leading the message arguments.
    fn label(self) -> Option<&'static str> {
        match self {
            Self::Type(label) => Some(label),
            Self::Interface => Some("interface"),
            Self::TypeParameter => Some("type parameter"),
            _ => None,
        }
    }

    /// Required prefix and the rule reporting its absence.
    fn prefix(self) -> Option<(&'static str, &'static Rule)> {
        match self {
            Self::Interface => Some(("I", &NAME_INTERFACES)),
            Self::TypeParameter => Some(("T", &NAME_TYPE_PARAMETERS)),
            _ => None,
        }
    }
}

fn type_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Class => "class",
        NodeKind::Struct => "struct",
        NodeKind::Interface => "interface",
        NodeKind::Enum => "enum",
        NodeKind::Record => "record",
        NodeKind::Delegate => "delegate",
        _ => "type",
    }
}

/// Checks identifier casing, prefixes, exception suffixes and file names.
#[derive(Debug, Clone, Default)]
pub struct NamingAnalyzer;

impl NamingAnalyzer {
    /// Creates a new naming analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for NamingAnalyzer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn rules(&self) -> &'static [&'static Rule] {
        RULES
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut visitor = NamingVisitor {
            ctx,
            violations: Vec::new(),
            exception_groups: Vec::new(),
        };
        for node in tree.nodes() {
            visitor.visit(node);
        }
        visitor.finish()
    }
}

/// Class fragments sharing a qualified name.
struct ExceptionGroup<'t> {
    qualified_name: String,
    derives_exception: bool,
    identifiers: Vec<Node<'t>>,
}

struct NamingVisitor<'a, 't> {
    ctx: &'a FileContext<'a>,
    violations: Vec<Violation>,
    exception_groups: Vec<ExceptionGroup<'t>>,
}

impl<'t> NamingVisitor<'_, 't> {
    fn visit(&mut self, node: Node<'t>) {
        match node.kind() {
            NodeKind::Namespace => self.check_namespace(node),
            NodeKind::Interface => {
                self.check_declared(SymbolCategory::Interface, node);
                self.check_file_name(node);
            }
            kind if kind.is_type_declaration() => {
                self.check_declared(SymbolCategory::Type(type_label(kind)), node);
                if kind == NodeKind::Class {
                    self.collect_exception_fragment(node);
                }
                self.check_file_name(node);
            }
            NodeKind::Method | NodeKind::LocalFunction => {
                self.check_declared(SymbolCategory::Method, node);
            }
            NodeKind::Property => self.check_declared(SymbolCategory::Property, node),
            NodeKind::Event => self.check_declared(SymbolCategory::Event, node),
            NodeKind::EnumMember => self.check_declared(SymbolCategory::EnumValue, node),
            NodeKind::TypeParameter => self.check_declared(SymbolCategory::TypeParameter, node),
            NodeKind::VariableDeclarator => self.check_declarator(node),
            NodeKind::Parameter => self.check_parameter(node),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Violation> {
        for group in std::mem::take(&mut self.exception_groups) {
            if !group.derives_exception {
                continue;
            }
            for ident in group.identifiers {
                let name = ident.text();
                if !name.ends_with(EXCEPTION_SUFFIX) {
                    self.violations
                        .push(self.ctx.violation(&NAME_EXCEPTIONS, ident.span(), &[name]));
                }
            }
        }
        self.violations
    }

    fn check_declared(&mut self, category: SymbolCategory, node: Node<'t>) {
        if let Some(ident) = node.name() {
            self.check_name(category, ident);
        }
    }

    /// Applies the prefix and casing checks of `category` to `ident`.
    fn check_name(&mut self, category: SymbolCategory, ident: Node<'t>) {
        let name = ident.text();
        let span = ident.span();
        // Verbatim identifiers are cased without their `@`.
        let bare = name.trim_start_matches('@');
        if bare.is_empty() || bare.chars().all(|c| c == '_') {
            return;
        }

        let (target, prefix_rule) = match category.prefix() {
            Some((prefix, rule)) => match check_prefix(prefix, bare) {
                PrefixCheck::Valid(rest) => (Some(rest), None),
                PrefixCheck::Missing(whole) => (Some(whole), Some(rule)),
                PrefixCheck::Bare => (None, Some(&NAME_DESCRIPTIVELY)),
            },
            None => (Some(bare), None),
        };

        if let Some(target) = target {
            if !category.casing().accepts(target) {
                let violation = match category.label() {
                    Some(label) => self.ctx.violation(category.rule(), span, &[label, name]),
                    None => self.ctx.violation(category.rule(), span, &[name]),
                };
                self.violations.push(violation);
            }
        }
        if let Some(rule) = prefix_rule {
            self.violations.push(self.ctx.violation(rule, span, &[name]));
        }
    }

    /// Each dotted component is checked on its own.
    fn check_namespace(&mut self, node: Node<'t>) {
        let Some(name) = node.name() else {
            return;
        };
        for component in name
            .descendants()
            .filter(|n| n.kind() == NodeKind::Identifier)
        {
            self.check_name(SymbolCategory::Namespace, component);
        }
    }

    fn check_declarator(&mut self, node: Node<'t>) {
        let owner = node
            .parent()
            .filter(|p| p.kind() == NodeKind::VariableDeclaration)
            .and_then(|p| p.parent());
        let category = match owner {
            Some(field) if field.kind() == NodeKind::Field => {
                if field.has_modifier("const") {
                    SymbolCategory::Constant
                } else {
                    SymbolCategory::Field
                }
            }
            Some(event) if event.kind() == NodeKind::EventField => SymbolCategory::Event,
            _ => SymbolCategory::Variable,
        };
        self.check_declared(category, node);
    }

    /// Parameters of methods, constructors, local functions and delegates.
    fn check_parameter(&mut self, node: Node<'t>) {
        let owner = node
            .parent()
            .filter(|p| p.kind() == NodeKind::ParameterList)
            .and_then(|p| p.parent());
        if owner.is_some_and(|o| {
            matches!(
                o.kind(),
                NodeKind::Method
                    | NodeKind::LocalFunction
                    | NodeKind::Constructor
                    | NodeKind::Delegate
            )
        }) {
            self.check_declared(SymbolCategory::Variable, node);
        }
    }

    fn collect_exception_fragment(&mut self, node: Node<'t>) {
        let Some(ident) = node.name() else {
            return;
        };
        let derives_exception = node.first_child(NodeKind::BaseList).is_some_and(|bases| {
            bases
                .children()
                .any(|base| base.text().trim_end().ends_with(EXCEPTION_SUFFIX))
        });
        let qualified_name = qualified_name(node, ident.text());

        match self
            .exception_groups
            .iter_mut()
            .find(|g| g.qualified_name == qualified_name)
        {
            Some(group) => {
                group.derives_exception |= derives_exception;
                group.identifiers.push(ident);
            }
            None => self.exception_groups.push(ExceptionGroup {
                qualified_name,
                derives_exception,
                identifiers: vec![ident],
            }),
        }
    }

    fn check_file_name(&mut self, node: Node<'t>) {
        if !is_top_level(node) {
            return;
        }
        let Some(ident) = node.name() else {
            return;
        };
        let name = ident.text();
        if name == self.ctx.file_stem || is_sibling_helper(node, name) {
            return;
        }
        let expected = format!("{name}.cs");
        self.violations
            .push(self.ctx.violation(&NAME_FILES, ident.span(), &[name, &expected]));
    }
}

/// Dotted path of enclosing namespaces and types, ending in `name`.
fn qualified_name(node: Node<'_>, name: &str) -> String {
    let mut parts: Vec<&str> = node
        .ancestors()
        .filter(|a| a.kind() == NodeKind::Namespace || a.kind().is_type_declaration())
        .filter_map(|a| a.name_text())
        .collect();
    parts.reverse();
    parts.push(name);
    parts.join(".")
}

/// Returns true for types declared directly in a namespace.
fn is_top_level(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind() {
        NodeKind::Namespace => true,
        NodeKind::DeclarationList => parent
            .parent()
            .is_some_and(|p| p.kind() == NodeKind::Namespace),
        // A file-scoped namespace has no body; its types follow it.
        NodeKind::CompilationUnit => parent
            .children_of_kind(NodeKind::Namespace)
            .any(|ns| ns.child_by_field(Field::Body).is_none()),
        _ => false,
    }
}

/// Returns true for a static `<X>Helper`-style class next to an enum `X`.
fn is_sibling_helper(node: Node<'_>, name: &str) -> bool {
    if node.kind() != NodeKind::Class || !node.has_modifier("static") {
        return false;
    }
    let Some(base) = HELPER_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
    else {
        return false;
    };
    node.parent().is_some_and(|scope| {
        scope
            .children_of_kind(NodeKind::Enum)
            .any(|e| e.name_text() == Some(base))
    })
}
