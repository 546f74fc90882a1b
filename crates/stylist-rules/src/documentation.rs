//! XML documentation requirements.
//!
//! # Rationale
//!
//! Documentation comments are what IntelliSense shows at every call site.
//! Each documentable declaration carries a `<summary>`; methods also
//! document every parameter and their return value.
//!
//! # Detected Patterns
//!
//! - Interfaces, classes, structs, enums, methods, properties, fields and
//!   enum values without a documentation block or without a `<summary>`
//! - `<param>` elements naming no parameter, or naming one twice
//! - Method parameters with no `<param>` element
//! - Non-`void` methods with no `<returns>` element
//! - Top-level elements with blank content
//! - Declarations carrying more than one documentation block
//!
//! Methods marked as test cases (`[Test]`, `[TestCase]`, `[TestMethod]`,
//! `[Fact]`, `[Theory]`) may go undocumented.

use stylist_core::{
    Analyzer, Field, FileContext, Node, NodeKind, Rule, Span, SyntaxTree, Violation,
};

use crate::catalog::{
    DOCUMENT_ALL_PARAMS, DOCUMENT_RETURN_VALUES, DOCUMENT_WITH_SUMMARY, NO_DUPLICATE_PARAMS,
    NO_EMPTY_CONTENT, NO_MISMATCHED_PARAM, NO_MULTIPLE_DOC_SEGMENTS,
};
use crate::doc_xml::{doc_blocks, DocElement};

/// Analyzer name for documentation.
pub const NAME: &str = "documentation";

static RULES: &[&Rule] = &[
    &DOCUMENT_WITH_SUMMARY,
    &DOCUMENT_ALL_PARAMS,
    &DOCUMENT_RETURN_VALUES,
    &NO_MISMATCHED_PARAM,
    &NO_EMPTY_CONTENT,
    &NO_MULTIPLE_DOC_SEGMENTS,
    &NO_DUPLICATE_PARAMS,
];

const TEST_ATTRIBUTES: &[&str] = &["Test", "TestCase", "TestMethod", "Fact", "Theory"];

/// Checks XML documentation comments on declarations.
#[derive(Debug, Clone, Default)]
pub struct DocumentationAnalyzer;

impl DocumentationAnalyzer {
    /// Creates a new documentation analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for DocumentationAnalyzer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn rules(&self) -> &'static [&'static Rule] {
        RULES
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut violations = Vec::new();
        for node in tree.nodes() {
            if let Some(label) = label(node.kind()) {
                check_declaration(ctx, node, label, &mut violations);
            }
        }
        violations
    }
}

/// How a documentable declaration is named in messages.
fn label(kind: NodeKind) -> Option<&'static str> {
    Some(match kind {
        NodeKind::Interface => "interface",
        NodeKind::Class => "class",
        NodeKind::Struct => "struct",
        NodeKind::Enum => "enum",
        NodeKind::Method => "method",
        NodeKind::Property => "property",
        NodeKind::Field => "field",
        NodeKind::EnumMember => "enum value",
        _ => return None,
    })
}

fn check_declaration(
    ctx: &FileContext,
    node: Node<'_>,
    label: &str,
    violations: &mut Vec<Violation>,
) {
    let blocks = doc_blocks(ctx.content, &node.leading_trivia());
    if let Some((_, extra)) = blocks.split_last().filter(|(_, extra)| !extra.is_empty()) {
        for block in extra {
            violations.push(ctx.violation(&NO_MULTIPLE_DOC_SEGMENTS, block.span(), &[]));
        }
        return;
    }

    let (span, name) = identifier(node).map_or((node.span(), ""), |id| (id.span(), id.text()));
    let Some(block) = blocks.first() else {
        if !(node.kind() == NodeKind::Method && is_test_case(node)) {
            violations.push(ctx.violation(&DOCUMENT_WITH_SUMMARY, span, &[label, name]));
        }
        return;
    };

    let elements = block.elements(ctx.content);
    if !elements.iter().any(|e| e.name == "summary") {
        violations.push(ctx.violation(&DOCUMENT_WITH_SUMMARY, span, &[label, name]));
    }

    if node.kind() == NodeKind::Method {
        check_method(ctx, node, span, name, &elements, violations);
    }

    for element in elements.iter().filter(|e| e.is_blank) {
        violations.push(ctx.violation(
            &NO_EMPTY_CONTENT,
            element.span,
            &[element.name.as_str()],
        ));
    }
}

fn check_method(
    ctx: &FileContext,
    method: Node<'_>,
    span: Span,
    name: &str,
    elements: &[DocElement],
    violations: &mut Vec<Violation>,
) {
    let parameters: Vec<_> = method
        .child_by_field(Field::Parameters)
        .into_iter()
        .flat_map(|list| list.children_of_kind(NodeKind::Parameter))
        .filter_map(|p| p.name())
        .collect();

    let mut documented: Vec<&str> = Vec::new();
    for element in elements.iter().filter(|e| e.name == "param") {
        let Some((param, attribute)) = &element.name_attribute else {
            continue;
        };
        if !parameters.iter().any(|p| p.text() == param) {
            violations.push(ctx.violation(
                &NO_MISMATCHED_PARAM,
                *attribute,
                &[param.as_str()],
            ));
        } else if documented.contains(&param.as_str()) {
            violations.push(ctx.violation(
                &NO_DUPLICATE_PARAMS,
                *attribute,
                &[param.as_str()],
            ));
        } else {
            documented.push(param);
        }
    }

    for parameter in &parameters {
        if !documented.contains(&parameter.text()) {
            violations.push(ctx.violation(
                &DOCUMENT_ALL_PARAMS,
                parameter.span(),
                &[parameter.text()],
            ));
        }
    }

    let returns_value = method
        .child_by_field(Field::Type)
        .is_some_and(|t| t.text() != "void");
    if returns_value && !elements.iter().any(|e| e.name == "returns") {
        violations.push(ctx.violation(&DOCUMENT_RETURN_VALUES, span, &[name]));
    }
}

/// Identifier of a declaration; a field uses its first declarator.
fn identifier(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() == NodeKind::Field {
        node.descendants()
            .find(|n| n.kind() == NodeKind::VariableDeclarator)
            .and_then(|declarator| declarator.name())
    } else {
        node.name()
    }
}

fn is_test_case(method: Node<'_>) -> bool {
    method
        .children_of_kind(NodeKind::AttributeList)
        .flat_map(|list| list.children_of_kind(NodeKind::Attribute))
        .filter_map(|attribute| attribute.child_by_field(Field::Name))
        .any(|name| {
            let simple = name.text().rsplit('.').next().unwrap_or_default();
            let simple = simple.strip_suffix("Attribute").unwrap_or(simple);
            TEST_ATTRIBUTES.contains(&simple)
        })
}
