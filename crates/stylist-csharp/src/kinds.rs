//! Mapping from tree-sitter-c-sharp node kinds and fields to the core model.

use stylist_core::{Field, NodeKind};

/// Maps a named grammar node kind.
pub(crate) fn node_kind(kind: &str) -> NodeKind {
    match kind {
        "compilation_unit" => NodeKind::CompilationUnit,
        "namespace_declaration" | "file_scoped_namespace_declaration" => NodeKind::Namespace,
        "class_declaration" => NodeKind::Class,
        "struct_declaration" => NodeKind::Struct,
        "interface_declaration" => NodeKind::Interface,
        "enum_declaration" => NodeKind::Enum,
        "enum_member_declaration_list" => NodeKind::EnumMemberList,
        "enum_member_declaration" => NodeKind::EnumMember,
        "record_declaration" | "record_struct_declaration" => NodeKind::Record,
        "delegate_declaration" => NodeKind::Delegate,
        "method_declaration" => NodeKind::Method,
        "local_function_statement" => NodeKind::LocalFunction,
        "constructor_declaration" => NodeKind::Constructor,
        "destructor_declaration" => NodeKind::Destructor,
        "property_declaration" => NodeKind::Property,
        "indexer_declaration" => NodeKind::Indexer,
        "event_declaration" => NodeKind::Event,
        "event_field_declaration" => NodeKind::EventField,
        "field_declaration" => NodeKind::Field,
        "variable_declaration" => NodeKind::VariableDeclaration,
        "variable_declarator" => NodeKind::VariableDeclarator,
        "local_declaration_statement" => NodeKind::LocalDeclaration,
        "parameter" => NodeKind::Parameter,
        "parameter_list" => NodeKind::ParameterList,
        "type_parameter_list" => NodeKind::TypeParameterList,
        "type_parameter" => NodeKind::TypeParameter,
        "base_list" => NodeKind::BaseList,
        "block" => NodeKind::Block,
        "declaration_list" => NodeKind::DeclarationList,
        "accessor_list" => NodeKind::AccessorList,
        "accessor_declaration" => NodeKind::Accessor,
        "attribute_list" => NodeKind::AttributeList,
        "attribute" => NodeKind::Attribute,
        "modifier" => NodeKind::Modifier,
        "identifier" => NodeKind::Identifier,
        "qualified_name" => NodeKind::QualifiedName,
        "if_statement" => NodeKind::If,
        "for_statement" => NodeKind::For,
        "foreach_statement" => NodeKind::Foreach,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::Do,
        "switch_statement" => NodeKind::Switch,
        "lock_statement" => NodeKind::Lock,
        "using_statement" => NodeKind::Using,
        "checked_statement" => NodeKind::Checked,
        "fixed_statement" => NodeKind::Fixed,
        "try_statement" => NodeKind::Try,
        "return_statement" => NodeKind::Return,
        "throw_statement" => NodeKind::Throw,
        "expression_statement" => NodeKind::ExpressionStatement,
        "lambda_expression" | "anonymous_method_expression" => NodeKind::Lambda,
        "argument_list" => NodeKind::ArgumentList,
        "bracketed_argument_list" => NodeKind::BracketedArgumentList,
        "attribute_argument_list" => NodeKind::AttributeArgumentList,
        "initializer_expression" => NodeKind::Initializer,
        "parenthesized_expression" => NodeKind::ParenthesizedExpression,
        k if k.starts_with("preproc_") => NodeKind::Directive,
        _ => NodeKind::Other,
    }
}

/// Maps a grammar field name.
pub(crate) fn field(name: &str) -> Option<Field> {
    match name {
        "name" => Some(Field::Name),
        "body" => Some(Field::Body),
        "parameters" => Some(Field::Parameters),
        "type_parameters" => Some(Field::TypeParameters),
        "type" | "returns" => Some(Field::Type),
        "accessors" => Some(Field::Accessors),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        assert_eq!(node_kind("class_declaration"), NodeKind::Class);
        assert_eq!(
            node_kind("file_scoped_namespace_declaration"),
            NodeKind::Namespace
        );
        assert_eq!(node_kind("preproc_region"), NodeKind::Directive);
        assert_eq!(node_kind("binary_expression"), NodeKind::Other);
    }

    #[test]
    fn test_fields() {
        assert_eq!(field("returns"), Some(Field::Type));
        assert_eq!(field("type"), Some(Field::Type));
        assert_eq!(field("condition"), None);
    }
}
