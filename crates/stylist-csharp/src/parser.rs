//! C# parser lowering tree-sitter trees into the core syntax model.

use stylist_core::{ParseError, SourceParser, Span, SyntaxTree, TreeBuilder};
use tracing::debug;
use tree_sitter::{Language, Parser, Tree, TreeCursor};

use crate::kinds;

/// Parses C# source with tree-sitter.
pub struct CSharpParser {
    language: Language,
}

impl CSharpParser {
    /// Creates a new C# parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    /// Walks the tree-sitter tree in document order, feeding the builder.
    fn lower(tree: &Tree, text: &str) -> SyntaxTree {
        let mut builder = TreeBuilder::new();
        let mut cursor = tree.walk();
        // One entry per entered node: whether it opened a builder node.
        let mut opened: Vec<bool> = Vec::new();

        loop {
            let descend = Self::enter(&mut builder, &cursor, &mut opened);
            if descend && cursor.goto_first_child() {
                continue;
            }
            loop {
                if opened.pop() == Some(true) {
                    builder.close();
                }
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return builder.finish(text);
                }
            }
        }
    }

    /// Records the cursor's node. Returns whether its children should be
    /// visited.
    fn enter(builder: &mut TreeBuilder, cursor: &TreeCursor<'_>, opened: &mut Vec<bool>) -> bool {
        let node = cursor.node();
        let span = Span::new(node.start_byte(), node.end_byte());

        if node.kind() == "comment" {
            builder.comment(span);
            opened.push(false);
            return false;
        }

        let is_named = node.is_named() && !node.is_missing();
        if is_named {
            let field = cursor.field_name().and_then(kinds::field);
            builder.open(kinds::node_kind(node.kind()), span, field);
        }
        opened.push(is_named);

        if node.child_count() == 0 && !span.is_empty() {
            builder.token(span);
        }
        true
    }
}

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for CSharpParser {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cs"]
    }

    fn parse(&self, text: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(format!("failed to set C# language: {e}")))?;

        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ParseError::new("parser returned no tree"))?;

        if tree.root_node().has_error() {
            debug!("C# source contains syntax errors; analyzing recovered tree");
        }

        Ok(Self::lower(&tree, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylist_core::{Field, NodeKind, TriviaKind};

    fn parse(src: &str) -> SyntaxTree {
        CSharpParser::new().parse(src).unwrap()
    }

    #[test]
    fn lowers_declarations() {
        let tree = parse("namespace Foo.Bar\n{\n\tclass Baz<T> : Exception\n\t{\n\t}\n}\n");
        let root = tree.root();
        assert_eq!(root.kind(), NodeKind::CompilationUnit);

        let namespace = root.first_child(NodeKind::Namespace).unwrap();
        assert_eq!(namespace.name_text(), Some("Foo.Bar"));

        let class = tree
            .nodes()
            .find(|n| n.kind() == NodeKind::Class)
            .unwrap();
        assert_eq!(class.name_text(), Some("Baz"));
        assert!(class.first_child(NodeKind::TypeParameterList).is_some());
        assert!(class.first_child(NodeKind::BaseList).is_some());
        assert_eq!(
            class.child_by_field(Field::Body).map(|b| b.kind()),
            Some(NodeKind::DeclarationList)
        );
    }

    #[test]
    fn lowers_methods_and_statements() {
        let tree = parse(
            "class A\n{\n\tint Foo(string a, int b)\n\t{\n\t\tint x = 0;\n\t\treturn x;\n\t}\n}\n",
        );
        let method = tree
            .nodes()
            .find(|n| n.kind() == NodeKind::Method)
            .unwrap();
        assert_eq!(method.name_text(), Some("Foo"));
        assert_eq!(
            method.child_by_field(Field::Type).map(|t| t.text()),
            Some("int")
        );

        let params = method.child_by_field(Field::Parameters).unwrap();
        let names: Vec<_> = params
            .children_of_kind(NodeKind::Parameter)
            .filter_map(|p| p.name_text())
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        let body = method.child_by_field(Field::Body).unwrap();
        let kinds: Vec<_> = body.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::LocalDeclaration, NodeKind::Return]);
    }

    #[test]
    fn comments_become_trivia() {
        let tree = parse("class A\n{\n\t/// <summary>Doc</summary>\n\t// note\n\tint x; // tail\n}\n");
        assert_eq!(tree.comments().len(), 3);

        let field = tree
            .nodes()
            .find(|n| n.kind() == NodeKind::Field)
            .unwrap();
        let leading: Vec<_> = field
            .leading_trivia()
            .iter()
            .map(|t| t.kind)
            .filter(|k| *k != TriviaKind::Whitespace)
            .collect();
        assert_eq!(
            leading,
            vec![
                TriviaKind::DocComment,
                TriviaKind::EndOfLine,
                TriviaKind::SingleLineComment,
                TriviaKind::EndOfLine
            ]
        );

        let trailing: Vec<_> = field.trailing_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(
            trailing,
            vec![
                TriviaKind::Whitespace,
                TriviaKind::SingleLineComment,
                TriviaKind::EndOfLine
            ]
        );
    }

    #[test]
    fn modifiers_are_visible() {
        let tree = parse("static class Helpers { const int Max = 1; }");
        let class = tree.root().first_child(NodeKind::Class).unwrap();
        assert!(class.has_modifier("static"));
        let field = tree
            .nodes()
            .find(|n| n.kind() == NodeKind::Field)
            .unwrap();
        assert!(field.has_modifier("const"));
    }

    #[test]
    fn empty_source() {
        let tree = parse("");
        assert_eq!(tree.root().kind(), NodeKind::CompilationUnit);
        assert!(tree.tokens().is_empty());
    }
}
