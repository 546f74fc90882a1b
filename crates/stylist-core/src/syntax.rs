//! Language-neutral syntax tree consumed by analyzers.
//!
//! A host parser lowers its own concrete tree into a [`SyntaxTree`] through
//! [`TreeBuilder`]. Analyzers only ever see this model, so any parser that can
//! drive the builder can feed the engine.

use crate::source::{LineIndex, Span};
use crate::trivia::{self, Trivia};

/// Kinds of syntax nodes the analyzers distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a file.
    CompilationUnit,
    /// Block or file-scoped namespace declaration.
    Namespace,
    /// Class declaration.
    Class,
    /// Struct declaration.
    Struct,
    /// Interface declaration.
    Interface,
    /// Enum declaration.
    Enum,
    /// Body of an enum declaration.
    EnumMemberList,
    /// Single enum value.
    EnumMember,
    /// Record declaration.
    Record,
    /// Delegate declaration.
    Delegate,
    /// Method declaration.
    Method,
    /// Local function statement.
    LocalFunction,
    /// Constructor declaration.
    Constructor,
    /// Destructor declaration.
    Destructor,
    /// Property declaration.
    Property,
    /// Indexer declaration.
    Indexer,
    /// Event declaration with accessors.
    Event,
    /// Field-like event declaration.
    EventField,
    /// Field declaration.
    Field,
    /// Typed list of declarators.
    VariableDeclaration,
    /// A single declared variable.
    VariableDeclarator,
    /// Local variable declaration statement.
    LocalDeclaration,
    /// Formal parameter.
    Parameter,
    /// Parenthesized formal parameter list.
    ParameterList,
    /// Angle-bracketed type parameter list.
    TypeParameterList,
    /// Generic type parameter.
    TypeParameter,
    /// Base type list of a type declaration.
    BaseList,
    /// Brace-delimited statement block.
    Block,
    /// Brace-delimited member list of a type or namespace.
    DeclarationList,
    /// Property or event accessor list.
    AccessorList,
    /// Single accessor.
    Accessor,
    /// Attribute section.
    AttributeList,
    /// Single attribute.
    Attribute,
    /// Declaration modifier keyword.
    Modifier,
    /// Simple identifier.
    Identifier,
    /// Dotted name.
    QualifiedName,
    /// `if` statement.
    If,
    /// `for` statement.
    For,
    /// `foreach` statement.
    Foreach,
    /// `while` statement.
    While,
    /// `do` statement.
    Do,
    /// `switch` statement.
    Switch,
    /// `lock` statement.
    Lock,
    /// `using` statement.
    Using,
    /// `checked` or `unchecked` statement.
    Checked,
    /// `fixed` statement.
    Fixed,
    /// `try` statement.
    Try,
    /// `return` statement.
    Return,
    /// `throw` statement.
    Throw,
    /// Expression statement.
    ExpressionStatement,
    /// Lambda expression.
    Lambda,
    /// Invocation or creation argument list.
    ArgumentList,
    /// Element access argument list.
    BracketedArgumentList,
    /// Attribute argument list.
    AttributeArgumentList,
    /// Object, collection or array initializer.
    Initializer,
    /// Parenthesized expression.
    ParenthesizedExpression,
    /// Preprocessor directive.
    Directive,
    /// Anything the analyzers do not distinguish.
    Other,
}

impl NodeKind {
    /// Returns true for type declarations.
    #[must_use]
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Interface
                | Self::Enum
                | Self::Record
                | Self::Delegate
        )
    }

    /// Returns true for kinds whose identifier is their first identifier child.
    fn names_itself(self) -> bool {
        self.is_type_declaration()
            || matches!(
                self,
                Self::Namespace
                    | Self::EnumMember
                    | Self::Method
                    | Self::LocalFunction
                    | Self::Constructor
                    | Self::Destructor
                    | Self::Property
                    | Self::Event
                    | Self::VariableDeclarator
                    | Self::Parameter
                    | Self::TypeParameter
            )
    }
}

/// Named roles a child can play within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Declared name.
    Name,
    /// Declaration or statement body.
    Body,
    /// Formal parameter list.
    Parameters,
    /// Type parameter list.
    TypeParameters,
    /// Declared or return type.
    Type,
    /// Accessor list.
    Accessors,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    parent: Option<usize>,
    field: Option<Field>,
    children: Vec<usize>,
}

/// Error raised by a host parser.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// Description of the failure.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A parser able to produce a [`SyntaxTree`] for one language.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., "csharp").
    fn language(&self) -> &'static str;

    /// File extensions handled, without the leading dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses source text.
    ///
    /// # Errors
    ///
    /// Returns an error if the host parser cannot produce a tree.
    fn parse(&self, text: &str) -> Result<SyntaxTree, ParseError>;
}

/// Immutable parsed file: node arena, tokens, comments and text.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: String,
    nodes: Vec<NodeData>,
    tokens: Vec<Span>,
    comments: Vec<Span>,
    lines: LineIndex,
}

impl SyntaxTree {
    /// Root node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node { tree: self, id: 0 }
    }

    /// Source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line table of the source text.
    #[must_use]
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// All non-comment tokens, sorted by position.
    #[must_use]
    pub fn tokens(&self) -> &[Span] {
        &self.tokens
    }

    /// All comments, sorted by position.
    #[must_use]
    pub fn comments(&self) -> &[Span] {
        &self.comments
    }

    /// Text covered by `span`.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Every node in preorder.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        self.root().descendants()
    }

    /// Index range of the tokens lying inside `span`.
    fn token_range(&self, span: Span) -> std::ops::Range<usize> {
        let start = self.tokens.partition_point(|t| t.start < span.start);
        let end = self.tokens.partition_point(|t| t.end <= span.end);
        start..end.max(start)
    }

    /// Tokens lying inside `span`.
    #[must_use]
    pub fn tokens_in(&self, span: Span) -> &[Span] {
        &self.tokens[self.token_range(span)]
    }

    /// Trivia between a token and the next, up to and including the first
    /// line break.
    fn trailing_of(&self, index: usize) -> Vec<Trivia> {
        let Some(token) = self.tokens.get(index) else {
            return Vec::new();
        };
        let gap_end = self
            .tokens
            .get(index + 1)
            .map_or(self.text.len(), |next| next.start);
        let gap = trivia::lex(&self.text, Span::new(token.end, gap_end), &self.comments);
        match gap.iter().position(|t| t.kind == trivia::TriviaKind::EndOfLine) {
            Some(eol) => gap[..=eol].to_vec(),
            None => gap,
        }
    }

    /// Trivia before a token that are not trailing trivia of its predecessor.
    fn leading_of(&self, index: usize) -> Vec<Trivia> {
        let Some(token) = self.tokens.get(index) else {
            return Vec::new();
        };
        let Some(previous) = index.checked_sub(1).and_then(|i| self.tokens.get(i)) else {
            return trivia::lex(&self.text, Span::new(0, token.start), &self.comments);
        };
        let gap = trivia::lex(
            &self.text,
            Span::new(previous.end, token.start),
            &self.comments,
        );
        match gap.iter().position(|t| t.kind == trivia::TriviaKind::EndOfLine) {
            Some(eol) => gap[eol + 1..].to_vec(),
            None => Vec::new(),
        }
    }
}

/// Lightweight handle to a node inside a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: usize,
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("span", &self.span())
            .finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id]
    }

    fn at(&self, id: usize) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// Byte span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.data().span
    }

    /// Source text of the node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.tree.slice(self.span())
    }

    /// Role of this node in its parent, if any.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        self.data().field
    }

    /// Parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'t>> + 't {
        std::iter::successors(self.parent(), Node::parent)
    }

    /// Direct children in source order.
    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// Direct children of the given kind.
    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = Node<'t>> + 't {
        self.children().filter(move |c| c.kind() == kind)
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn first_child(&self, kind: NodeKind) -> Option<Node<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// First direct child playing the given role.
    #[must_use]
    pub fn child_by_field(&self, field: Field) -> Option<Node<'t>> {
        self.children().find(|c| c.field() == Some(field))
    }

    /// This node and all nodes below it, in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        let mut stack = vec![self.id];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(tree.nodes[id].children.iter().rev());
            Some(Node { tree, id })
        })
    }

    /// Identifier naming this declaration.
    #[must_use]
    pub fn name(&self) -> Option<Node<'t>> {
        if let Some(name) = self.child_by_field(Field::Name) {
            return Some(name);
        }
        if self.kind().names_itself() {
            return self.first_child(NodeKind::Identifier);
        }
        None
    }

    /// Text of [`Node::name`].
    #[must_use]
    pub fn name_text(&self) -> Option<&'t str> {
        self.name().map(|n| n.text())
    }

    /// Returns true if a modifier child has the given text.
    #[must_use]
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.children_of_kind(NodeKind::Modifier)
            .any(|m| m.text() == modifier)
    }

    /// Tokens inside this node.
    #[must_use]
    pub fn tokens(&self) -> &'t [Span] {
        self.tree.tokens_in(self.span())
    }

    /// First token inside this node.
    #[must_use]
    pub fn first_token(&self) -> Option<Span> {
        self.tokens().first().copied()
    }

    /// Last token inside this node.
    #[must_use]
    pub fn last_token(&self) -> Option<Span> {
        self.tokens().last().copied()
    }

    /// Line (0-based) where the node starts.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.tree.lines.line_of(self.span().start)
    }

    /// Line (0-based) where the node ends.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.tree.lines.line_of(self.span().end)
    }

    /// Trivia in front of the node's first token.
    #[must_use]
    pub fn leading_trivia(&self) -> Vec<Trivia> {
        let range = self.tree.token_range(self.span());
        if range.is_empty() {
            return Vec::new();
        }
        self.tree.leading_of(range.start)
    }

    /// Trivia after the node's last token, up to the end of its line.
    #[must_use]
    pub fn trailing_trivia(&self) -> Vec<Trivia> {
        let range = self.tree.token_range(self.span());
        if range.is_empty() {
            return Vec::new();
        }
        self.tree.trailing_of(range.end - 1)
    }
}

/// Incrementally assembles a [`SyntaxTree`].
///
/// Nodes are opened and closed in document order; every opened node becomes a
/// child of the innermost open node.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<usize>,
    tokens: Vec<Span>,
    comments: Vec<Span>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a node as a child of the innermost open node.
    pub fn open(&mut self, kind: NodeKind, span: Span, field: Option<Field>) {
        let id = self.nodes.len();
        let parent = self.stack.last().copied();
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        self.nodes.push(NodeData {
            kind,
            span,
            parent,
            field,
            children: Vec::new(),
        });
        self.stack.push(id);
    }

    /// Closes the innermost open node.
    pub fn close(&mut self) {
        self.stack.pop();
    }

    /// Records a leaf token.
    pub fn token(&mut self, span: Span) {
        self.tokens.push(span);
    }

    /// Records a comment.
    pub fn comment(&mut self, span: Span) {
        self.comments.push(span);
    }

    /// Finishes the tree over `text`.
    ///
    /// If no root was opened, an empty compilation unit covering the whole
    /// text is created.
    #[must_use]
    pub fn finish(mut self, text: impl Into<String>) -> SyntaxTree {
        let text = text.into();
        if self.nodes.is_empty() {
            self.nodes.push(NodeData {
                kind: NodeKind::CompilationUnit,
                span: Span::new(0, text.len()),
                parent: None,
                field: None,
                children: Vec::new(),
            });
        }
        self.tokens.sort_unstable();
        self.tokens.dedup();
        self.comments.sort_unstable();
        self.comments.dedup();
        let lines = LineIndex::new(&text);
        SyntaxTree {
            text,
            nodes: self.nodes,
            tokens: self.tokens,
            comments: self.comments,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia::TriviaKind;

    /// Builds `class Foo { int x; } // tail` by hand.
    fn sample() -> SyntaxTree {
        let text = "// head\nclass Foo { int x; } // tail\n";
        let mut b = TreeBuilder::new();
        b.open(NodeKind::CompilationUnit, Span::new(0, text.len()), None);
        b.comment(Span::new(0, 7));
        b.open(NodeKind::Class, Span::new(8, 28), None);
        b.token(Span::new(8, 13));
        b.open(NodeKind::Identifier, Span::new(14, 17), Some(Field::Name));
        b.token(Span::new(14, 17));
        b.close();
        b.open(NodeKind::DeclarationList, Span::new(18, 28), Some(Field::Body));
        b.token(Span::new(18, 19));
        b.open(NodeKind::Field, Span::new(20, 26), None);
        b.token(Span::new(20, 23));
        b.token(Span::new(24, 25));
        b.token(Span::new(25, 26));
        b.close();
        b.token(Span::new(27, 28));
        b.close();
        b.close();
        b.comment(Span::new(29, 36));
        b.close();
        b.finish(text)
    }

    #[test]
    fn test_navigation() {
        let tree = sample();
        let class = tree.root().first_child(NodeKind::Class).unwrap();
        assert_eq!(class.name_text(), Some("Foo"));
        let body = class.child_by_field(Field::Body).unwrap();
        assert_eq!(body.parent(), Some(class));
        assert_eq!(tree.nodes().count(), 5);
        assert_eq!(class.tokens().len(), 7);
        assert_eq!(class.start_line(), 1);
    }

    #[test]
    fn test_leading_trivia_from_file_start() {
        let tree = sample();
        let class = tree.root().first_child(NodeKind::Class).unwrap();
        let kinds: Vec<_> = class.leading_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TriviaKind::SingleLineComment, TriviaKind::EndOfLine]);
    }

    #[test]
    fn test_trailing_trivia_stop_at_line_break() {
        let tree = sample();
        let class = tree.root().first_child(NodeKind::Class).unwrap();
        let kinds: Vec<_> = class.trailing_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TriviaKind::Whitespace,
                TriviaKind::SingleLineComment,
                TriviaKind::EndOfLine
            ]
        );
    }

    #[test]
    fn test_empty_builder_yields_root() {
        let tree = TreeBuilder::new().finish("x");
        assert_eq!(tree.root().kind(), NodeKind::CompilationUnit);
        assert_eq!(tree.root().span(), Span::new(0, 1));
    }
}
