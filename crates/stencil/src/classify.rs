//! Node classification.

use std::fmt;

use stencil_core::{Node, NodeKind};

/// Structural role of a template node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// An expression, including references used as values.
    Expression,
    /// A statement other than a declaration.
    Statement,
    /// A local variable declaration.
    Declaration,
    /// A class declaration.
    Class,
    /// A method declaration.
    Method,
    /// A field declaration.
    Field,
    /// A documentation comment.
    DocComment,
    /// A documentation tag or one of its values.
    DocTag,
    /// A literal constant.
    Literal,
    /// A line or block comment.
    Comment,
    /// A code block, compilation unit or initializer.
    Block,
    /// A bare identifier token.
    Symbol,
    /// A type, including class references in `extends` and `implements`.
    Type,
    /// Anything else.
    Generic,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Expression => "expression",
            Self::Statement => "statement",
            Self::Declaration => "declaration",
            Self::Class => "class",
            Self::Method => "method",
            Self::Field => "field",
            Self::DocComment => "doc comment",
            Self::DocTag => "doc tag",
            Self::Literal => "literal",
            Self::Comment => "comment",
            Self::Block => "block",
            Self::Symbol => "symbol",
            Self::Type => "type",
            Self::Generic => "generic",
        };
        f.write_str(label)
    }
}

/// Classifies a template node by its kind and position.
///
/// Reference elements listed directly under a class (its `extends` and
/// `implements` entries) are types; every other reference is an expression.
///
/// # Example
///
/// ```
/// use stencil::{NodeKind, Role, TemplateBuilder, classify};
///
/// let mut builder = TemplateBuilder::new();
/// let literal = builder.leaf(NodeKind::LiteralExpression, "42");
/// let template = builder.finish(literal);
///
/// let root = template.root().expect("root");
/// assert_eq!(classify(root), Role::Literal);
/// ```
#[must_use]
pub fn classify(node: Node<'_>) -> Role {
    match node.kind() {
        NodeKind::ReferenceElement if is_class_supertype(node) => Role::Type,
        NodeKind::ReferenceExpression | NodeKind::ReferenceElement | NodeKind::MethodCall => {
            Role::Expression
        }
        NodeKind::ExpressionStatement | NodeKind::BlockStatement => Role::Statement,
        NodeKind::DeclarationStatement | NodeKind::Variable => Role::Declaration,
        NodeKind::Class => Role::Class,
        NodeKind::Method => Role::Method,
        NodeKind::Field => Role::Field,
        NodeKind::DocComment => Role::DocComment,
        NodeKind::DocTag | NodeKind::DocTagValue => Role::DocTag,
        NodeKind::LiteralExpression => Role::Literal,
        NodeKind::Comment => Role::Comment,
        NodeKind::CodeBlock | NodeKind::CompilationUnit | NodeKind::ClassInitializer => Role::Block,
        NodeKind::Identifier => Role::Symbol,
        NodeKind::TypeElement | NodeKind::TypeArgumentList => Role::Type,
        NodeKind::ArgumentList | NodeKind::Whitespace | NodeKind::ErrorElement | NodeKind::Other => {
            Role::Generic
        }
    }
}

fn is_class_supertype(node: Node<'_>) -> bool {
    node.parent()
        .and_then(Node::parent)
        .is_some_and(|grandparent| grandparent.kind() == NodeKind::Class)
}
