//! Arena representation of a parsed search template.
//!
//! Templates are produced by an external host-language parser and handed to
//! the compiler read-only.  Nodes live in a flat arena and are addressed by
//! [`NodeId`], so compiled patterns can refer to template nodes without
//! borrowing the tree or mutating it.

use std::fmt;

/// Stable identity of a node within one [`Template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Syntactic kind of a template node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A class, interface or enum declaration.
    Class,
    /// A method declaration.
    Method,
    /// A field declaration.
    Field,
    /// A static or instance class initializer.
    ClassInitializer,
    /// A local variable or parameter declarator.
    Variable,
    /// A statement declaring one or more local variables.
    DeclarationStatement,
    /// A statement wrapping a nested code block.
    BlockStatement,
    /// A statement consisting of a single expression.
    ExpressionStatement,
    /// A possibly qualified reference used as an expression.
    ReferenceExpression,
    /// A method invocation.
    MethodCall,
    /// A literal such as a quoted string or number.
    LiteralExpression,
    /// A possibly qualified type or class reference.
    ReferenceElement,
    /// A documentation comment (`/** ... */`).
    DocComment,
    /// A tag inside a documentation comment, such as `@param`.
    DocTag,
    /// A value token inside a documentation tag.
    DocTagValue,
    /// A line or block comment.
    Comment,
    /// A braced sequence of statements.
    CodeBlock,
    /// The root of a parsed file.
    CompilationUnit,
    /// A bare identifier token.
    Identifier,
    /// A type as written in a declaration.
    TypeElement,
    /// The `<...>` type argument list of a reference.
    TypeArgumentList,
    /// The `(...)` argument list of a call.
    ArgumentList,
    /// Whitespace between tokens.
    Whitespace,
    /// A region the parser could not make sense of.
    ErrorElement,
    /// Any node the parser does not classify further.
    Other,
}

impl NodeKind {
    /// Returns whether this kind is a reference expression or element.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::ReferenceExpression | Self::ReferenceElement)
    }

    /// Returns whether this kind is a plain or documentation comment.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment | Self::DocComment)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed search template.
///
/// # Example
///
/// ```
/// use stencil_core::{NodeKind, TemplateBuilder};
///
/// let mut builder = TemplateBuilder::new();
/// let reference = builder.reference_expression("java.util.List");
/// let template = builder.finish(reference);
///
/// let root = template.root().expect("root node");
/// assert_eq!(root.kind(), NodeKind::ReferenceExpression);
/// assert_eq!(root.qualifier().map(|q| q.text()), Some("java.util"));
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Template {
    /// Returns the root node, if the template holds one.
    #[must_use]
    pub fn root(&self) -> Option<Node<'_>> {
        self.node(self.root)
    }

    /// Looks up a node by identity.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        self.nodes.get(id.0).map(|data| Node {
            template: self,
            id,
            data,
        })
    }

    /// Returns every node of the template in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        self.nodes.iter().enumerate().map(|(index, data)| Node {
            template: self,
            id: NodeId(index),
            data,
        })
    }

    /// Returns the number of nodes in the template.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the template holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Read-only view of one template node.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    template: &'t Template,
    id: NodeId,
    data: &'t NodeData,
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.data.kind)
            .field("text", &self.data.text)
            .finish()
    }
}

impl<'t> Node<'t> {
    /// Returns the node identity.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// Returns the node kind.
    #[must_use]
    pub const fn kind(self) -> NodeKind {
        self.data.kind
    }

    /// Returns the source text covered by the node.
    #[must_use]
    pub fn text(self) -> &'t str {
        &self.data.text
    }

    /// Returns the template the node belongs to.
    #[must_use]
    pub const fn template(self) -> &'t Template {
        self.template
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.data.parent.and_then(|id| self.template.node(id))
    }

    /// Returns the children in source order.
    pub fn children(self) -> impl Iterator<Item = Node<'t>> + 't {
        let template = self.template;
        self.data
            .children
            .iter()
            .filter_map(move |id| template.node(*id))
    }

    /// Returns the children that are not whitespace.
    pub fn significant_children(self) -> impl Iterator<Item = Node<'t>> + 't {
        self.children()
            .filter(|child| child.kind() != NodeKind::Whitespace)
    }

    /// Returns the first child of the given kind.
    #[must_use]
    pub fn first_child_of_kind(self, kind: NodeKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }

    /// Returns the sibling immediately before this node.
    #[must_use]
    pub fn prev_sibling(self) -> Option<Self> {
        let siblings: Vec<_> = self.parent()?.children().collect();
        let position = siblings.iter().position(|s| s.id == self.id)?;
        position
            .checked_sub(1)
            .and_then(|before| siblings.get(before).copied())
    }

    /// Returns the sibling immediately after this node.
    #[must_use]
    pub fn next_sibling(self) -> Option<Self> {
        let mut siblings = self.parent()?.children();
        siblings.find(|s| s.id == self.id)?;
        siblings.next()
    }

    /// Returns the closest preceding sibling that is not whitespace.
    #[must_use]
    pub fn prev_non_whitespace_sibling(self) -> Option<Self> {
        let mut current = self.prev_sibling();
        while let Some(sibling) = current {
            if sibling.kind() != NodeKind::Whitespace {
                return Some(sibling);
            }
            current = sibling.prev_sibling();
        }
        None
    }

    /// Returns the name identifier of a reference: its last identifier child.
    #[must_use]
    pub fn reference_name(self) -> Option<Self> {
        self.children()
            .filter(|child| child.kind() == NodeKind::Identifier)
            .last()
    }

    /// Returns the qualifier of a reference.
    ///
    /// The qualifier is the first significant child written before the
    /// reference name, so `a.b.C` has the qualifier `a.b`.
    #[must_use]
    pub fn qualifier(self) -> Option<Self> {
        let name = self.reference_name()?;
        self.significant_children()
            .take_while(|child| child.id != name.id)
            .find(|child| !matches!(child.kind(), NodeKind::Comment | NodeKind::ErrorElement))
    }

    /// Returns the `<...>` type argument list of a reference.
    #[must_use]
    pub fn type_arguments(self) -> Option<Self> {
        self.first_child_of_kind(NodeKind::TypeArgumentList)
    }

    /// Returns the name identifier of a named declaration.
    #[must_use]
    pub fn name_identifier(self) -> Option<Self> {
        self.first_child_of_kind(NodeKind::Identifier)
    }

    /// Returns the innermost component reference of a type element.
    ///
    /// Array and wrapped types nest type elements; the innermost reference is
    /// the first reference element found walking down through them.
    #[must_use]
    pub fn innermost_reference(self) -> Option<Self> {
        if let Some(reference) = self.first_child_of_kind(NodeKind::ReferenceElement) {
            return Some(reference);
        }
        self.first_child_of_kind(NodeKind::TypeElement)
            .and_then(Self::innermost_reference)
    }
}

/// Builds a [`Template`] bottom-up.
///
/// Children are created first and handed to [`TemplateBuilder::node`], which
/// links them to their new parent.
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    nodes: Vec<NodeData>,
}

impl TemplateBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node without children.
    pub fn leaf(&mut self, kind: NodeKind, text: impl Into<String>) -> NodeId {
        self.node(kind, text, [])
    }

    /// Adds a node and adopts `children` in order.
    pub fn node(
        &mut self,
        kind: NodeKind,
        text: impl Into<String>,
        children: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let adopted: Vec<NodeId> = children.into_iter().collect();
        for child in &adopted {
            if let Some(data) = self.nodes.get_mut(child.0) {
                data.parent = Some(id);
            }
        }
        self.nodes.push(NodeData {
            kind,
            text: text.into(),
            parent: None,
            children: adopted,
        });
        id
    }

    /// Adds an identifier token.
    pub fn identifier(&mut self, text: &str) -> NodeId {
        self.leaf(NodeKind::Identifier, text)
    }

    /// Adds a whitespace token.
    pub fn whitespace(&mut self, text: &str) -> NodeId {
        self.leaf(NodeKind::Whitespace, text)
    }

    /// Adds a reference expression for a dotted name, nesting qualifiers.
    pub fn reference_expression(&mut self, qualified: &str) -> NodeId {
        self.qualified_reference(NodeKind::ReferenceExpression, qualified)
    }

    /// Adds a reference element for a dotted type name, nesting qualifiers.
    pub fn reference_element(&mut self, qualified: &str) -> NodeId {
        self.qualified_reference(NodeKind::ReferenceElement, qualified)
    }

    /// Adds a type element wrapping a reference element for `qualified`.
    pub fn type_element(&mut self, qualified: &str) -> NodeId {
        let reference = self.reference_element(qualified);
        self.node(NodeKind::TypeElement, qualified, [reference])
    }

    fn qualified_reference(&mut self, kind: NodeKind, qualified: &str) -> NodeId {
        let mut written = String::new();
        let mut qualifier: Option<NodeId> = None;
        for segment in qualified.split('.') {
            if !written.is_empty() {
                written.push('.');
            }
            written.push_str(segment);
            let name = self.identifier(segment);
            let children: Vec<NodeId> = qualifier.into_iter().chain([name]).collect();
            qualifier = Some(self.node(kind, written.clone(), children));
        }
        qualifier.unwrap_or_else(|| self.leaf(kind, qualified))
    }

    /// Finishes the template with `root` as its root node.
    #[must_use]
    pub fn finish(self, root: NodeId) -> Template {
        Template {
            nodes: self.nodes,
            root,
        }
    }
}
