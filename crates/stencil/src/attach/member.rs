//! Classes and their members.

use stencil_core::{
    CompileError, MatchingHandler, Node, NodeFilter, NodeKind, OccurrenceKind, VariableConstraint,
};
use tracing::trace;

use crate::COMPILER_TARGET;
use crate::context::CompileContext;

impl CompileContext<'_, '_> {
    /// An initializer whose body is a single variable statement matches
    /// like that statement.
    pub(super) fn attach_class_initializer(&mut self, node: Node<'_>) {
        let Some(body) = node.first_child_of_kind(NodeKind::CodeBlock) else {
            return;
        };
        let mut statements = body
            .significant_children()
            .filter(|child| !child.kind().is_comment());
        let (Some(statement), None) = (statements.next(), statements.next()) else {
            return;
        };
        if statement.kind() != NodeKind::ExpressionStatement {
            return;
        }

        let copy = self
            .match_handler(statement)
            .filter(|handler| handler.is_substitution())
            .cloned();
        if let Some(handler) = copy {
            trace!(
                target: COMPILER_TARGET,
                node = %node.id(),
                "initializer copies its statement's variable"
            );
            self.pattern.attach(node.id(), handler);
        }
    }

    pub(super) fn attach_field(&mut self, node: Node<'_>) {
        if self.needs_supers(node) {
            self.pattern.set_requests_super_fields();
        }
        self.pattern.set_filter(node.id(), NodeFilter::Variable);
        if let Some(name) = node.name_identifier() {
            self.register_name(name.text());
        }
    }

    pub(super) fn attach_method(&mut self, node: Node<'_>) {
        if self.needs_supers(node) {
            self.pattern.set_requests_super_methods();
        }
        self.pattern.set_filter(node.id(), NodeFilter::Method);
        self.register_declared_name(node);
    }

    pub(super) fn attach_class(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        if self.needs_supers(node) {
            self.pattern.set_requests_super_inners();
        }
        self.pattern.set_filter(node.id(), NodeFilter::Class);
        self.register_declared_name(node);
        self.bind_class_content(node)
    }

    fn needs_supers(&self, node: Node<'_>) -> bool {
        self.pattern
            .node_handler(node.id())
            .and_then(MatchingHandler::as_substitution)
            .is_some_and(|substitution| substitution.needs_supers())
    }

    /// Registers a declaration's name unless it is a typed variable.
    fn register_declared_name(&mut self, node: Node<'_>) {
        let Some(name) = node.name_identifier() else {
            return;
        };
        if self.config.typed_var_name(name.text()).is_none() {
            self.register_word(name.text(), OccurrenceKind::Code);
        }
    }

    /// Names the variable that absorbs class members the pattern does not
    /// list.
    ///
    /// A type element followed by an error element, as the parser produces
    /// for a lone variable in a class body, names it explicitly.  Otherwise
    /// the reserved class content variable is used, and declared on first
    /// use as an optional, unbounded target.
    fn bind_class_content(&mut self, class: Node<'_>) -> Result<(), CompileError> {
        if let Some(name) = class
            .children()
            .find_map(|child| self.explicit_content_variable(child))
        {
            self.pattern.set_class_content_variable(class.id(), name);
            return Ok(());
        }

        let config = self.config;
        let name = config.class_content_var_name();
        let declared = self.constraints.insert_if_absent(
            VariableConstraint::new(name)
                .with_count(0, None)
                .target(),
        );
        self.ensure_variable(name)?;
        self.pattern.set_class_content_variable(class.id(), name);

        trace!(
            target: COMPILER_TARGET,
            class = %class.id(),
            variable = name,
            declared,
            "bound implicit class content variable"
        );
        Ok(())
    }

    fn explicit_content_variable(&self, child: Node<'_>) -> Option<String> {
        let followed_by_error = child
            .next_sibling()
            .is_some_and(|sibling| sibling.kind() == NodeKind::ErrorElement);
        if child.kind() != NodeKind::TypeElement || !followed_by_error {
            return None;
        }
        self.pattern
            .node_handler(child.id())
            .and_then(MatchingHandler::as_substitution)
            .map(|substitution| substitution.name().to_owned())
    }
}
