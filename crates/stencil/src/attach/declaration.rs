//! Local variables and declaration statements.

use stencil_core::{HandlerKind, MatchingHandler, Node, NodeFilter, NodeKind};
use tracing::trace;

use crate::COMPILER_TARGET;
use crate::context::CompileContext;

impl CompileContext<'_, '_> {
    pub(super) fn attach_variable(&mut self, node: Node<'_>) {
        self.pattern.set_filter(node.id(), NodeFilter::Variable);
        if let Some(name) = node.name_identifier() {
            self.register_name(name.text());
        }
    }

    /// A declaration statement is matched as a whole, together with the
    /// comment written just before it.
    pub(super) fn attach_declaration_statement(&mut self, node: Node<'_>) {
        if self.attach_typed_symbol(node) {
            return;
        }

        let comment = node
            .prev_non_whitespace_sibling()
            .filter(|sibling| sibling.kind().is_comment());
        let comment_handler = comment.and_then(|sibling| self.match_handler_id(sibling));
        let id = self.pattern.attach(
            node.id(),
            MatchingHandler::with_filter(
                HandlerKind::DeclarationStatement {
                    comment: comment_handler,
                },
                NodeFilter::Declaration,
            ),
        );

        if let Some(comment) = comment {
            trace!(
                target: COMPILER_TARGET,
                comment = %comment.id(),
                declaration = %node.id(),
                "merged leading comment into declaration"
            );
            self.pattern.set_node_handler(comment.id(), id);
        }
    }

    /// Handles a parameterised variable type written with no variable name,
    /// such as `__$_T<__$_E>;`.
    ///
    /// Returns `false` if the statement does not have that shape.
    fn attach_typed_symbol(&mut self, node: Node<'_>) -> bool {
        let Some(reference) = node
            .significant_children()
            .next()
            .filter(|child| child.kind() == NodeKind::TypeElement)
            .and_then(Node::innermost_reference)
        else {
            return false;
        };
        let Some(arguments) = reference.type_arguments() else {
            return false;
        };
        let parameters: Vec<Node<'_>> = arguments
            .children()
            .filter(|child| child.kind() == NodeKind::TypeElement)
            .collect();
        if parameters.is_empty() || !self.names_variable(reference) {
            return false;
        }

        self.pattern.attach(
            node.id(),
            MatchingHandler::with_filter(HandlerKind::TypedSymbol, NodeFilter::TypedSymbol),
        );
        for parameter in parameters {
            if parameter
                .innermost_reference()
                .is_some_and(|inner| self.names_variable(inner))
            {
                self.pattern
                    .set_filter(parameter.id(), NodeFilter::TypeParameter);
            }
        }
        trace!(
            target: COMPILER_TARGET,
            node = %node.id(),
            "declaration is a typed symbol"
        );
        true
    }

    /// Returns whether a reference's name is a declared variable.
    fn names_variable(&self, reference: Node<'_>) -> bool {
        reference
            .reference_name()
            .is_some_and(|name| self.real_typed_var(name).is_some())
    }
}
