//! Statements and documentation comments.

use stencil_core::{
    CompileError, HandlerKind, MatchAs, MatchingHandler, Node, NodeFilter, NodeKind,
};
use tracing::trace;

use crate::COMPILER_TARGET;
use crate::classify::{Role, classify};
use crate::context::CompileContext;

impl CompileContext<'_, '_> {
    /// Statements written without a terminating semicolon are expressions
    /// standing on their own line; terminated ones are real statements.
    pub(super) fn attach_expression_statement(&mut self, node: Node<'_>) {
        let Some(expression) = node
            .significant_children()
            .find(|child| !child.kind().is_comment())
        else {
            return;
        };
        if is_terminated(node) {
            self.attach_variable_statement(expression);
        } else {
            self.attach_bare_expression(node, expression);
        }
    }

    fn attach_bare_expression(&mut self, node: Node<'_>, expression: Node<'_>) {
        let substitution = self
            .pattern
            .node_handler_id(expression.id())
            .filter(|id| {
                self.pattern
                    .handler(*id)
                    .is_some_and(MatchingHandler::is_substitution)
            });

        if expression.kind() == NodeKind::ReferenceExpression
            && expression.qualifier().is_none()
            && let Some(inner) = substitution
        {
            if let Some(handler) = self.pattern.handler_mut(inner) {
                handler.set_filter(NodeFilter::Symbol);
            }
            self.pattern.attach(
                node.id(),
                MatchingHandler::with_filter(HandlerKind::Symbol(inner), NodeFilter::Symbol),
            );
            trace!(
                target: COMPILER_TARGET,
                node = %node.id(),
                "bare reference matches as a symbol"
            );
            return;
        }

        let filter = if classify(expression) == Role::Literal {
            NodeFilter::Constant
        } else {
            NodeFilter::Expression
        };
        self.pattern.attach(
            node.id(),
            MatchingHandler::with_filter(HandlerKind::Expression, filter),
        );
    }

    /// A statement consisting of a variable matches whole statements.
    fn attach_variable_statement(&mut self, expression: Node<'_>) {
        if expression.kind() != NodeKind::ReferenceExpression {
            return;
        }
        let Some(id) = self.real_typed_var(expression) else {
            return;
        };
        let Some(handler) = self
            .pattern
            .handler_mut(id)
            .filter(|handler| handler.is_substitution())
        else {
            return;
        };
        handler.set_filter(NodeFilter::Statement);
        if let Some(substitution) = handler.as_substitution_mut() {
            substitution.set_match_as(MatchAs::Statement);
        }
    }

    pub(super) fn attach_block_statement(&mut self, node: Node<'_>) {
        self.pattern.set_filter(node.id(), NodeFilter::Block);
    }

    /// Doc comments accept the same variable markers as other comments.
    /// Structured doc comments leave their text to their tags.
    pub(super) fn attach_doc_comment(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        let has_tags = node
            .children()
            .any(|child| child.kind() == NodeKind::DocTag);
        if !has_tags {
            self.attach_comment(node)?;
        }
        self.pattern.set_filter(node.id(), NodeFilter::JavaDoc);
        Ok(())
    }

    /// Tag values not bound to a variable match as plain documentation
    /// data.
    pub(super) fn attach_doc_tag(&mut self, node: Node<'_>) {
        let values: Vec<Node<'_>> = node
            .children()
            .filter(|child| child.kind() == NodeKind::DocTagValue)
            .filter(|child| !self.has_substitution(*child))
            .collect();
        for value in values {
            self.pattern
                .attach(value.id(), MatchingHandler::new(HandlerKind::DocData));
        }
    }
}

/// Returns whether a statement ends in a semicolon or a trailing comment
/// rather than standing as a bare expression.
fn is_terminated(node: Node<'_>) -> bool {
    let ends_in_comment = node
        .significant_children()
        .last()
        .is_some_and(|child| child.kind().is_comment());
    ends_in_comment || node.text().trim_end().ends_with(';')
}
