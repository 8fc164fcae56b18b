//! References and method calls.
//!
//! A reference to a class is normalised to a synthetic variable whose regex
//! is the class's qualified name, so `List` and `java.util.List` in a
//! pattern match the same code.

use stencil_core::{
    ClassRef, CompileError, HandlerKind, MatchingHandler, Node, NodeFilter, NodeKind,
    RegexPredicate, SubstitutionHandler,
};
use tracing::trace;

use crate::COMPILER_TARGET;
use crate::classify::{Role, classify};
use crate::context::CompileContext;

impl CompileContext<'_, '_> {
    pub(super) fn attach_reference(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        let parent_kind = node.parent().map(Node::kind);
        let typed_var_processed = node.kind() == NodeKind::ReferenceExpression
            && self.real_typed_var(node).is_some()
            && node.qualifier().is_none()
            && parent_kind != Some(NodeKind::ExpressionStatement);
        if typed_var_processed {
            self.pattern.set_filter(node.id(), NodeFilter::Expression);
        }

        if parent_kind != Some(NodeKind::MethodCall)
            && let Some(name) = node.reference_name()
        {
            self.register_name(name.text());
        }

        if !typed_var_processed && !self.has_substitution(node) {
            self.compact_reference(node)?;
        }

        if classify(node) == Role::Type {
            self.pattern.set_filter(node.id(), NodeFilter::Type);
        }
        Ok(())
    }

    pub(super) fn attach_method_call(&mut self, node: Node<'_>) {
        let method_name = node
            .first_child_of_kind(NodeKind::ReferenceExpression)
            .and_then(Node::reference_name);
        if let Some(name) = method_name {
            self.register_name(name.text());
        }
    }

    /// Replaces a class reference by a synthetic variable matching its
    /// qualified name.
    ///
    /// Unresolved references qualify when they are capitalised or stand
    /// alone.  References whose qualifier chain contains a variable or a
    /// non-reference are left alone.
    fn compact_reference(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        let resolved = self.resolver.resolve_identifier(node);
        let capitalised = node
            .reference_name()
            .and_then(|name| name.text().chars().next())
            .is_some_and(char::is_uppercase);
        let standalone = node.qualifier().is_none() && !is_qualifier(node);
        if !(resolved.is_some() || capitalised || standalone) || self.qualifier_chain_blocked(node)
        {
            return Ok(());
        }

        let text = resolved
            .as_ref()
            .map_or_else(|| node.text(), ClassRef::qualified_name);
        let name = format!("__{}", text.replace('.', "_"));
        let predicate = RegexPredicate::literal(text)
            .map_err(|source| CompileError::invalid_regex(name.as_str(), source))?;
        let min_count = u32::from(!is_qualifier(node));

        trace!(
            target: COMPILER_TARGET,
            node = %node.id(),
            variable = name.as_str(),
            min_count,
            "normalised class reference"
        );
        let synthetic = SubstitutionHandler::synthetic(name, predicate, min_count, Some(1));
        self.pattern.attach(
            node.id(),
            MatchingHandler::new(HandlerKind::Substitution(synthetic)),
        );
        Ok(())
    }

    fn qualifier_chain_blocked(&self, node: Node<'_>) -> bool {
        let mut current = node;
        while let Some(qualifier) = current.qualifier() {
            if qualifier.kind() != node.kind() || self.has_substitution(qualifier) {
                return true;
            }
            current = qualifier;
        }
        false
    }

    pub(super) fn has_substitution(&self, node: Node<'_>) -> bool {
        self.pattern
            .node_handler(node.id())
            .is_some_and(MatchingHandler::is_substitution)
    }
}

/// Returns whether `node` qualifies an enclosing reference, as `java.util`
/// does in `java.util.List`.
fn is_qualifier(node: Node<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == node.kind() && parent.qualifier().map(Node::id) == Some(node.id())
    })
}
