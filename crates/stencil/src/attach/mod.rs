//! The handler attacher.
//!
//! Templates are walked depth first.  Each node first receives the handler
//! of the variable it stands for, if any; then its children are visited;
//! then a kind-specific step refines or replaces that handler.  Code blocks
//! and compilation units are visited by [`CompileContext::visit_container`],
//! which also selects the toplevel matching strategy.

mod comment;
mod declaration;
mod member;
mod reference;
mod statement;

use stencil_core::{CompileError, HandlerKind, MatchingHandler, MatchingStrategy, Node, NodeKind};
use tracing::debug;

use crate::COMPILER_TARGET;
use crate::context::CompileContext;
use crate::strategy::{fold_strategy, implied_strategy};

impl CompileContext<'_, '_> {
    /// Compiles `node` and its subtree.
    pub(crate) fn visit(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        self.bind_typed_var(node);

        if matches!(node.kind(), NodeKind::CodeBlock | NodeKind::CompilationUnit) {
            return self.visit_container(node);
        }
        for child in node.significant_children() {
            self.visit(child)?;
        }
        self.attach(node)
    }

    /// Attaches the handler of the variable a node stands for.
    ///
    /// Nodes that already carry a handler keep it.  The first node bound to
    /// a target variable becomes the pattern's target node.
    fn bind_typed_var(&mut self, node: Node<'_>) {
        if self.pattern.node_handler_id(node.id()).is_some() {
            return;
        }
        let Some(id) = self.real_typed_var(node) else {
            return;
        };
        self.pattern.set_node_handler(node.id(), id);

        let is_target = self
            .pattern
            .handler(id)
            .and_then(MatchingHandler::as_substitution)
            .is_some_and(|substitution| substitution.is_target());
        if is_target {
            self.pattern.record_target_node(node.id());
        }
    }

    fn visit_container(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        self.block_level += 1;
        let mut strategy = None;

        for child in node.significant_children() {
            self.visit(child)?;
            if self.block_level == 1 {
                let implied = self.mark_toplevel(child);
                strategy = Some(fold_strategy(strategy, implied)?);
            }
        }

        if self.block_level == 1 {
            let committed = strategy.unwrap_or(MatchingStrategy::Expression);
            debug!(
                target: COMPILER_TARGET,
                strategy = %committed,
                "selected toplevel matching strategy"
            );
            self.pattern.set_strategy(committed);
        }
        self.block_level -= 1;
        Ok(())
    }

    /// Wraps a toplevel node's handler and returns the strategy it implies.
    fn mark_toplevel(&mut self, node: Node<'_>) -> MatchingStrategy {
        let inner = self.pattern.ensure_node_handler(node.id());
        let inner_handler = self.pattern.handler(inner);
        let implied = implied_strategy(node, inner_handler);
        let filter = inner_handler.and_then(MatchingHandler::filter);

        let mut wrapped = MatchingHandler::new(HandlerKind::TopLevel(inner));
        if let Some(filter) = filter {
            wrapped.set_filter(filter);
        }
        self.pattern.attach(node.id(), wrapped);
        implied
    }

    fn attach(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        match node.kind() {
            NodeKind::Comment => self.attach_comment(node)?,
            NodeKind::LiteralExpression => self.attach_literal(node)?,
            NodeKind::ClassInitializer => self.attach_class_initializer(node),
            NodeKind::Field => self.attach_field(node),
            NodeKind::Method => self.attach_method(node),
            NodeKind::Class => self.attach_class(node)?,
            NodeKind::ReferenceExpression | NodeKind::ReferenceElement => {
                self.attach_reference(node)?;
            }
            NodeKind::MethodCall => self.attach_method_call(node),
            NodeKind::Variable => self.attach_variable(node),
            NodeKind::DeclarationStatement => self.attach_declaration_statement(node),
            NodeKind::DocComment => self.attach_doc_comment(node)?,
            NodeKind::DocTag => self.attach_doc_tag(node),
            NodeKind::BlockStatement => self.attach_block_statement(node),
            NodeKind::ExpressionStatement => self.attach_expression_statement(node),
            NodeKind::CodeBlock
            | NodeKind::CompilationUnit
            | NodeKind::Identifier
            | NodeKind::TypeElement
            | NodeKind::TypeArgumentList
            | NodeKind::ArgumentList
            | NodeKind::DocTagValue
            | NodeKind::Whitespace
            | NodeKind::ErrorElement
            | NodeKind::Other => {}
        }
        Ok(())
    }
}
