//! Per-compilation state.
//!
//! A [`CompileContext`] lives for exactly one call to
//! [`PatternCompiler::compile`](crate::PatternCompiler::compile).  It owns
//! the pattern under construction and borrows the caller's constraint table
//! and collaborators.  The per-kind attach steps in [`crate::attach`] are
//! implemented as further `impl` blocks on it.

use stencil_core::{
    CompileError, CompiledPattern, CompilerConfig, ConstraintTable, HandlerId, HandlerKind,
    MatchingHandler, Node, NodeKind, OccurrenceKind, PatternBuilder, ReferenceResolver,
    RegexPredicate, SearchOptimizer, SearchScope, SubstitutionHandler, Template,
    VariableConstraint, simple_predicate,
};
use tracing::trace;

use crate::COMPILER_TARGET;
use crate::fragments::words;

pub(crate) struct CompileContext<'c, 'a> {
    pub(crate) config: &'c CompilerConfig,
    pub(crate) constraints: &'a mut ConstraintTable,
    pub(crate) resolver: &'a dyn ReferenceResolver,
    optimizer: &'a mut dyn SearchOptimizer,
    pub(crate) pattern: PatternBuilder,
    /// Depth of nested code blocks; toplevel nodes sit at depth one.
    pub(crate) block_level: usize,
}

impl<'c, 'a> CompileContext<'c, 'a> {
    pub(crate) fn new(
        config: &'c CompilerConfig,
        constraints: &'a mut ConstraintTable,
        resolver: &'a dyn ReferenceResolver,
        optimizer: &'a mut dyn SearchOptimizer,
    ) -> Self {
        Self {
            config,
            constraints,
            resolver,
            optimizer,
            pattern: PatternBuilder::new(),
            block_level: 0,
        }
    }

    pub(crate) fn finish(self) -> CompiledPattern {
        self.pattern.build()
    }

    /// Creates handlers for every declared variable and every typed
    /// variable written in the template, in that order.
    pub(crate) fn declare_variables(&mut self, template: &Template) -> Result<(), CompileError> {
        let declared: Vec<String> = self
            .constraints
            .iter()
            .map(|constraint| constraint.name().to_owned())
            .collect();
        for name in &declared {
            self.ensure_variable(name)?;
        }
        for node in template.nodes() {
            if let Some(name) = self.typed_var_name(node) {
                self.ensure_variable(name)?;
            }
        }
        Ok(())
    }

    /// Returns the substitution handler of a variable, creating it from the
    /// constraint table if needed.
    pub(crate) fn ensure_variable(&mut self, name: &str) -> Result<HandlerId, CompileError> {
        if let Some(id) = self.pattern.variable_handler_id(name) {
            return Ok(id);
        }

        let substitution = self
            .constraints
            .get(name)
            .map_or_else(
                || SubstitutionHandler::from_constraint(&VariableConstraint::new(name)),
                SubstitutionHandler::from_constraint,
            )
            .map_err(|source| CompileError::invalid_regex(name, source))?;
        let id = self
            .pattern
            .add_handler(MatchingHandler::new(HandlerKind::Substitution(substitution)));
        self.pattern.register_variable(name, id);

        trace!(
            target: COMPILER_TARGET,
            variable = name,
            handler = id.index(),
            "created variable handler"
        );
        Ok(id)
    }

    /// Returns the variable named by a node's typed variable text.
    pub(crate) fn typed_var_name<'t>(&self, node: Node<'t>) -> Option<&'t str> {
        typed_var_text(node).and_then(|text| self.config.typed_var_name(text))
    }

    /// Returns the handler of the variable a node stands for, if any.
    pub(crate) fn real_typed_var(&self, node: Node<'_>) -> Option<HandlerId> {
        self.typed_var_name(node)
            .and_then(|name| self.pattern.variable_handler_id(name))
    }

    /// Returns the handler matching a node, looking through toplevel
    /// markers.
    pub(crate) fn match_handler_id(&self, node: Node<'_>) -> Option<HandlerId> {
        let id = self.pattern.node_handler_id(node.id())?;
        match self.pattern.handler(id)?.kind() {
            HandlerKind::TopLevel(inner) => Some(*inner),
            _ => Some(id),
        }
    }

    pub(crate) fn match_handler(&self, node: Node<'_>) -> Option<&MatchingHandler> {
        self.match_handler_id(node)
            .and_then(|id| self.pattern.handler(id))
    }

    pub(crate) fn register_word(&mut self, word: &str, kind: OccurrenceKind) {
        if !word.is_empty() {
            self.optimizer.register_word(word, kind);
        }
    }

    /// Registers every word of a piece of free text.
    pub(crate) fn register_words(&mut self, text: &str, kind: OccurrenceKind) {
        for word in words(text) {
            self.optimizer.register_word(word, kind);
        }
    }

    /// Registers the alternatives of a variable's predicate, provided they
    /// can be enumerated.
    pub(crate) fn register_predicate_words(&mut self, handler: HandlerId, kind: OccurrenceKind) {
        let alternatives = enumerable_words(&self.pattern, handler);
        for word in &alternatives {
            self.register_word(word, kind);
        }
    }

    /// Registers a name written in code.
    ///
    /// Plain names are registered as they are.  Typed variables contribute
    /// the alternatives of their predicate, or for subtype variables the
    /// names of every subtype of those alternatives.
    pub(crate) fn register_name(&mut self, text: &str) {
        let Some(name) = self.config.typed_var_name(text) else {
            self.register_word(text, OccurrenceKind::Code);
            return;
        };
        let Some(id) = self.pattern.variable_handler_id(name) else {
            return;
        };
        let Some(substitution) = self.pattern.handler(id).and_then(MatchingHandler::as_substitution)
        else {
            return;
        };
        let needs_supers = substitution.needs_supers();
        let include_self = !substitution.is_strict_subtype();

        let alternatives = enumerable_words(&self.pattern, id);
        if !needs_supers {
            for word in &alternatives {
                self.register_word(word, OccurrenceKind::Code);
            }
            return;
        }
        if self.config.search_scope() == SearchScope::Global {
            for class_name in &alternatives {
                self.optimizer
                    .register_descendants(class_name, include_self, self.resolver);
            }
        }
    }
}

fn enumerable_words(pattern: &PatternBuilder, handler: HandlerId) -> Vec<String> {
    pattern
        .handler(handler)
        .and_then(simple_predicate)
        .and_then(RegexPredicate::simple_alternatives)
        .map(|alternatives| alternatives.into_iter().map(str::to_owned).collect())
        .unwrap_or_default()
}

/// Returns the text of a node that may name a typed variable.
///
/// Named declarations are represented by their name; expression statements
/// by their text up to the first semicolon, so a trailing comment does not
/// hide the variable.
pub(crate) fn typed_var_text(node: Node<'_>) -> Option<&str> {
    match node.kind() {
        NodeKind::Class | NodeKind::Method | NodeKind::Field | NodeKind::Variable => {
            node.name_identifier().map(Node::text)
        }
        NodeKind::Identifier
        | NodeKind::ReferenceExpression
        | NodeKind::ReferenceElement
        | NodeKind::TypeElement
        | NodeKind::DocTagValue => Some(node.text()),
        NodeKind::ExpressionStatement => {
            let text = node.text();
            let statement = text.split_once(';').map_or(text, |(before, _)| before);
            Some(statement.trim_end())
        }
        _ => None,
    }
}
