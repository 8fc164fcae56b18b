//! The compiled pattern and the builder that assembles it.

use std::collections::BTreeMap;

use crate::handler::{HandlerId, HandlerKind, MatchingHandler, NodeFilter, RegexPredicate};
use crate::strategy::MatchingStrategy;
use crate::template::NodeId;

/// The frozen result of compiling a template.
///
/// Handlers live in an arena; template nodes and named variables refer to
/// them by [`HandlerId`], so one handler may serve several nodes.  A pattern
/// has no public mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    handlers: Vec<MatchingHandler>,
    node_handlers: BTreeMap<NodeId, HandlerId>,
    variables: BTreeMap<String, HandlerId>,
    strategy: MatchingStrategy,
    requests_super_fields: bool,
    requests_super_methods: bool,
    requests_super_inners: bool,
    class_content_variables: BTreeMap<NodeId, String>,
    target_node: Option<NodeId>,
}

impl CompiledPattern {
    /// Looks up a handler by identity.
    #[must_use]
    pub fn handler(&self, id: HandlerId) -> Option<&MatchingHandler> {
        self.handlers.get(id.index())
    }

    /// Returns the identity of the handler attached to `node`.
    #[must_use]
    pub fn handler_id(&self, node: NodeId) -> Option<HandlerId> {
        self.node_handlers.get(&node).copied()
    }

    /// Returns the handler attached to `node`.
    #[must_use]
    pub fn handler_for(&self, node: NodeId) -> Option<&MatchingHandler> {
        self.handler_id(node).and_then(|id| self.handler(id))
    }

    /// Returns the handler that actually matches `node`.
    ///
    /// Toplevel markers are looked through, so for a toplevel child this is
    /// the handler it received before being marked.
    #[must_use]
    pub fn match_handler_id(&self, node: NodeId) -> Option<HandlerId> {
        let id = self.handler_id(node)?;
        match self.handler(id)?.kind() {
            HandlerKind::TopLevel(inner) => Some(*inner),
            _ => Some(id),
        }
    }

    /// Returns the handler that actually matches `node`.
    #[must_use]
    pub fn match_handler_for(&self, node: NodeId) -> Option<&MatchingHandler> {
        self.match_handler_id(node).and_then(|id| self.handler(id))
    }

    /// Returns the identity of a named variable's substitution handler.
    #[must_use]
    pub fn variable_handler_id(&self, name: &str) -> Option<HandlerId> {
        self.variables.get(name).copied()
    }

    /// Returns a named variable's substitution handler.
    #[must_use]
    pub fn variable_handler(&self, name: &str) -> Option<&MatchingHandler> {
        self.variable_handler_id(name).and_then(|id| self.handler(id))
    }

    /// Returns the names of all variables, in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Maps each user-visible variable carrying a regex to its predicate.
    ///
    /// Synthetic handlers for normalised references are left out.
    #[must_use]
    pub fn typed_var_predicates(&self) -> BTreeMap<&str, &RegexPredicate> {
        self.variables
            .iter()
            .filter_map(|(name, id)| {
                let substitution = self.handler(*id)?.as_substitution()?;
                if substitution.is_synthetic() {
                    return None;
                }
                substitution
                    .predicate()
                    .map(|predicate| (name.as_str(), predicate))
            })
            .collect()
    }

    /// Returns the toplevel matching strategy.
    #[must_use]
    pub const fn strategy(&self) -> MatchingStrategy {
        self.strategy
    }

    /// Returns whether matching must consider inherited fields.
    #[must_use]
    pub const fn requests_super_fields(&self) -> bool {
        self.requests_super_fields
    }

    /// Returns whether matching must consider inherited methods.
    #[must_use]
    pub const fn requests_super_methods(&self) -> bool {
        self.requests_super_methods
    }

    /// Returns whether matching must consider inherited inner classes.
    #[must_use]
    pub const fn requests_super_inners(&self) -> bool {
        self.requests_super_inners
    }

    /// Returns the variable absorbing unlisted members of a class node.
    #[must_use]
    pub fn class_content_variable(&self, class: NodeId) -> Option<&str> {
        self.class_content_variables.get(&class).map(String::as_str)
    }

    /// Returns the node bound to the first target variable.
    #[must_use]
    pub const fn target_node(&self) -> Option<NodeId> {
        self.target_node
    }

    /// Returns every handler with its identity.
    pub fn handlers(&self) -> impl Iterator<Item = (HandlerId, &MatchingHandler)> {
        self.handlers
            .iter()
            .enumerate()
            .map(|(index, handler)| (HandlerId::new(index), handler))
    }
}

/// Mutable state of a pattern under construction.
///
/// The compiler owns the builder for the duration of one traversal and
/// freezes it with [`PatternBuilder::build`].
#[derive(Debug, Default)]
pub struct PatternBuilder {
    handlers: Vec<MatchingHandler>,
    node_handlers: BTreeMap<NodeId, HandlerId>,
    variables: BTreeMap<String, HandlerId>,
    strategy: MatchingStrategy,
    requests_super_fields: bool,
    requests_super_methods: bool,
    requests_super_inners: bool,
    class_content_variables: BTreeMap<NodeId, String>,
    target_node: Option<NodeId>,
}

impl PatternBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a handler and returns its identity.
    pub fn add_handler(&mut self, handler: MatchingHandler) -> HandlerId {
        let id = HandlerId::new(self.handlers.len());
        self.handlers.push(handler);
        id
    }

    /// Points `node` at an existing handler, replacing any previous one.
    pub fn set_node_handler(&mut self, node: NodeId, handler: HandlerId) {
        self.node_handlers.insert(node, handler);
    }

    /// Stores a handler and attaches it to `node`.
    pub fn attach(&mut self, node: NodeId, handler: MatchingHandler) -> HandlerId {
        let id = self.add_handler(handler);
        self.set_node_handler(node, id);
        id
    }

    /// Returns the identity of the handler attached to `node`.
    #[must_use]
    pub fn node_handler_id(&self, node: NodeId) -> Option<HandlerId> {
        self.node_handlers.get(&node).copied()
    }

    /// Looks up a handler by identity.
    #[must_use]
    pub fn handler(&self, id: HandlerId) -> Option<&MatchingHandler> {
        self.handlers.get(id.index())
    }

    /// Looks up a handler by identity for modification.
    pub fn handler_mut(&mut self, id: HandlerId) -> Option<&mut MatchingHandler> {
        self.handlers.get_mut(id.index())
    }

    /// Returns the handler attached to `node`.
    #[must_use]
    pub fn node_handler(&self, node: NodeId) -> Option<&MatchingHandler> {
        self.node_handler_id(node).and_then(|id| self.handler(id))
    }

    /// Returns the handler attached to `node`, creating a simple one if the
    /// node has none.
    pub fn ensure_node_handler(&mut self, node: NodeId) -> HandlerId {
        if let Some(id) = self.node_handler_id(node) {
            return id;
        }
        self.attach(node, MatchingHandler::new(HandlerKind::Simple))
    }

    /// Sets the filter of the handler attached to `node`, creating a simple
    /// handler if needed.
    pub fn set_filter(&mut self, node: NodeId, filter: NodeFilter) {
        let id = self.ensure_node_handler(node);
        if let Some(handler) = self.handler_mut(id) {
            handler.set_filter(filter);
        }
    }

    /// Returns the handler identity registered for a variable name.
    #[must_use]
    pub fn variable_handler_id(&self, name: &str) -> Option<HandlerId> {
        self.variables.get(name).copied()
    }

    /// Registers the substitution handler of a named variable.
    pub fn register_variable(&mut self, name: impl Into<String>, handler: HandlerId) {
        self.variables.insert(name.into(), handler);
    }

    /// Sets the toplevel matching strategy.
    pub const fn set_strategy(&mut self, strategy: MatchingStrategy) {
        self.strategy = strategy;
    }

    /// Requests that inherited fields be considered.
    pub const fn set_requests_super_fields(&mut self) {
        self.requests_super_fields = true;
    }

    /// Requests that inherited methods be considered.
    pub const fn set_requests_super_methods(&mut self) {
        self.requests_super_methods = true;
    }

    /// Requests that inherited inner classes be considered.
    pub const fn set_requests_super_inners(&mut self) {
        self.requests_super_inners = true;
    }

    /// Names the variable absorbing unlisted members of `class`.
    pub fn set_class_content_variable(&mut self, class: NodeId, name: impl Into<String>) {
        self.class_content_variables.insert(class, name.into());
    }

    /// Records the target node unless one was already recorded.
    pub fn record_target_node(&mut self, node: NodeId) {
        self.target_node.get_or_insert(node);
    }

    /// Freezes the builder into a compiled pattern.
    #[must_use]
    pub fn build(self) -> CompiledPattern {
        CompiledPattern {
            handlers: self.handlers,
            node_handlers: self.node_handlers,
            variables: self.variables,
            strategy: self.strategy,
            requests_super_fields: self.requests_super_fields,
            requests_super_methods: self.requests_super_methods,
            requests_super_inners: self.requests_super_inners,
            class_content_variables: self.class_content_variables,
            target_node: self.target_node,
        }
    }
}
