//! Stencil: a structural search pattern compiler.
//!
//! A search template is a parsed code fragment in which some identifiers,
//! comments or string literals stand for pattern variables.  This facade
//! crate re-exports the data model from [`stencil_core`] and provides
//! [`PatternCompiler`], which walks a [`Template`] once and produces a
//! [`CompiledPattern`]: a matching handler and optional node filter for each
//! relevant node, variable handlers with their regex predicates, the
//! toplevel [`MatchingStrategy`] and a few matcher hints.
//!
//! While compiling, every literal word the pattern requires is reported to a
//! [`SearchOptimizer`] so hosts can discard files that cannot match.
//!
//! # Example
//!
//! ```
//! use stencil::{
//!     CompilerConfig, ConstraintTable, MatchingStrategy, NodeFilter, NodeKind, NoopResolver,
//!     PatternCompiler, TemplateBuilder, WordIndex,
//! };
//!
//! // A single bare variable on its own line.
//! let mut builder = TemplateBuilder::new();
//! let reference = builder.reference_expression("__$_x");
//! let statement = builder.node(NodeKind::ExpressionStatement, "__$_x", [reference]);
//! let block = builder.node(NodeKind::CodeBlock, "", [statement]);
//! let template = builder.finish(block);
//!
//! let compiler = PatternCompiler::new(CompilerConfig::default());
//! let pattern = compiler.compile(
//!     &template,
//!     &mut ConstraintTable::new(),
//!     &NoopResolver,
//!     &mut WordIndex::new(),
//! )?;
//!
//! assert_eq!(pattern.strategy(), MatchingStrategy::Symbol);
//! let handler = pattern.match_handler_for(statement).expect("statement handler");
//! assert_eq!(handler.filter(), Some(NodeFilter::Symbol));
//! # Ok::<(), stencil::CompileError>(())
//! ```

mod attach;
mod classify;
mod compiler;
mod context;
mod fragments;
mod strategy;

/// Tracing target for compiler events.
pub(crate) const COMPILER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::compiler");

// Re-export the stable data model from stencil_core.
pub use stencil_core::{
    ClassRef, CompileError, CompiledPattern, CompilerConfig, ConstraintTable, HandlerId,
    HandlerKind, HierarchyResolver, LiteralPattern, MatchAs, MatchingHandler, MatchingStrategy,
    Node, NodeFilter, NodeId, NodeKind, NoopResolver, OccurrenceKind, ReferenceResolver,
    RegexPredicate, SearchOptimizer, SearchScope, SubstitutionHandler, Template,
    TemplateBuilder, VariableConstraint, WordIndex,
};

pub use classify::{Role, classify};
pub use compiler::PatternCompiler;

#[cfg(test)]
mod tests;
