//! Core data model for the Stencil structural search pattern compiler.
//!
//! This crate holds the types shared by the compiler and its hosts: the
//! template arena handed in by a host-language parser, the variable
//! constraint table, matching handlers and filters, the compiled pattern,
//! compiler configuration and errors.  It also defines the two collaborator
//! traits the compiler talks to, [`ReferenceResolver`] and
//! [`SearchOptimizer`], with simple in-memory implementations of each.
//! Everything here is re-exported by the `stencil` crate.
//!
//! # Core types
//!
//! - [`Template`], [`Node`] and [`TemplateBuilder`] — the parsed template
//! - [`ConstraintTable`] and [`VariableConstraint`] — declared variables
//! - [`MatchingHandler`], [`HandlerKind`] and [`NodeFilter`] — per-node
//!   matching behaviour
//! - [`CompiledPattern`] — the frozen compilation result
//! - [`CompilerConfig`] — prefixes, reserved names and search scope
//! - [`CompileError`] — compilation failures
//!
//! # Example
//!
//! ```
//! use stencil_core::{ConstraintTable, VariableConstraint};
//!
//! let table: ConstraintTable = [VariableConstraint::new("x").with_count(0, None)]
//!     .into_iter()
//!     .collect();
//! assert_eq!(table.get("x").and_then(|c| c.max_count()), None);
//! ```

mod config;
mod constraint;
mod error;
mod handler;
mod optimizer;
mod pattern;
mod resolve;
mod strategy;
mod template;

pub use config::{
    CompilerConfig, DEFAULT_CLASS_CONTENT_VAR_NAME, DEFAULT_TYPED_VAR_PREFIX, SearchScope,
    is_var_char,
};
pub use constraint::{ConstraintTable, VariableConstraint};
pub use error::CompileError;
pub use handler::{
    HandlerId, HandlerKind, LiteralPattern, MatchAs, MatchingHandler, NodeFilter, RegexPredicate,
    SubstitutionHandler, simple_predicate,
};
pub use optimizer::{OccurrenceKind, SearchOptimizer, WordIndex};
pub use pattern::{CompiledPattern, PatternBuilder};
pub use resolve::{ClassRef, HierarchyResolver, NoopResolver, ReferenceResolver};
pub use strategy::MatchingStrategy;
pub use template::{Node, NodeId, NodeKind, Template, TemplateBuilder};

#[cfg(test)]
mod tests;
