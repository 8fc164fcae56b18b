//! Toplevel strategy selection.
//!
//! Every significant child of the outermost block of a template is a
//! toplevel node.  Each one implies a matching strategy; the pattern as a
//! whole can only use one, so the implied strategies are folded together
//! and incompatible combinations are rejected.

use stencil_core::{CompileError, MatchingHandler, MatchingStrategy, Node, NodeFilter};

use crate::classify::{Role, classify};

/// Derives the strategy a toplevel node implies.
///
/// `handler` is the handler the node received while compiling, before it
/// was marked as toplevel.
pub(crate) fn implied_strategy(node: Node<'_>, handler: Option<&MatchingHandler>) -> MatchingStrategy {
    let filter = handler.and_then(MatchingHandler::filter);
    if matches!(filter, Some(NodeFilter::Symbol | NodeFilter::TypedSymbol)) {
        return MatchingStrategy::Symbol;
    }
    match classify(node) {
        Role::DocComment => MatchingStrategy::JavaDoc,
        Role::Comment => MatchingStrategy::Comment,
        _ => MatchingStrategy::Expression,
    }
}

/// Folds the strategy of one more toplevel node into the running one.
///
/// Documentation comments and comments give way to whatever follows them,
/// and a comment following another node does not change its strategy.
/// Comments are filler in either position, so `Symbol` followed by
/// `Comment` folds to `Symbol` rather than failing as a strict in-order
/// comparison would.
///
/// # Errors
///
/// Returns [`CompileError::UnsupportedPattern`] when two toplevel nodes need
/// different strategies and neither is a comment.
pub(crate) fn fold_strategy(
    current: Option<MatchingStrategy>,
    next: MatchingStrategy,
) -> Result<MatchingStrategy, CompileError> {
    match (current, next) {
        (None | Some(MatchingStrategy::JavaDoc | MatchingStrategy::Comment), _) => Ok(next),
        (Some(accumulated), MatchingStrategy::Comment) => Ok(accumulated),
        (Some(accumulated), _) if accumulated == next => Ok(accumulated),
        (Some(accumulated), _) => Err(CompileError::unsupported_pattern(format!(
            "toplevel nodes need different matching strategies: {accumulated} and {next}"
        ))),
    }
}
