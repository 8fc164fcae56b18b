//! Search-space optimisation.
//!
//! While compiling, the attacher reports every literal word the pattern
//! requires.  An index can then discard candidate files that cannot contain
//! a match before any tree matching runs.

use std::collections::{BTreeMap, BTreeSet};

use crate::resolve::ReferenceResolver;

/// Where in the source a registered word must occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OccurrenceKind {
    /// An identifier in code.
    Code,
    /// Text inside a comment.
    Comment,
    /// Text inside a string literal.
    Literal,
}

/// Receives words found while compiling a pattern.
pub trait SearchOptimizer {
    /// Registers a word that matching files must contain.
    fn register_word(&mut self, word: &str, kind: OccurrenceKind);

    /// Registers the simple names of every subtype of `class_name`.
    ///
    /// Any of the names may satisfy the pattern, so they are registered as
    /// alternatives.
    fn register_descendants(
        &mut self,
        class_name: &str,
        include_self: bool,
        resolver: &dyn ReferenceResolver,
    ) {
        for class in resolver.subtype_closure(class_name, include_self) {
            self.register_word(class.simple_name(), OccurrenceKind::Code);
        }
    }
}

/// In-memory collection of registered words.
///
/// # Example
///
/// ```
/// use stencil_core::{OccurrenceKind, SearchOptimizer, WordIndex};
///
/// let mut index = WordIndex::new();
/// index.register_word("println", OccurrenceKind::Code);
/// assert!(index.contains("println", OccurrenceKind::Code));
/// assert!(!index.contains("println", OccurrenceKind::Comment));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordIndex {
    words: BTreeMap<OccurrenceKind, BTreeSet<String>>,
}

impl WordIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: BTreeMap::new(),
        }
    }

    /// Returns whether `word` was registered for `kind`.
    #[must_use]
    pub fn contains(&self, word: &str, kind: OccurrenceKind) -> bool {
        self.words
            .get(&kind)
            .is_some_and(|words| words.contains(word))
    }

    /// Returns the words registered for `kind` in sorted order.
    pub fn words(&self, kind: OccurrenceKind) -> impl Iterator<Item = &str> {
        self.words
            .get(&kind)
            .into_iter()
            .flat_map(|words| words.iter().map(String::as_str))
    }

    /// Returns `true` if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.values().all(BTreeSet::is_empty)
    }
}

impl SearchOptimizer for WordIndex {
    fn register_word(&mut self, word: &str, kind: OccurrenceKind) {
        if word.is_empty() {
            return;
        }
        self.words.entry(kind).or_default().insert(word.to_owned());
    }
}
