//! Matching handlers, regex predicates and node filters.
//!
//! Handlers describe how the matching engine should treat a template node.
//! They are stored in an arena inside the compiled pattern and addressed by
//! [`HandlerId`], which lets several template nodes share one handler.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::constraint::VariableConstraint;

/// Identity of a handler within one compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(usize);

impl HandlerId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of the handler.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Cheap node-kind predicate used to reject target nodes before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeFilter {
    /// Class declarations.
    Class,
    /// Method declarations.
    Method,
    /// Variable and field declarations.
    Variable,
    /// Code blocks.
    Block,
    /// Expressions.
    Expression,
    /// Statements.
    Statement,
    /// Type references.
    Type,
    /// Declaration statements.
    Declaration,
    /// Declarations of a parameterised type with no variable.
    TypedSymbol,
    /// Type parameters.
    TypeParameter,
    /// Bare identifiers used as statements.
    Symbol,
    /// Documentation comments.
    JavaDoc,
    /// Comments.
    Comment,
    /// Literal constants.
    Constant,
}

/// A compiled regular-expression constraint on matched text.
///
/// The expression always has to match the whole text.  The pattern text is
/// fixed at construction; only the multiline mode can be switched on later.
///
/// # Example
///
/// ```
/// use stencil_core::RegexPredicate;
///
/// let predicate = RegexPredicate::new("java\\.util\\.List")?;
/// assert!(predicate.is_match("java.util.List"));
/// assert!(!predicate.is_match("java_util_List"));
/// # Ok::<(), regex::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RegexPredicate {
    pattern: String,
    regex: Regex,
    multiline: bool,
}

impl RegexPredicate {
    /// Compiles a single-line predicate.
    ///
    /// # Errors
    ///
    /// Returns the regex crate's error if `pattern` is not a valid expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, false)
    }

    /// Compiles a predicate matching `text` literally.
    ///
    /// # Errors
    ///
    /// Returns the regex crate's error if the escaped text exceeds the regex
    /// size limit.
    pub fn literal(text: &str) -> Result<Self, regex::Error> {
        Self::new(&regex::escape(text))
    }

    fn build(pattern: &str, multiline: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .multi_line(multiline)
            .dot_matches_new_line(multiline)
            .build()?;
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
            multiline,
        })
    }

    /// Returns a copy of this predicate that matches across lines.
    ///
    /// # Errors
    ///
    /// Returns the regex crate's error if recompilation fails.
    pub fn to_multiline(&self) -> Result<Self, regex::Error> {
        Self::build(&self.pattern, true)
    }

    /// Returns the expression as written.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns whether the predicate matches across lines.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Returns whether the predicate accepts the whole of `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the identifier alternatives of a plain `a|b|c` expression.
    ///
    /// Expressions using any other regex syntax return `None`, since the
    /// words they match cannot be enumerated.
    #[must_use]
    pub fn simple_alternatives(&self) -> Option<Vec<&str>> {
        self.pattern
            .split('|')
            .map(|word| is_identifier(word).then_some(word))
            .collect()
    }
}

impl PartialEq for RegexPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.multiline == other.multiline
    }
}

impl Eq for RegexPredicate {}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// What a substitution matches when it stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchAs {
    /// A single expression or token.
    #[default]
    Expression,
    /// A complete statement.
    Statement,
}

/// Matcher for a wildcard or typed variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionHandler {
    name: String,
    min_count: u32,
    max_count: Option<u32>,
    predicate: Option<RegexPredicate>,
    subtype: bool,
    strict_subtype: bool,
    within_hierarchy: bool,
    target: bool,
    synthetic: bool,
    match_as: MatchAs,
}

impl SubstitutionHandler {
    /// Builds the handler for a declared variable.
    ///
    /// # Errors
    ///
    /// Returns the regex crate's error if the constraint's regex is invalid.
    pub fn from_constraint(constraint: &VariableConstraint) -> Result<Self, regex::Error> {
        let predicate = constraint.regex().map(RegexPredicate::new).transpose()?;
        Ok(Self {
            name: constraint.name().to_owned(),
            min_count: constraint.min_count(),
            max_count: constraint.max_count(),
            predicate,
            subtype: constraint.is_subtype(),
            strict_subtype: constraint.is_strict_subtype(),
            within_hierarchy: constraint.is_within_hierarchy(),
            target: constraint.is_target(),
            synthetic: false,
            match_as: MatchAs::Expression,
        })
    }

    /// Builds a compiler-generated handler for a normalised reference.
    #[must_use]
    pub fn synthetic(
        name: impl Into<String>,
        predicate: RegexPredicate,
        min_count: u32,
        max_count: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            min_count,
            max_count,
            predicate: Some(predicate),
            subtype: false,
            strict_subtype: false,
            within_hierarchy: false,
            target: false,
            synthetic: true,
            match_as: MatchAs::Expression,
        }
    }

    /// Returns the variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the minimum number of occurrences.
    #[must_use]
    pub const fn min_count(&self) -> u32 {
        self.min_count
    }

    /// Returns the maximum number of occurrences, `None` when unbounded.
    #[must_use]
    pub const fn max_count(&self) -> Option<u32> {
        self.max_count
    }

    /// Returns the regex predicate, if any.
    #[must_use]
    pub const fn predicate(&self) -> Option<&RegexPredicate> {
        self.predicate.as_ref()
    }

    /// Returns whether subtypes are accepted.
    #[must_use]
    pub const fn is_subtype(&self) -> bool {
        self.subtype
    }

    /// Returns whether only strict subtypes are accepted.
    #[must_use]
    pub const fn is_strict_subtype(&self) -> bool {
        self.strict_subtype
    }

    /// Returns whether inherited members are matched.
    #[must_use]
    pub const fn is_within_hierarchy(&self) -> bool {
        self.within_hierarchy
    }

    /// Returns whether this variable is the reported target.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        self.target
    }

    /// Returns whether the compiler generated this handler.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Returns what the variable matches when standing alone.
    #[must_use]
    pub const fn match_as(&self) -> MatchAs {
        self.match_as
    }

    /// Returns whether matching must also consider inherited members.
    #[must_use]
    pub const fn needs_supers(&self) -> bool {
        self.subtype || self.strict_subtype
    }

    /// Sets what the variable matches when standing alone.
    pub const fn set_match_as(&mut self, match_as: MatchAs) {
        self.match_as = match_as;
    }

    /// Switches the predicate, if any, to multiline matching.
    ///
    /// # Errors
    ///
    /// Returns the regex crate's error if recompilation fails.
    pub fn enable_multiline(&mut self) -> Result<(), regex::Error> {
        if let Some(predicate) = &self.predicate {
            self.predicate = Some(predicate.to_multiline()?);
        }
        Ok(())
    }
}

/// Free text with interpolated variables, compiled to a single predicate.
///
/// Each variable becomes one capture group of the predicate, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralPattern {
    predicate: RegexPredicate,
    variables: Vec<String>,
}

impl LiteralPattern {
    /// Creates a literal pattern.
    #[must_use]
    pub const fn new(predicate: RegexPredicate, variables: Vec<String>) -> Self {
        Self {
            predicate,
            variables,
        }
    }

    /// Returns the compiled predicate.
    #[must_use]
    pub const fn predicate(&self) -> &RegexPredicate {
        &self.predicate
    }

    /// Returns the interpolated variable names in order of appearance.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// The matching behaviour attached to a template node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    /// Structural comparison with no special behaviour.
    Simple,
    /// Generic expression matcher.
    Expression,
    /// A bare identifier statement, wrapping a substitution handler.
    Symbol(HandlerId),
    /// A wildcard or typed variable.
    Substitution(SubstitutionHandler),
    /// A parameterised type used as a declaration with no variable.
    TypedSymbol,
    /// A declaration statement, optionally merged with a leading comment.
    DeclarationStatement {
        /// Handler of the comment written just before the declaration.
        comment: Option<HandlerId>,
    },
    /// Comment or literal text with interpolated variables.
    LiteralWithSubstitutions(LiteralPattern),
    /// A value slot of a documentation tag.
    DocData,
    /// Marks a toplevel node, wrapping the handler it received.
    TopLevel(HandlerId),
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Simple => "simple",
            Self::Expression => "expression",
            Self::Symbol(_) => "symbol",
            Self::Substitution(_) => "substitution",
            Self::TypedSymbol => "typed symbol",
            Self::DeclarationStatement { .. } => "declaration statement",
            Self::LiteralWithSubstitutions(_) => "literal with substitutions",
            Self::DocData => "doc data",
            Self::TopLevel(_) => "toplevel",
        };
        f.write_str(label)
    }
}

/// A handler together with its optional pre-filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingHandler {
    kind: HandlerKind,
    filter: Option<NodeFilter>,
}

impl MatchingHandler {
    /// Creates a handler without a filter.
    #[must_use]
    pub const fn new(kind: HandlerKind) -> Self {
        Self { kind, filter: None }
    }

    /// Creates a handler with a filter.
    #[must_use]
    pub const fn with_filter(kind: HandlerKind, filter: NodeFilter) -> Self {
        Self {
            kind,
            filter: Some(filter),
        }
    }

    /// Returns the handler kind.
    #[must_use]
    pub const fn kind(&self) -> &HandlerKind {
        &self.kind
    }

    /// Returns the filter, if any.
    #[must_use]
    pub const fn filter(&self) -> Option<NodeFilter> {
        self.filter
    }

    /// Replaces the filter.
    pub const fn set_filter(&mut self, filter: NodeFilter) {
        self.filter = Some(filter);
    }

    /// Returns the substitution behind this handler, if it is one.
    #[must_use]
    pub const fn as_substitution(&self) -> Option<&SubstitutionHandler> {
        match &self.kind {
            HandlerKind::Substitution(substitution) => Some(substitution),
            _ => None,
        }
    }

    /// Returns the substitution behind this handler mutably.
    pub const fn as_substitution_mut(&mut self) -> Option<&mut SubstitutionHandler> {
        match &mut self.kind {
            HandlerKind::Substitution(substitution) => Some(substitution),
            _ => None,
        }
    }

    /// Returns whether this handler is a substitution.
    #[must_use]
    pub const fn is_substitution(&self) -> bool {
        matches!(self.kind, HandlerKind::Substitution(_))
    }
}

/// Returns the predicate of a substitution whose matches can be enumerated.
///
/// Only substitutions that must occur at least once and whose regex is a
/// plain list of identifier alternatives qualify; their words are safe to
/// use for index pre-filtering.
#[must_use]
pub fn simple_predicate(handler: &MatchingHandler) -> Option<&RegexPredicate> {
    let substitution = handler.as_substitution()?;
    if substitution.min_count() == 0 {
        return None;
    }
    substitution
        .predicate()
        .filter(|predicate| predicate.simple_alternatives().is_some())
}
