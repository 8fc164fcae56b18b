//! User-declared pattern variables and their constraints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Constraints attached to one named pattern variable.
///
/// A fresh constraint matches exactly one occurrence of anything; builder
/// methods narrow it down.
///
/// # Example
///
/// ```
/// use stencil_core::VariableConstraint;
///
/// let constraint = VariableConstraint::new("args")
///     .with_count(0, None)
///     .with_regex("foo|bar");
/// assert_eq!(constraint.min_count(), 0);
/// assert_eq!(constraint.max_count(), None);
/// assert_eq!(constraint.regex(), Some("foo|bar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableConstraint {
    name: String,
    min_count: u32,
    /// `None` means unbounded.
    max_count: Option<u32>,
    regex: Option<String>,
    #[serde(default)]
    subtype: bool,
    #[serde(default)]
    strict_subtype: bool,
    #[serde(default)]
    within_hierarchy: bool,
    #[serde(default)]
    target: bool,
}

impl VariableConstraint {
    /// Creates a constraint matching exactly one occurrence.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_count: 1,
            max_count: Some(1),
            regex: None,
            subtype: false,
            strict_subtype: false,
            within_hierarchy: false,
            target: false,
        }
    }

    /// Sets the occurrence bounds; `None` leaves the maximum unbounded.
    #[must_use]
    pub const fn with_count(mut self, min_count: u32, max_count: Option<u32>) -> Self {
        self.min_count = min_count;
        self.max_count = max_count;
        self
    }

    /// Restricts matched text to the given regular expression.
    #[must_use]
    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    /// Also accepts subtypes of the matched type.
    #[must_use]
    pub const fn subtype(mut self) -> Self {
        self.subtype = true;
        self
    }

    /// Accepts strict subtypes of the matched type only.
    #[must_use]
    pub const fn strict_subtype(mut self) -> Self {
        self.strict_subtype = true;
        self
    }

    /// Matches members declared anywhere in the type hierarchy.
    #[must_use]
    pub const fn within_hierarchy(mut self) -> Self {
        self.within_hierarchy = true;
        self
    }

    /// Marks the variable as the part of a match reported to the user.
    #[must_use]
    pub const fn target(mut self) -> Self {
        self.target = true;
        self
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

    /// Returns the regular expression the matched text must satisfy.
    #[must_use]
    pub fn regex(&self) -> Option<&str> {
        self.regex.as_deref()
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

    /// Returns whether the variable is the reported target.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        self.target
    }
}

/// Variable constraints keyed by variable name.
///
/// Iteration is ordered by name so compilation stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintTable {
    constraints: BTreeMap<String, VariableConstraint>,
}

impl ConstraintTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            constraints: BTreeMap::new(),
        }
    }

    /// Inserts a constraint, returning the one it replaced.
    pub fn insert(&mut self, constraint: VariableConstraint) -> Option<VariableConstraint> {
        self.constraints
            .insert(constraint.name().to_owned(), constraint)
    }

    /// Inserts a constraint unless one with the same name exists.
    ///
    /// Returns `true` when the constraint was added.
    pub fn insert_if_absent(&mut self, constraint: VariableConstraint) -> bool {
        if self.constraints.contains_key(constraint.name()) {
            return false;
        }
        self.insert(constraint);
        true
    }

    /// Looks up a constraint by variable name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VariableConstraint> {
        self.constraints.get(name)
    }

    /// Returns whether a constraint exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constraints.contains_key(name)
    }

    /// Returns the constraints ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &VariableConstraint> {
        self.constraints.values()
    }

    /// Returns the number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if no variables are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl FromIterator<VariableConstraint> for ConstraintTable {
    fn from_iter<I: IntoIterator<Item = VariableConstraint>>(iter: I) -> Self {
        let mut table = Self::new();
        for constraint in iter {
            table.insert(constraint);
        }
        table
    }
}
