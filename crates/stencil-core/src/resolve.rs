//! Reference resolution bridge.
//!
//! The compiler asks a [`ReferenceResolver`] whether a template reference
//! names a known class and, for subtype-aware variables, which classes extend
//! it.  Hosts with real semantic models implement the trait themselves;
//! [`HierarchyResolver`] is a table-backed implementation for simple hosts.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::template::Node;

/// A resolved class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassRef {
    qualified_name: String,
}

impl ClassRef {
    /// Creates a class reference from its fully qualified name.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }

    /// Returns the fully qualified name, such as `java.util.List`.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the last segment of the qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

/// Resolves template references to classes.
pub trait ReferenceResolver {
    /// Resolves a reference node to the class it names, if any.
    fn resolve_identifier(&self, reference: Node<'_>) -> Option<ClassRef>;

    /// Returns the subclasses of `class_name`, transitively.
    ///
    /// `class_name` may be simple or qualified.  When `include_self` is set
    /// the class itself leads the result.
    fn subtype_closure(&self, class_name: &str, include_self: bool) -> Vec<ClassRef>;
}

/// A resolver that knows no classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl ReferenceResolver for NoopResolver {
    fn resolve_identifier(&self, _reference: Node<'_>) -> Option<ClassRef> {
        None
    }

    fn subtype_closure(&self, _class_name: &str, _include_self: bool) -> Vec<ClassRef> {
        Vec::new()
    }
}

/// Table-backed resolver over a fixed set of classes.
///
/// # Example
///
/// ```
/// use stencil_core::{HierarchyResolver, ReferenceResolver};
///
/// let resolver = HierarchyResolver::new()
///     .with_class("java.util.Collection")
///     .with_subclass("java.util.Collection", "java.util.List")
///     .with_subclass("java.util.List", "java.util.ArrayList");
///
/// let names: Vec<_> = resolver
///     .subtype_closure("Collection", false)
///     .iter()
///     .map(|class| class.simple_name().to_owned())
///     .collect();
/// assert_eq!(names, ["List", "ArrayList"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HierarchyResolver {
    /// Simple and qualified names mapped to their class.
    names: HashMap<String, ClassRef>,
    /// Direct subclasses keyed by qualified name.
    subclasses: HashMap<String, BTreeSet<ClassRef>>,
}

impl HierarchyResolver {
    /// Creates a resolver that knows no classes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class under both its simple and qualified names.
    #[must_use]
    pub fn with_class(mut self, qualified_name: &str) -> Self {
        self.register(qualified_name);
        self
    }

    /// Registers `child` as a direct subclass of `parent`.
    #[must_use]
    pub fn with_subclass(mut self, parent: &str, child: &str) -> Self {
        let parent_ref = self.register(parent);
        let child_ref = self.register(child);
        self.subclasses
            .entry(parent_ref.qualified_name)
            .or_default()
            .insert(child_ref);
        self
    }

    fn register(&mut self, qualified_name: &str) -> ClassRef {
        let class = ClassRef::new(qualified_name);
        self.names
            .entry(class.simple_name().to_owned())
            .or_insert_with(|| class.clone());
        self.names
            .insert(qualified_name.to_owned(), class.clone());
        class
    }

    /// Looks up a class by simple or qualified name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ClassRef> {
        self.names.get(name)
    }
}

impl ReferenceResolver for HierarchyResolver {
    fn resolve_identifier(&self, reference: Node<'_>) -> Option<ClassRef> {
        self.lookup(reference.text()).cloned()
    }

    fn subtype_closure(&self, class_name: &str, include_self: bool) -> Vec<ClassRef> {
        let Some(root) = self.lookup(class_name) else {
            return Vec::new();
        };

        let mut closure = Vec::new();
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([root.clone()]);
        seen.insert(root.clone());
        if include_self {
            closure.push(root.clone());
        }

        while let Some(class) = queue.pop_front() {
            let Some(children) = self.subclasses.get(class.qualified_name()) else {
                continue;
            };
            for child in children {
                if seen.insert(child.clone()) {
                    closure.push(child.clone());
                    queue.push_back(child.clone());
                }
            }
        }
        closure
    }
}
