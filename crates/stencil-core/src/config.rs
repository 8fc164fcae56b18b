//! Compiler configuration.

use serde::{Deserialize, Serialize};

/// Default prefix marking typed variables in template text.
pub const DEFAULT_TYPED_VAR_PREFIX: &str = "__$_";

/// Default name of the implicit "remaining class members" variable.
pub const DEFAULT_CLASS_CONTENT_VAR_NAME: &str = "__class_unmatched__";

/// Extent of the search the compiled pattern will run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// The whole project; subtype closures are worth enumerating.
    #[default]
    Global,
    /// A narrow scope such as one file or directory.
    Local,
}

/// Settings controlling how templates are compiled.
///
/// # Example
///
/// ```
/// use stencil_core::{CompilerConfig, SearchScope};
///
/// let config = CompilerConfig::default();
/// assert_eq!(config.typed_var_prefix(), "__$_");
/// assert_eq!(config.class_content_var_name(), "__class_unmatched__");
/// assert_eq!(config.search_scope(), SearchScope::Global);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Prefix the parser gives to identifiers standing for variables.
    typed_var_prefix: String,
    /// Name of the implicit variable absorbing unlisted class members.
    class_content_var_name: String,
    /// Scope of the search the pattern is compiled for.
    search_scope: SearchScope,
}

impl CompilerConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub fn new(
        typed_var_prefix: impl Into<String>,
        class_content_var_name: impl Into<String>,
        search_scope: SearchScope,
    ) -> Self {
        Self {
            typed_var_prefix: typed_var_prefix.into(),
            class_content_var_name: class_content_var_name.into(),
            search_scope,
        }
    }

    /// Returns the typed variable prefix.
    #[must_use]
    pub fn typed_var_prefix(&self) -> &str {
        &self.typed_var_prefix
    }

    /// Returns the implicit class content variable name.
    #[must_use]
    pub fn class_content_var_name(&self) -> &str {
        &self.class_content_var_name
    }

    /// Returns the search scope.
    #[must_use]
    pub const fn search_scope(&self) -> SearchScope {
        self.search_scope
    }

    /// Returns a copy with a different search scope.
    #[must_use]
    pub fn with_search_scope(mut self, search_scope: SearchScope) -> Self {
        self.search_scope = search_scope;
        self
    }

    /// Extracts the variable name from a typed variable token.
    ///
    /// Returns `None` unless `text` is the prefix followed by at least one
    /// identifier character and nothing else.  An empty prefix disables
    /// typed variables altogether.
    #[must_use]
    pub fn typed_var_name<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.typed_var_prefix.is_empty() {
            return None;
        }
        text.strip_prefix(self.typed_var_prefix.as_str())
            .filter(|name| !name.is_empty() && name.chars().all(is_var_char))
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            typed_var_prefix: DEFAULT_TYPED_VAR_PREFIX.to_owned(),
            class_content_var_name: DEFAULT_CLASS_CONTENT_VAR_NAME.to_owned(),
            search_scope: SearchScope::Global,
        }
    }
}

/// Returns whether `c` may appear in a variable name.
#[must_use]
pub fn is_var_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
