//! Error types for pattern compilation.
//!
//! Every failure aborts compilation; no partially compiled pattern is ever
//! returned alongside an error.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while compiling a search template.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The template refers to a variable the compiler cannot bind.
    #[error("malformed pattern: {message}")]
    MalformedPattern {
        /// Description of the problem.
        message: String,
    },

    /// The template combines constructs that cannot be matched together.
    #[error("unsupported pattern: {message}")]
    UnsupportedPattern {
        /// Description of the problem.
        message: String,
    },

    /// A regular expression supplied for a variable does not compile.
    #[error("invalid regular expression for variable '{variable}'")]
    InvalidRegex {
        /// The variable the expression belongs to.
        variable: String,
        /// The underlying regex error.
        #[source]
        source: Arc<regex::Error>,
    },
}

impl CompileError {
    /// Creates a malformed pattern error.
    #[must_use]
    pub fn malformed_pattern(message: impl Into<String>) -> Self {
        Self::MalformedPattern {
            message: message.into(),
        }
    }

    /// Creates an unsupported pattern error.
    #[must_use]
    pub fn unsupported_pattern(message: impl Into<String>) -> Self {
        Self::UnsupportedPattern {
            message: message.into(),
        }
    }

    /// Creates an invalid regex error.
    #[must_use]
    pub fn invalid_regex(variable: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidRegex {
            variable: variable.into(),
            source: Arc::new(source),
        }
    }
}
