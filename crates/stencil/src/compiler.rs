//! The [`PatternCompiler`] entrypoint.

use stencil_core::{
    CompileError, CompiledPattern, CompilerConfig, ConstraintTable, ReferenceResolver,
    SearchOptimizer, Template,
};
use tracing::debug;

use crate::COMPILER_TARGET;
use crate::context::CompileContext;

/// Compiles search templates into [`CompiledPattern`]s.
///
/// A compiler holds only configuration, so one instance can compile any
/// number of templates.  Each call to [`PatternCompiler::compile`] is
/// independent of the others.
#[derive(Debug, Clone, Default)]
pub struct PatternCompiler {
    config: CompilerConfig,
}

impl PatternCompiler {
    /// Creates a compiler with the given configuration.
    #[must_use]
    pub const fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Returns the compiler configuration.
    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles `template` into a frozen pattern.
    ///
    /// Variables found in the template but missing from `constraints` match
    /// exactly one occurrence of anything.  The implicit class content
    /// variable is added to `constraints` when a class pattern needs it.
    /// Words the pattern requires are reported to `optimizer`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::MalformedPattern`] when a comment marker names
    /// an unknown variable, [`CompileError::UnsupportedPattern`] when
    /// toplevel nodes need incompatible matching strategies, and
    /// [`CompileError::InvalidRegex`] when a variable's regex does not
    /// compile.  No pattern is produced on failure.
    pub fn compile<'a>(
        &self,
        template: &Template,
        constraints: &'a mut ConstraintTable,
        resolver: &'a dyn ReferenceResolver,
        optimizer: &'a mut dyn SearchOptimizer,
    ) -> Result<CompiledPattern, CompileError> {
        debug!(
            target: COMPILER_TARGET,
            nodes = template.len(),
            variables = constraints.len(),
            "compiling search template"
        );

        let mut context = CompileContext::new(&self.config, constraints, resolver, optimizer);
        context.declare_variables(template)?;
        if let Some(root) = template.root() {
            context.visit(root)?;
        }
        let pattern = context.finish();

        debug!(
            target: COMPILER_TARGET,
            strategy = %pattern.strategy(),
            handlers = pattern.handlers().count(),
            "compiled search template"
        );
        Ok(pattern)
    }
}
