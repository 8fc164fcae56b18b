//! Template builders shared by the compiler tests.

use crate::{
    CompileError, CompiledPattern, CompilerConfig, ConstraintTable, NodeId, NodeKind,
    NoopResolver, PatternCompiler, ReferenceResolver, SearchOptimizer, Template,
    TemplateBuilder, WordIndex,
};

/// Compiles with the default configuration and no known classes.
pub(crate) fn compile(
    template: &Template,
    constraints: &mut ConstraintTable,
) -> Result<CompiledPattern, CompileError> {
    compile_with(
        &CompilerConfig::default(),
        template,
        constraints,
        &NoopResolver,
        &mut WordIndex::new(),
    )
}

pub(crate) fn compile_with(
    config: &CompilerConfig,
    template: &Template,
    constraints: &mut ConstraintTable,
    resolver: &dyn ReferenceResolver,
    optimizer: &mut dyn SearchOptimizer,
) -> Result<CompiledPattern, CompileError> {
    PatternCompiler::new(config.clone()).compile(template, constraints, resolver, optimizer)
}

/// Adds a reference written on its own line without a semicolon.
pub(crate) fn bare_statement(builder: &mut TemplateBuilder, text: &str) -> NodeId {
    let reference = builder.reference_expression(text);
    builder.node(NodeKind::ExpressionStatement, text, [reference])
}

/// Adds a reference used as a complete statement.
pub(crate) fn terminated_statement(builder: &mut TemplateBuilder, text: &str) -> NodeId {
    let reference = builder.reference_expression(text);
    builder.node(NodeKind::ExpressionStatement, format!("{text};"), [reference])
}

/// Adds a terminated reference statement followed by a line comment.
pub(crate) fn commented_statement(builder: &mut TemplateBuilder, text: &str) -> NodeId {
    let reference = builder.reference_expression(text);
    let comment = builder.leaf(NodeKind::Comment, "// c");
    builder.node(
        NodeKind::ExpressionStatement,
        format!("{text}; // c"),
        [reference, comment],
    )
}

/// Adds a field declaration with a simple type.
pub(crate) fn field(builder: &mut TemplateBuilder, type_name: &str, name: &str) -> NodeId {
    let ty = builder.type_element(type_name);
    let identifier = builder.identifier(name);
    builder.node(NodeKind::Field, format!("{type_name} {name};"), [ty, identifier])
}

/// Finishes a template whose root is a code block holding `children`.
pub(crate) fn block(mut builder: TemplateBuilder, children: &[NodeId]) -> Template {
    let root = builder.node(NodeKind::CodeBlock, "", children.iter().copied());
    builder.finish(root)
}

/// Returns the reference element inside a type element node.
pub(crate) fn type_reference(template: &Template, ty: NodeId) -> NodeId {
    template
        .node(ty)
        .and_then(|node| node.innermost_reference())
        .map(|node| node.id())
        .expect("type element should wrap a reference")
}
