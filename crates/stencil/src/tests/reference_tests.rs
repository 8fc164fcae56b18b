//! Class reference normalisation and method calls.

use super::support::{compile, compile_with, field, type_reference};
use crate::{
    CompiledPattern, CompilerConfig, ConstraintTable, HierarchyResolver, NodeFilter, NodeId,
    NodeKind, NoopResolver, OccurrenceKind, SubstitutionHandler, TemplateBuilder, WordIndex,
};

fn synthetic(pattern: &CompiledPattern, node: NodeId) -> &SubstitutionHandler {
    pattern
        .handler_for(node)
        .and_then(|handler| handler.as_substitution())
        .expect("node should carry a synthetic variable")
}

#[test]
fn resolved_short_name_matches_the_qualified_name() {
    let mut builder = TemplateBuilder::new();
    let items = field(&mut builder, "List", "items");
    let template = builder.finish(items);
    let ty = template
        .node(items)
        .and_then(|node| node.first_child_of_kind(NodeKind::TypeElement))
        .map(|node| node.id())
        .expect("field type");
    let reference = type_reference(&template, ty);
    let resolver = HierarchyResolver::new().with_class("java.util.List");
    let mut table = ConstraintTable::new();

    let pattern = compile_with(
        &CompilerConfig::default(),
        &template,
        &mut table,
        &resolver,
        &mut WordIndex::new(),
    )
    .expect("compile");

    let handler = synthetic(&pattern, reference);
    assert!(handler.is_synthetic());
    assert_eq!(handler.name(), "__java_util_List");
    assert_eq!(handler.min_count(), 1);
    assert_eq!(handler.max_count(), Some(1));
    let predicate = handler.predicate().expect("synthetic predicate");
    assert!(predicate.is_match("java.util.List"));
    assert!(!predicate.is_match("java_util_List"));
    assert!(pattern.typed_var_predicates().is_empty());
}

#[test]
fn unresolved_qualified_name_is_matched_as_written() {
    let mut builder = TemplateBuilder::new();
    let reference = builder.reference_expression("java.util.List");
    let template = builder.finish(reference);
    let mut table = ConstraintTable::new();

    let pattern = compile(&template, &mut table).expect("compile");

    let handler = synthetic(&pattern, reference);
    assert_eq!(handler.name(), "__java_util_List");
    assert_eq!(handler.predicate().map(|p| p.pattern()), Some(r"java\.util\.List"));

    let util = template
        .node(reference)
        .and_then(|node| node.qualifier())
        .expect("java.util qualifier");
    assert!(pattern.handler_for(util.id()).is_none());
    let java = util.qualifier().expect("java qualifier");
    assert!(pattern.handler_for(java.id()).is_none());
}

#[test]
fn class_qualifier_of_a_call_is_optional() {
    let mut builder = TemplateBuilder::new();
    let callee = builder.reference_expression("Math.max");
    let argument = builder.reference_expression("a");
    let arguments = builder.node(NodeKind::ArgumentList, "(a)", [argument]);
    let call = builder.node(NodeKind::MethodCall, "Math.max(a)", [callee, arguments]);
    let template = builder.finish(call);
    let math = template
        .node(callee)
        .and_then(|node| node.qualifier())
        .map(|node| node.id())
        .expect("Math qualifier");
    let mut table = ConstraintTable::new();
    let mut words = WordIndex::new();

    let pattern = compile_with(
        &CompilerConfig::default(),
        &template,
        &mut table,
        &NoopResolver,
        &mut words,
    )
    .expect("compile");

    let qualifier = synthetic(&pattern, math);
    assert_eq!(qualifier.name(), "__Math");
    assert_eq!(qualifier.min_count(), 0);
    assert!(pattern.handler_for(callee).is_none());

    let standalone = synthetic(&pattern, argument);
    assert_eq!(standalone.name(), "__a");
    assert_eq!(standalone.min_count(), 1);

    for word in ["Math", "max", "a"] {
        assert!(words.contains(word, OccurrenceKind::Code), "{word} registered");
    }
}

#[test]
fn qualifier_chain_with_a_variable_is_left_alone() {
    let mut builder = TemplateBuilder::new();
    let reference = builder.reference_expression("__$_q.List");
    let template = builder.finish(reference);
    let qualifier = template
        .node(reference)
        .and_then(|node| node.qualifier())
        .map(|node| node.id())
        .expect("qualifier");
    let mut table = ConstraintTable::new();

    let pattern = compile(&template, &mut table).expect("compile");

    assert_eq!(pattern.handler_id(qualifier), pattern.variable_handler_id("q"));
    assert!(pattern.handler_for(reference).is_none());
}

#[test]
fn variable_reference_used_as_a_value_matches_expressions() {
    let mut builder = TemplateBuilder::new();
    let callee = builder.reference_expression("foo");
    let argument = builder.reference_expression("__$_x");
    let arguments = builder.node(NodeKind::ArgumentList, "(__$_x)", [argument]);
    let call = builder.node(NodeKind::MethodCall, "foo(__$_x)", [callee, arguments]);
    let template = builder.finish(call);
    let mut table = ConstraintTable::new();

    let pattern = compile(&template, &mut table).expect("compile");

    assert_eq!(pattern.handler_id(argument), pattern.variable_handler_id("x"));
    assert_eq!(
        pattern.variable_handler("x").and_then(|handler| handler.filter()),
        Some(NodeFilter::Expression)
    );
}
