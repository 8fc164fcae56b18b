//! Tests for the reference resolvers.

use rstest::{fixture, rstest};

use crate::{ClassRef, HierarchyResolver, NoopResolver, ReferenceResolver, TemplateBuilder};

#[fixture]
fn collections() -> HierarchyResolver {
    HierarchyResolver::new()
        .with_subclass("java.util.Collection", "java.util.List")
        .with_subclass("java.util.Collection", "java.util.Set")
        .with_subclass("java.util.List", "java.util.ArrayList")
        .with_subclass("java.util.List", "java.util.LinkedList")
}

fn simple_names(classes: &[ClassRef]) -> Vec<&str> {
    classes.iter().map(ClassRef::simple_name).collect()
}

#[rstest]
fn closure_is_breadth_first(collections: HierarchyResolver) {
    let closure = collections.subtype_closure("Collection", false);
    assert_eq!(
        simple_names(&closure),
        ["List", "Set", "ArrayList", "LinkedList"]
    );
}

#[rstest]
fn closure_can_include_self(collections: HierarchyResolver) {
    let closure = collections.subtype_closure("java.util.List", true);
    assert_eq!(simple_names(&closure), ["List", "ArrayList", "LinkedList"]);
}

#[rstest]
fn unknown_class_has_no_subtypes(collections: HierarchyResolver) {
    assert!(collections.subtype_closure("Map", true).is_empty());
}

#[test]
fn diamond_hierarchies_yield_each_class_once() {
    let resolver = HierarchyResolver::new()
        .with_subclass("A", "B")
        .with_subclass("A", "C")
        .with_subclass("B", "D")
        .with_subclass("C", "D");
    assert_eq!(simple_names(&resolver.subtype_closure("A", false)), ["B", "C", "D"]);
}

#[rstest]
fn resolves_references_by_written_text(collections: HierarchyResolver) {
    let mut builder = TemplateBuilder::new();
    let reference = builder.reference_element("List");
    let template = builder.finish(reference);
    let node = template.root().expect("root");

    let class = collections.resolve_identifier(node).expect("resolved");
    assert_eq!(class.qualified_name(), "java.util.List");
    assert!(NoopResolver.resolve_identifier(node).is_none());
}

#[test]
fn simple_name_of_unqualified_class_is_itself() {
    assert_eq!(ClassRef::new("Object").simple_name(), "Object");
}
