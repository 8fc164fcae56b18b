//! Tests for [`Template`] navigation and [`TemplateBuilder`].

use rstest::rstest;

use crate::{NodeKind, Template, TemplateBuilder};

fn single_reference(qualified: &str) -> Template {
    let mut builder = TemplateBuilder::new();
    let reference = builder.reference_expression(qualified);
    builder.finish(reference)
}

#[rstest]
#[case::unqualified("List", None)]
#[case::one_level("util.List", Some("util"))]
#[case::two_levels("java.util.List", Some("java.util"))]
fn qualifier_is_the_dotted_prefix(#[case] qualified: &str, #[case] expected: Option<&str>) {
    let template = single_reference(qualified);
    let root = template.root().expect("root");
    assert_eq!(root.qualifier().map(|q| q.text()), expected);
}

#[test]
fn reference_name_is_last_segment() {
    let template = single_reference("java.util.List");
    let root = template.root().expect("root");
    let name = root.reference_name().expect("name");
    assert_eq!(name.kind(), NodeKind::Identifier);
    assert_eq!(name.text(), "List");
}

#[test]
fn qualifier_chain_nests_reference_expressions() {
    let template = single_reference("a.b.C");
    let root = template.root().expect("root");
    let outer = root.qualifier().expect("outer qualifier");
    let inner = outer.qualifier().expect("inner qualifier");
    assert_eq!(outer.kind(), NodeKind::ReferenceExpression);
    assert_eq!(inner.text(), "a");
    assert!(inner.qualifier().is_none());
    assert_eq!(inner.parent().map(|p| p.id()), Some(outer.id()));
}

#[test]
fn builder_links_children_to_parents() {
    let mut builder = TemplateBuilder::new();
    let name = builder.identifier("x");
    let variable = builder.node(NodeKind::Variable, "int x", [name]);
    let template = builder.finish(variable);

    let child = template.node(name).expect("child");
    assert_eq!(child.parent().map(|p| p.id()), Some(variable));
    assert_eq!(template.len(), 2);
    assert!(template.root().and_then(|r| r.parent()).is_none());
}

#[test]
fn siblings_skip_whitespace_on_request() {
    let mut builder = TemplateBuilder::new();
    let comment = builder.leaf(NodeKind::Comment, "// c");
    let space = builder.whitespace("\n");
    let statement = builder.leaf(NodeKind::DeclarationStatement, "int x;");
    let block = builder.node(NodeKind::CodeBlock, "", [comment, space, statement]);
    let template = builder.finish(block);

    let node = template.node(statement).expect("statement");
    assert_eq!(node.prev_sibling().map(|s| s.id()), Some(space));
    assert_eq!(node.prev_non_whitespace_sibling().map(|s| s.id()), Some(comment));
    assert!(node.next_sibling().is_none());

    let first = template.node(comment).expect("comment");
    assert!(first.prev_sibling().is_none());
    assert_eq!(first.next_sibling().map(|s| s.id()), Some(space));

    let root = template.root().expect("root");
    assert_eq!(root.significant_children().count(), 2);
}

#[test]
fn innermost_reference_descends_through_type_elements() {
    let mut builder = TemplateBuilder::new();
    let component = builder.type_element("String");
    let array = builder.node(NodeKind::TypeElement, "String[]", [component]);
    let template = builder.finish(array);

    let root = template.root().expect("root");
    let reference = root.innermost_reference().expect("reference");
    assert_eq!(reference.kind(), NodeKind::ReferenceElement);
    assert_eq!(reference.text(), "String");
}

#[test]
fn name_identifier_is_first_identifier() {
    let mut builder = TemplateBuilder::new();
    let ty = builder.type_element("int");
    let name = builder.identifier("count");
    let field = builder.node(NodeKind::Field, "int count;", [ty, name]);
    let template = builder.finish(field);

    let root = template.root().expect("root");
    assert_eq!(root.name_identifier().map(|n| n.text()), Some("count"));
}

#[rstest]
#[case::comment(NodeKind::Comment, true, false)]
#[case::doc_comment(NodeKind::DocComment, true, false)]
#[case::reference_expression(NodeKind::ReferenceExpression, false, true)]
#[case::reference_element(NodeKind::ReferenceElement, false, true)]
#[case::identifier(NodeKind::Identifier, false, false)]
fn kind_predicates(#[case] kind: NodeKind, #[case] comment: bool, #[case] reference: bool) {
    assert_eq!(kind.is_comment(), comment);
    assert_eq!(kind.is_reference(), reference);
}

#[test]
fn node_id_displays_with_hash() {
    let template = single_reference("x");
    let root = template.root().expect("root");
    assert_eq!(root.id().to_string(), "#1");
}
