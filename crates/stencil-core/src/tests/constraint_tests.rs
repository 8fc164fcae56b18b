//! Tests for [`VariableConstraint`] and [`ConstraintTable`].

use crate::{ConstraintTable, VariableConstraint};

#[test]
fn new_constraint_matches_exactly_once() {
    let constraint = VariableConstraint::new("x");
    assert_eq!(constraint.name(), "x");
    assert_eq!(constraint.min_count(), 1);
    assert_eq!(constraint.max_count(), Some(1));
    assert!(constraint.regex().is_none());
    assert!(!constraint.is_subtype());
    assert!(!constraint.is_strict_subtype());
    assert!(!constraint.is_within_hierarchy());
    assert!(!constraint.is_target());
}

#[test]
fn builder_methods_set_flags() {
    let constraint = VariableConstraint::new("T")
        .subtype()
        .strict_subtype()
        .within_hierarchy()
        .target();
    assert!(constraint.is_subtype());
    assert!(constraint.is_strict_subtype());
    assert!(constraint.is_within_hierarchy());
    assert!(constraint.is_target());
}

#[test]
fn insert_replaces_existing_constraint() {
    let mut table = ConstraintTable::new();
    assert!(table.insert(VariableConstraint::new("x")).is_none());
    let replaced = table.insert(VariableConstraint::new("x").with_count(0, None));
    assert_eq!(replaced.map(|c| c.min_count()), Some(1));
    assert_eq!(table.get("x").map(VariableConstraint::min_count), Some(0));
    assert_eq!(table.len(), 1);
}

#[test]
fn insert_if_absent_keeps_existing_constraint() {
    let mut table = ConstraintTable::new();
    assert!(table.insert_if_absent(VariableConstraint::new("x").with_regex("a")));
    assert!(!table.insert_if_absent(VariableConstraint::new("x").with_regex("b")));
    assert_eq!(table.get("x").and_then(VariableConstraint::regex), Some("a"));
}

#[test]
fn iteration_is_ordered_by_name() {
    let table: ConstraintTable = ["c", "a", "b"]
        .into_iter()
        .map(VariableConstraint::new)
        .collect();
    let names: Vec<_> = table.iter().map(VariableConstraint::name).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(table.contains("b"));
    assert!(!table.contains("d"));
    assert!(!table.is_empty());
}

#[test]
fn constraint_deserialises_with_missing_flags() {
    let json = r#"{"name":"args","min_count":0,"max_count":null,"regex":"foo|bar"}"#;
    let constraint: VariableConstraint = serde_json::from_str(json).expect("deserialise");
    assert_eq!(
        constraint,
        VariableConstraint::new("args")
            .with_count(0, None)
            .with_regex("foo|bar")
    );
}
