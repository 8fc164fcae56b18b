//! Tests for regex predicates and matching handlers.

use rstest::rstest;

use crate::{
    HandlerKind, MatchAs, MatchingHandler, NodeFilter, RegexPredicate, SubstitutionHandler,
    VariableConstraint, simple_predicate,
};

#[rstest]
#[case::exact("List|Set", "List", true)]
#[case::other_alternative("List|Set", "Set", true)]
#[case::prefix_only("List|Set", "ArrayList", false)]
#[case::suffix_only("List", "Lists", false)]
#[case::character_class("[a-z]+", "abc", true)]
fn predicates_match_whole_text(#[case] pattern: &str, #[case] text: &str, #[case] expected: bool) {
    let predicate = RegexPredicate::new(pattern).expect("valid regex");
    assert_eq!(predicate.is_match(text), expected);
}

#[test]
fn literal_predicate_escapes_metacharacters() {
    let predicate = RegexPredicate::literal("java.util.List").expect("literal");
    assert_eq!(predicate.pattern(), "java\\.util\\.List");
    assert!(predicate.is_match("java.util.List"));
    assert!(!predicate.is_match("javaXutilXList"));
}

#[test]
fn multiline_predicate_keeps_pattern() {
    let predicate = RegexPredicate::new("foo.*bar").expect("valid regex");
    assert!(!predicate.is_match("foo\nbar"));

    let multiline = predicate.to_multiline().expect("multiline");
    assert_eq!(multiline.pattern(), predicate.pattern());
    assert!(multiline.is_multiline());
    assert!(multiline.is_match("foo\nbar"));
    assert_ne!(multiline, predicate);
}

#[rstest]
#[case::single("List", Some(vec!["List"]))]
#[case::alternatives("List|Set|Map", Some(vec!["List", "Set", "Map"]))]
#[case::quantifier("Lis+t", None)]
#[case::empty_alternative("List|", None)]
#[case::dotted("java.util", None)]
fn simple_alternatives_require_identifiers(
    #[case] pattern: &str,
    #[case] expected: Option<Vec<&str>>,
) {
    let predicate = RegexPredicate::new(pattern).expect("valid regex");
    assert_eq!(predicate.simple_alternatives(), expected);
}

#[test]
fn substitution_copies_constraint() {
    let constraint = VariableConstraint::new("T")
        .with_count(0, Some(3))
        .with_regex("A|B")
        .strict_subtype()
        .target();
    let substitution = SubstitutionHandler::from_constraint(&constraint).expect("handler");
    assert_eq!(substitution.name(), "T");
    assert_eq!(substitution.min_count(), 0);
    assert_eq!(substitution.max_count(), Some(3));
    assert_eq!(substitution.predicate().map(RegexPredicate::pattern), Some("A|B"));
    assert!(substitution.is_strict_subtype());
    assert!(substitution.needs_supers());
    assert!(substitution.is_target());
    assert!(!substitution.is_synthetic());
    assert_eq!(substitution.match_as(), MatchAs::Expression);
}

#[test]
fn substitution_rejects_invalid_regex() {
    let constraint = VariableConstraint::new("x").with_regex("(");
    assert!(SubstitutionHandler::from_constraint(&constraint).is_err());
}

#[test]
fn enable_multiline_without_predicate_is_noop() {
    let mut substitution =
        SubstitutionHandler::from_constraint(&VariableConstraint::new("x")).expect("handler");
    substitution.enable_multiline().expect("multiline");
    assert!(substitution.predicate().is_none());
}

#[rstest]
#[case::enumerable(1, "List|Set", true)]
#[case::optional(0, "List|Set", false)]
#[case::not_enumerable(1, "L.*", false)]
fn simple_predicate_requires_enumerable_mandatory_words(
    #[case] min_count: u32,
    #[case] regex: &str,
    #[case] expected: bool,
) {
    let constraint = VariableConstraint::new("x")
        .with_count(min_count, Some(1))
        .with_regex(regex);
    let substitution = SubstitutionHandler::from_constraint(&constraint).expect("handler");
    let handler = MatchingHandler::new(HandlerKind::Substitution(substitution));
    assert_eq!(simple_predicate(&handler).is_some(), expected);
}

#[test]
fn simple_predicate_ignores_other_handlers() {
    let handler = MatchingHandler::with_filter(HandlerKind::Expression, NodeFilter::Expression);
    assert!(simple_predicate(&handler).is_none());
}

#[test]
fn later_filter_overwrites_earlier_one() {
    let mut handler = MatchingHandler::with_filter(HandlerKind::Simple, NodeFilter::Expression);
    handler.set_filter(NodeFilter::Statement);
    assert_eq!(handler.filter(), Some(NodeFilter::Statement));
}

#[test]
fn handler_kind_display() {
    assert_eq!(HandlerKind::TypedSymbol.to_string(), "typed symbol");
    assert_eq!(
        HandlerKind::DeclarationStatement { comment: None }.to_string(),
        "declaration statement"
    );
}
