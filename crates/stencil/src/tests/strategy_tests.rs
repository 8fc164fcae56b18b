//! Toplevel strategy folding.

use rstest::rstest;

use crate::MatchingStrategy::{self, Comment, Expression, JavaDoc, Symbol};
use crate::strategy::fold_strategy;

#[rstest]
#[case::first_node(None, Symbol, Symbol)]
#[case::javadoc_gives_way(Some(JavaDoc), Expression, Expression)]
#[case::comment_gives_way(Some(Comment), Symbol, Symbol)]
#[case::trailing_comment(Some(Symbol), Comment, Symbol)]
#[case::same_strategy(Some(Expression), Expression, Expression)]
#[case::javadoc_after_javadoc(Some(JavaDoc), JavaDoc, JavaDoc)]
fn compatible_strategies_fold(
    #[case] current: Option<MatchingStrategy>,
    #[case] next: MatchingStrategy,
    #[case] expected: MatchingStrategy,
) {
    assert_eq!(fold_strategy(current, next).expect("compatible"), expected);
}

#[rstest]
#[case::expression_then_symbol(Expression, Symbol)]
#[case::symbol_then_expression(Symbol, Expression)]
#[case::symbol_then_javadoc(Symbol, JavaDoc)]
fn incompatible_strategies_are_rejected(
    #[case] current: MatchingStrategy,
    #[case] next: MatchingStrategy,
) {
    let error = fold_strategy(Some(current), next).expect_err("incompatible");
    assert!(error.to_string().contains("different matching strategies"));
}
