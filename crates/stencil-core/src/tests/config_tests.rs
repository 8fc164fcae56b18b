//! Tests for [`CompilerConfig`].

use rstest::rstest;

use crate::{CompilerConfig, SearchScope};

#[rstest]
#[case::plain("__$_x", Some("x"))]
#[case::underscored("__$_class_body", Some("class_body"))]
#[case::prefix_only("__$_", None)]
#[case::no_prefix("x", None)]
#[case::trailing_text("__$_x y", None)]
#[case::qualified("__$_x.y", None)]
fn typed_var_name_strips_prefix(#[case] text: &str, #[case] expected: Option<&str>) {
    let config = CompilerConfig::default();
    assert_eq!(config.typed_var_name(text), expected);
}

#[test]
fn custom_prefix_is_honoured() {
    let config = CompilerConfig::new("$", "rest", SearchScope::Local);
    assert_eq!(config.typed_var_name("$x"), Some("x"));
    assert_eq!(config.typed_var_name("__$_x"), None);
    assert_eq!(config.class_content_var_name(), "rest");
    assert_eq!(config.search_scope(), SearchScope::Local);
}

#[rstest]
#[case::identifier("items")]
#[case::underscored("__$_x")]
fn empty_prefix_names_no_variables(#[case] text: &str) {
    let config = CompilerConfig::new("", "rest", SearchScope::Global);
    assert_eq!(config.typed_var_name(text), None);
}

#[test]
fn missing_fields_take_defaults() {
    let config: CompilerConfig =
        serde_json::from_str(r#"{"search_scope":"local"}"#).expect("deserialise");
    assert_eq!(
        config,
        CompilerConfig::default().with_search_scope(SearchScope::Local)
    );
}

#[test]
fn config_serialises_every_field() {
    let json = serde_json::to_string(&CompilerConfig::default()).expect("serialise");
    assert!(json.contains(r#""typed_var_prefix":"__$_""#));
    assert!(json.contains(r#""class_content_var_name":"__class_unmatched__""#));
    assert!(json.contains(r#""search_scope":"global""#));
}
