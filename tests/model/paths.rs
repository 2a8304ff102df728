//! Integration tests for path template parsing

use apimodel_model::{PathSegment, PathTemplate};
use proptest::prelude::*;

#[test]
fn simple_variable() {
    let t = PathTemplate::parse("/path/{id}");
    assert_eq!(
        t.segments(),
        [PathSegment::literal("path"), PathSegment::variable("id", None)]
    );
}

#[test]
fn constrained_variable() {
    let t = PathTemplate::parse("/path/{id: [0-9]+}");
    assert_eq!(t.len(), 2);
    assert_eq!(t.segments()[1].variable_name(), Some("id"));
    assert_eq!(t.segments()[1].regex.as_deref(), Some("[0-9]+"));
    assert_eq!(t.segments()[1].value, "{id}");
}

#[test]
fn trailing_slash_is_a_no_op() {
    let t = PathTemplate::parse("/path/{id: [0-9]+}/other/");
    assert_eq!(t.len(), 3);
    assert_eq!(t.segments()[0], PathSegment::literal("path"));
    assert_eq!(t.constraint("id"), Some("[0-9]+"));
    assert_eq!(t.segments()[2], PathSegment::literal("other"));
}

#[test]
fn constraint_keeps_embedded_slashes() {
    let t = PathTemplate::parse(r"/path/{file: [\/A-Za-z0-9_\-\.]+.jpg}");
    assert_eq!(t.len(), 2);
    assert_eq!(t.segments()[1].variable_name(), Some("file"));
    assert_eq!(t.constraint("file"), Some(r"[\/A-Za-z0-9_\-\.]+.jpg"));
}

#[test]
fn rendering_uses_bare_variables() {
    let t = PathTemplate::parse("/orders/{id: [0-9]+}/items");
    assert_eq!(t.to_string(), "/orders/{id}/items");
    assert_eq!(t.servlet_pattern(), "/orders/*");
}

#[test]
fn joining_resource_and_method_paths() {
    let resource = PathTemplate::parse("/catalog");
    let method = PathTemplate::parse("{sku}/reviews/");
    let full = resource.join(&method);
    assert_eq!(full.to_string(), "/catalog/{sku}/reviews");
    assert_eq!(full.variables().collect::<Vec<_>>(), ["sku"]);
    assert!(full.has_variable("sku"));
    assert!(!full.has_variable("id"));
}

proptest! {
    #[test]
    fn parse_is_stable_under_rendering(s in "(/[a-z]{1,6}|/\\{[a-z]{1,4}\\}){0,6}/?") {
        let once = PathTemplate::parse(&s);
        let twice = PathTemplate::parse(&once.to_string());
        prop_assert_eq!(once.to_string(), twice.to_string());
        prop_assert_eq!(once.len(), twice.len());
    }
}
