//! Integration tests for qualified names and name casing

use apimodel_foundation::{QName, capitalize, decapitalize};

#[test]
fn unqualified_names_render_bare() {
    let q = QName::unqualified("total");
    assert!(q.is_unqualified());
    assert_eq!(q.to_string(), "total");
}

#[test]
fn qualified_names_render_with_namespace() {
    let q = QName::new("urn:shop", "order");
    assert!(!q.is_unqualified());
    assert_eq!(q.to_string(), "{urn:shop}order");
}

#[test]
fn equality_covers_both_parts() {
    assert_eq!(QName::new("urn:a", "x"), QName::new("urn:a", "x"));
    assert_ne!(QName::new("urn:a", "x"), QName::new("urn:b", "x"));
    assert_ne!(QName::new("urn:a", "x"), QName::unqualified("x"));
}

#[test]
fn casing_helpers() {
    assert_eq!(decapitalize("LineItem"), "lineItem");
    assert_eq!(decapitalize("URLInfo"), "URLInfo");
    assert_eq!(decapitalize(""), "");
    assert_eq!(capitalize("getOrder"), "GetOrder");
    assert_eq!(capitalize(""), "");
}
