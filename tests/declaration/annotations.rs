//! Integration tests for annotation capability queries

use apimodel_declaration::{
    Annotation, AnnotationValue, Declaration, FormDefault, PackageDecl, TypeRef, names,
    package_of, simple_name_of,
};

#[test]
fn typed_attribute_access() {
    let a = Annotation::new(names::ELEMENT)
        .with("name", "total")
        .with("required", true)
        .with("order", 3_i64)
        .with("type", TypeRef::named("shop.Money"))
        .with("aliases", vec!["sum", "amount"]);

    assert_eq!(a.str("name"), Some("total"));
    assert_eq!(a.bool("required"), Some(true));
    assert!(a.flag("required"));
    assert!(!a.flag("nillable"));
    assert_eq!(a.value("order"), Some(&AnnotationValue::Int(3)));
    assert_eq!(a.type_ref("type"), Some(&TypeRef::named("shop.Money")));
    assert_eq!(a.strings("aliases"), ["sum", "amount"]);
    assert!(a.str("missing").is_none());
}

#[test]
fn declaration_queries() {
    let decl = Declaration::class("shop.orders.Order")
        .with_annotation(Annotation::new(names::ROOT_ELEMENT).with("name", "order"));
    assert!(decl.has(names::ROOT_ELEMENT));
    assert!(!decl.has(names::TRANSIENT));
    assert_eq!(decl.simple_name(), "Order");
    assert_eq!(decl.package(), "shop.orders");
    assert_eq!(
        decl.annotation(names::ROOT_ELEMENT).and_then(|a| a.str("name")),
        Some("order")
    );
}

#[test]
fn qualified_name_helpers() {
    assert_eq!(simple_name_of("a.b.C"), "C");
    assert_eq!(package_of("a.b.C"), "a.b");
    assert_eq!(simple_name_of("C"), "C");
    assert_eq!(package_of("C"), "");
}

#[test]
fn package_defaults() {
    let pkg = PackageDecl::new("shop")
        .with_namespace("urn:shop")
        .with_element_form(FormDefault::Qualified)
        .with_prefix("urn:shop", "s");
    assert_eq!(pkg.namespace.as_deref(), Some("urn:shop"));
    assert_eq!(pkg.element_form, FormDefault::Qualified);
    assert_eq!(pkg.attribute_form, FormDefault::Unset);
}
