//! Integration tests for key and reference validation

use apimodel_builder::RootSet;
use apimodel_declaration::{Annotation, Declaration, DeclarationSet, MemberDecl, TypeRef, names};
use apimodel_foundation::NodeRef;

use crate::{check, errors, shop};

fn key(name: &str) -> MemberDecl {
    MemberDecl::new(name, TypeRef::string()).with_annotation(Annotation::new(names::ID))
}

fn reference(name: &str, target: &str) -> MemberDecl {
    MemberDecl::new(name, TypeRef::named(target)).with_annotation(Annotation::new(names::IDREF))
}

fn order_with_buyer(customer: Declaration) -> DeclarationSet {
    DeclarationSet::new()
        .with_package(shop())
        .with(customer)
        .with(
            Declaration::class("shop.Order")
                .with_field(MemberDecl::new("total", TypeRef::string()))
                .with_field(reference("buyer", "shop.Customer")),
        )
}

fn roots() -> RootSet {
    RootSet::new().with_type("shop.Order")
}

#[test]
fn reference_to_unkeyed_type_is_one_error() {
    let set = order_with_buyer(
        Declaration::class("shop.Customer").with_field(MemberDecl::new("name", TypeRef::string())),
    );
    let diagnostics = check(&set, &roots());
    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1, "{diagnostics:?}");
    assert_eq!(errors[0].rule.as_deref(), Some("idref-target"));
    assert_eq!(
        errors[0].node,
        NodeRef::Member {
            owner: "shop.Order".into(),
            member: "buyer".into()
        }
    );
}

#[test]
fn reference_to_keyed_type_is_clean() {
    let set = order_with_buyer(
        Declaration::class("shop.Customer")
            .with_field(key("id"))
            .with_field(MemberDecl::new("name", TypeRef::string())),
    );
    assert!(errors(&check(&set, &roots())).is_empty());
}

#[test]
fn inherited_key_satisfies_reference() {
    let set = order_with_buyer(
        Declaration::class("shop.Customer")
            .extends(TypeRef::named("shop.Party"))
            .with_field(MemberDecl::new("name", TypeRef::string())),
    )
    .with(Declaration::class("shop.Party").with_field(key("id")));
    assert!(errors(&check(&set, &roots())).is_empty());
}

#[test]
fn key_on_a_listed_subtype_satisfies_reference() {
    let set = order_with_buyer(
        Declaration::class("shop.Customer").with_annotation(
            Annotation::new(names::SEE_ALSO).with("types", vec![TypeRef::named("shop.Member")]),
        ),
    )
    .with(
        Declaration::class("shop.Member")
            .extends(TypeRef::named("shop.Customer"))
            .with_field(key("number")),
    );
    assert!(errors(&check(&set, &roots())).is_empty());
}

#[test]
fn second_key_is_an_error() {
    let set = DeclarationSet::new().with_package(shop()).with(
        Declaration::class("shop.Order")
            .with_field(key("id"))
            .with_field(key("code")),
    );
    let diagnostics = check(&set, &roots());
    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule.as_deref(), Some("single-id"));
}
