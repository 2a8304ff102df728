//! Integration tests for structural reachability

use apimodel_declaration::{
    Annotation, Declaration, DeclarationSet, DeclarationSource, MemberDecl, MethodDecl, ParamDecl,
    TypeRef, names,
};

fn names_of(found: &[&Declaration]) -> Vec<String> {
    found.iter().map(|d| d.name.clone()).collect()
}

#[test]
fn follows_fields_supertypes_and_signatures() {
    let set = DeclarationSet::new()
        .with(
            Declaration::class("shop.Order")
                .extends(TypeRef::named("shop.Entity"))
                .with_field(MemberDecl::new(
                    "lines",
                    TypeRef::collection(TypeRef::named("shop.Line")),
                )),
        )
        .with(Declaration::class("shop.Entity"))
        .with(Declaration::class("shop.Line"))
        .with(
            Declaration::interface("shop.Orders").with_method(
                MethodDecl::new("find", TypeRef::named("shop.Order"))
                    .with_param(ParamDecl::new("q", TypeRef::named("shop.Query")))
                    .throws(TypeRef::named("shop.NotFound")),
            ),
        )
        .with(Declaration::class("shop.Query"))
        .with(Declaration::class("shop.NotFound"));

    let found = set.declarations_reachable_from(&["shop.Orders"]);
    let mut found = names_of(&found);
    found.sort();
    assert_eq!(
        found,
        [
            "shop.Entity",
            "shop.Line",
            "shop.NotFound",
            "shop.Order",
            "shop.Orders",
            "shop.Query"
        ]
    );
}

#[test]
fn cycles_are_visited_once() {
    let set = DeclarationSet::new()
        .with(
            Declaration::class("a.A").with_field(MemberDecl::new("b", TypeRef::named("a.B"))),
        )
        .with(
            Declaration::class("a.B").with_field(MemberDecl::new("a", TypeRef::named("a.A"))),
        );
    let found = set.declarations_reachable_from(&["a.A", "a.B", "a.A"]);
    assert_eq!(names_of(&found), ["a.A", "a.B"]);
}

#[test]
fn annotation_types_are_followed() {
    let set = DeclarationSet::new()
        .with(
            Declaration::class("shop.Party").with_annotation(
                Annotation::new(names::SEE_ALSO).with(
                    "value",
                    vec![TypeRef::named("shop.Person"), TypeRef::named("shop.Company")],
                ),
            ),
        )
        .with(Declaration::class("shop.Person"))
        .with(Declaration::class("shop.Company"));
    let found = set.declarations_reachable_from(&["shop.Party"]);
    assert_eq!(found.len(), 3);
}

#[test]
fn missing_names_are_skipped() {
    let set = DeclarationSet::new().with(
        Declaration::class("a.A").with_field(MemberDecl::new("x", TypeRef::named("b.Missing"))),
    );
    let found = set.declarations_reachable_from(&["a.A", "c.Nothing"]);
    assert_eq!(names_of(&found), ["a.A"]);
    assert!(set.declaration("b.Missing").is_none());
}
