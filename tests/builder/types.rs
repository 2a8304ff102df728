//! Integration tests for data type assembly

use apimodel_builder::{BuildConfig, RootSet, build};
use apimodel_declaration::{
    Annotation, Declaration, DeclarationSet, MemberDecl, MethodDecl, TypeRef, names,
};
use apimodel_foundation::QName;
use apimodel_model::Shape;

use crate::shop;

fn build_types(set: &DeclarationSet, types: &[&str]) -> apimodel_model::Model {
    let roots = types.iter().fold(RootSet::new(), |r, n| r.with_type(*n));
    let (model, diagnostics) = build(set, &roots, &BuildConfig::default()).unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    model
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn self_reference_builds_one_type() {
    let set = DeclarationSet::new().with_package(shop()).with(
        Declaration::class("shop.Category")
            .with_field(MemberDecl::new("parent", TypeRef::named("shop.Category")))
            .with_field(MemberDecl::new(
                "children",
                TypeRef::collection(TypeRef::named("shop.Category")),
            )),
    );
    let model = build_types(&set, &["shop.Category"]);
    assert_eq!(model.type_definitions().len(), 1);

    let category = &model.type_definitions()[0];
    let members = &category.as_complex().unwrap().members;
    assert_eq!(members[0].shape, Shape::Reference(category.id));
    assert_eq!(members[1].shape, Shape::Reference(category.id).collection());
}

#[test]
fn mutual_references_build_each_type_once() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(
            Declaration::class("shop.Order")
                .with_field(MemberDecl::new("customer", TypeRef::named("shop.Customer"))),
        )
        .with(
            Declaration::class("shop.Customer")
                .with_field(MemberDecl::new("lastOrder", TypeRef::named("shop.Order"))),
        );
    let model = build_types(&set, &["shop.Order", "shop.Customer"]);
    assert_eq!(model.type_definitions().len(), 2);

    let order = model.type_by_declaration("shop.Order").unwrap();
    let customer = model.type_by_declaration("shop.Customer").unwrap();
    assert_eq!(
        order.as_complex().unwrap().members[0].shape,
        Shape::Reference(customer.id)
    );
    assert_eq!(
        customer.as_complex().unwrap().members[0].shape,
        Shape::Reference(order.id)
    );
}

#[test]
fn registration_order_is_arena_order() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(
            Declaration::class("shop.A").with_field(MemberDecl::new("b", TypeRef::named("shop.B"))),
        )
        .with(
            Declaration::class("shop.B").with_field(MemberDecl::new("c", TypeRef::named("shop.C"))),
        )
        .with(Declaration::class("shop.C"));
    let model = build_types(&set, &["shop.A"]);
    let order: Vec<_> = model
        .type_definitions()
        .iter()
        .map(|t| (t.id.0, t.declaration.as_str()))
        .collect();
    assert_eq!(order, [(0, "shop.A"), (1, "shop.B"), (2, "shop.C")]);
}

// =============================================================================
// Roots
// =============================================================================

#[test]
fn registry_methods_publish_their_return_types() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(
            Declaration::class("shop.Factory")
                .with_annotation(Annotation::new(names::REGISTRY))
                .with_method(MethodDecl::new("createOrder", TypeRef::named("shop.Order")))
                .with_method(MethodDecl::new("reset", TypeRef::Void)),
        )
        .with(Declaration::class("shop.Order"));
    let roots = RootSet::discover(&set, &["shop.Factory"]);
    assert_eq!(roots.registries, ["shop.Factory"]);

    let (model, diagnostics) = build(&set, &roots, &BuildConfig::default()).unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(model.type_definitions().len(), 1);
    assert_eq!(
        model.type_definitions()[0].qname,
        QName::new("urn:shop", "order")
    );
}

#[test]
fn missing_root_type_is_reported() {
    let set = DeclarationSet::new().with_package(shop());
    let roots = RootSet::new().with_type("shop.Ghost");
    let (model, diagnostics) = build(&set, &roots, &BuildConfig::default()).unwrap();
    assert!(model.type_definitions().is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
    assert!(diagnostics[0].message.contains("shop.Ghost"));
}

#[test]
fn unannotated_interfaces_are_not_types() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(Declaration::interface("shop.Priced"))
        .with(
            Declaration::class("shop.Order")
                .implements(TypeRef::named("shop.Priced"))
                .with_field(MemberDecl::new("pricing", TypeRef::named("shop.Priced"))),
        );
    let model = build_types(&set, &["shop.Order"]);
    assert_eq!(model.type_definitions().len(), 1);
    assert!(model.type_by_declaration("shop.Priced").is_none());
    assert_eq!(model.skip_reason("shop.Priced"), Some("an unannotated interface"));

    // Left for validation to report.
    let order = &model.type_definitions()[0];
    assert_eq!(
        order.as_complex().unwrap().members[0].shape,
        Shape::Unresolved("shop.Priced".to_string())
    );
}

#[test]
fn explicit_type_name_and_namespace() {
    let set = DeclarationSet::new().with_package(shop()).with(
        Declaration::class("shop.Order").with_annotation(
            Annotation::new(names::TYPE)
                .with("name", "purchaseOrder")
                .with("namespace", "urn:orders"),
        ),
    );
    let model = build_types(&set, &["shop.Order"]);
    let order = &model.type_definitions()[0];
    assert_eq!(order.qname, QName::new("urn:orders", "purchaseOrder"));
    assert_eq!(model.schema("urn:orders").unwrap().types, vec![order.id]);
}

#[test]
fn strict_config_rejects_raw_collections() {
    let set = DeclarationSet::new().with_package(shop()).with(
        Declaration::class("shop.Bag").with_field(MemberDecl::new("things", TypeRef::raw_collection())),
    );
    let roots = RootSet::new().with_type("shop.Bag");

    let (model, _) = build(&set, &roots, &BuildConfig::default()).unwrap();
    let bag = &model.type_definitions()[0];
    assert_eq!(bag.as_complex().unwrap().members[0].shape, Shape::Any.collection());

    assert!(build(&set, &roots, &BuildConfig::strict()).is_err());
}
