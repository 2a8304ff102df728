//! Integration tests for endpoint interface and resource assembly

use apimodel_builder::{BuildConfig, RootSet, build};
use apimodel_declaration::{
    Annotation, Declaration, DeclarationSet, MemberDecl, MethodDecl, ParamDecl, TypeRef, names,
};
use apimodel_foundation::QName;
use apimodel_model::{FaultDetail, Model, ParameterStyle, Shape};

use crate::shop;

fn service(name: &str, method: MethodDecl) -> Declaration {
    Declaration::interface(name)
        .with_annotation(Annotation::new(names::WEB_SERVICE))
        .with_method(method)
}

fn shop_services() -> DeclarationSet {
    DeclarationSet::new()
        .with_package(shop())
        .with(Declaration::class("shop.Order").with_field(MemberDecl::new("id", TypeRef::string())))
        .with(Declaration::class("shop.Problem").with_field(MemberDecl::new("code", TypeRef::string())))
        .with(
            Declaration::class("shop.Rejected").with_annotation(
                Annotation::new(names::WEB_FAULT)
                    .with("name", "rejection")
                    .with("info", TypeRef::named("shop.Problem")),
            ),
        )
        .with(
            Declaration::class("shop.NotFound")
                .with_field(MemberDecl::new("key", TypeRef::string())),
        )
        .with(service(
            "shop.Orders",
            MethodDecl::new("place", TypeRef::named("shop.Order"))
                .with_param(ParamDecl::new("order", TypeRef::named("shop.Order")))
                .throws(TypeRef::named("shop.Rejected"))
                .throws(TypeRef::named("shop.NotFound")),
        ))
        .with(service(
            "shop.Lookup",
            MethodDecl::new("find", TypeRef::named("shop.Order"))
                .with_param(ParamDecl::new("id", TypeRef::string()))
                .throws(TypeRef::named("shop.NotFound")),
        ))
}

fn build_services() -> Model {
    let set = shop_services();
    let roots = RootSet::discover(&set, &["shop.Orders", "shop.Lookup"]);
    assert_eq!(roots.endpoint_interfaces.len(), 2);
    let (model, diagnostics) = build(&set, &roots, &BuildConfig::default()).unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    model
}

#[test]
fn signatures_reach_data_types() {
    let model = build_services();
    let declared: Vec<_> = model
        .type_definitions()
        .iter()
        .map(|t| t.declaration.as_str())
        .collect();
    assert!(declared.contains(&"shop.Order"));
    assert!(declared.contains(&"shop.Problem"));
    assert!(!declared.contains(&"shop.Rejected"));
}

#[test]
fn explicit_fault_info_is_a_shape() {
    let model = build_services();
    let problem = model.type_by_declaration("shop.Problem").unwrap();
    let rejected = model
        .faults()
        .iter()
        .find(|f| f.declaration == "shop.Rejected")
        .unwrap();
    assert_eq!(rejected.element, QName::new("urn:shop", "rejection"));
    assert_eq!(rejected.detail, FaultDetail::Explicit(Shape::Reference(problem.id)));
}

#[test]
fn faults_are_shared_across_interfaces() {
    let model = build_services();
    assert_eq!(model.faults().len(), 2);

    let not_found = model
        .faults()
        .iter()
        .find(|f| f.declaration == "shop.NotFound")
        .unwrap();
    let place = &model.endpoint_interfaces()[0].operations[0];
    let find = &model.endpoint_interfaces()[1].operations[0];
    assert!(place.faults.contains(&not_found.id));
    assert_eq!(find.faults, vec![not_found.id]);
    assert_eq!(model.fault(not_found.id), Some(not_found));
}

#[test]
fn operations_default_to_wrapped() {
    let model = build_services();
    let (interface, place) = model.operations().next().unwrap();
    assert_eq!(interface.declaration, "shop.Orders");
    assert_eq!(place.style, ParameterStyle::Wrapped);
    assert_eq!(
        place.request_wrapper.as_ref().unwrap().class_name,
        "shop.wrappers.Place"
    );
    assert_eq!(
        place.response_wrapper.as_ref().unwrap().class_name,
        "shop.wrappers.PlaceResponse"
    );
    assert_eq!(place.inputs().count(), 1);
}

#[test]
fn sub_resources_are_registered_once() {
    let set = DeclarationSet::new()
        .with(
            Declaration::class("api.Root")
                .with_annotation(Annotation::new(names::PATH).with("value", "/"))
                .with_method(
                    MethodDecl::new("items", TypeRef::named("api.Items"))
                        .with_annotation(Annotation::new(names::PATH).with("value", "items")),
                )
                .with_method(
                    MethodDecl::new("goods", TypeRef::named("api.Items"))
                        .with_annotation(Annotation::new(names::PATH).with("value", "goods")),
                ),
        )
        .with(
            Declaration::class("api.Items").with_method(
                MethodDecl::new("list", TypeRef::collection(TypeRef::string()))
                    .with_annotation(Annotation::new(names::HTTP_METHOD).with("value", "GET")),
            ),
        );
    let roots = RootSet::new().with_resource("api.Root");
    let (model, _) = build(&set, &roots, &BuildConfig::default()).unwrap();

    assert_eq!(model.resources().len(), 2);
    let items = &model.resources()[1];
    assert_eq!(items.path.to_string(), "/items");
    assert_eq!(items.parent.as_deref(), Some("api.Root"));

    let (resource, list) = model.resource_methods().find(|(_, m)| m.name == "list").unwrap();
    assert_eq!(resource.declaration, "api.Items");
    assert_eq!(list.http_method.as_deref(), Some("GET"));
    assert_eq!(list.response, Some(Shape::Value(apimodel_model::Primitive::String).collection()));
}
