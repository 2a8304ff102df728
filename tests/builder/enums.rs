//! Integration tests for enumeration assembly

use apimodel_builder::{BuildConfig, RootSet, build};
use apimodel_declaration::{
    Annotation, Declaration, DeclarationSet, EnumConstant, MemberDecl, Primitive, TypeRef, names,
};
use apimodel_foundation::ErrorKind;
use apimodel_model::Shape;

use crate::shop;

fn constant(name: &str) -> EnumConstant {
    EnumConstant::new(name)
}

fn fallback(name: &str) -> EnumConstant {
    EnumConstant::new(name).with_annotation(Annotation::new(names::UNKNOWN_ENUM_VALUE))
}

fn valued(name: &str, value: &str) -> EnumConstant {
    EnumConstant::new(name).with_annotation(Annotation::new(names::ENUM_VALUE).with("value", value))
}

fn build_enum(decl: Declaration) -> apimodel_foundation::Result<apimodel_model::Model> {
    let name = decl.name.clone();
    let set = DeclarationSet::new().with_package(shop()).with(decl);
    build(&set, &RootSet::new().with_type(name), &BuildConfig::default()).map(|(m, _)| m)
}

#[test]
fn fallback_receives_unknown_tokens() {
    let model = build_enum(
        Declaration::enumeration("shop.Status")
            .with_constant(valued("OPEN", "open"))
            .with_constant(valued("CLOSED", "closed"))
            .with_constant(fallback("OTHER")),
    )
    .unwrap();
    let status = model.type_definitions()[0].as_enum().unwrap();

    assert_eq!(status.base, Primitive::String);
    assert_eq!(status.values.len(), 3);
    assert_eq!(status.decode("closed").unwrap().name, "CLOSED");
    assert_eq!(status.decode("CLOSED").unwrap().name, "OTHER");
    assert_eq!(status.fallback().unwrap().name, "OTHER");
}

#[test]
fn two_fallbacks_abort_the_build() {
    let err = build_enum(
        Declaration::enumeration("shop.Status")
            .with_constant(constant("OPEN"))
            .with_constant(fallback("UNKNOWN"))
            .with_constant(fallback("OTHER")),
    )
    .unwrap_err();

    let ErrorKind::DuplicateFallback { .. } = &err.kind else {
        panic!("expected a duplicate fallback, got {err}");
    };
    let message = err.to_string();
    assert!(message.contains("shop.Status"));
    assert!(message.contains("UNKNOWN"));
    assert!(message.contains("OTHER"));
}

#[test]
fn clashing_external_values_abort_the_build() {
    let err = build_enum(
        Declaration::enumeration("shop.Size")
            .with_constant(valued("SMALL", "s"))
            .with_constant(constant("s")),
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateEnumValue { .. }));
}

#[test]
fn numeric_base_keeps_tokens() {
    let model = build_enum(
        Declaration::enumeration("shop.Priority")
            .with_annotation(
                Annotation::new(names::ENUM).with("base", TypeRef::Primitive(Primitive::Int)),
            )
            .with_constant(EnumConstant::new("LOW").with_annotation(
                Annotation::new(names::ENUM_VALUE).with("value", 1_i64),
            ))
            .with_constant(EnumConstant::new("HIGH").with_annotation(
                Annotation::new(names::ENUM_VALUE).with("value", 9_i64),
            )),
    )
    .unwrap();
    let priority = model.type_definitions()[0].as_enum().unwrap();
    assert_eq!(priority.base, Primitive::Int);
    assert_eq!(priority.decode("9").unwrap().name, "HIGH");
    assert!(priority.decode("5").is_none());
}

#[test]
fn members_of_enum_type_use_enum_refs() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(Declaration::enumeration("shop.Status").with_constant(constant("OPEN")))
        .with(
            Declaration::class("shop.Order")
                .with_field(MemberDecl::new("status", TypeRef::named("shop.Status"))),
        );
    let (model, _) = build(
        &set,
        &RootSet::new().with_type("shop.Order"),
        &BuildConfig::default(),
    )
    .unwrap();
    let status = model.type_by_declaration("shop.Status").unwrap();
    let order = model.type_by_declaration("shop.Order").unwrap();
    assert_eq!(
        order.as_complex().unwrap().members[0].shape,
        Shape::EnumRef(status.id)
    );
}
