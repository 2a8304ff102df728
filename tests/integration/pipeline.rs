//! Integration tests for how building and validation combine

use apimodel::builder::{BuildConfig, RootSet};
use apimodel::declaration::{
    Annotation, Declaration, DeclarationSet, MemberDecl, MethodDecl, PackageDecl, ParamDecl,
    TypeRef, names,
};
use apimodel::foundation::Severity;
use apimodel::validate::{ValidationConfig, ValidationEngine};
use apimodel::compile;

fn shop() -> PackageDecl {
    PackageDecl::new("shop").with_namespace("urn:shop")
}

fn orders_service() -> DeclarationSet {
    DeclarationSet::new().with_package(shop()).with(
        Declaration::interface("shop.Orders")
            .with_annotation(Annotation::new(names::WEB_SERVICE))
            .with_method(
                MethodDecl::new("place", TypeRef::Void)
                    .with_param(ParamDecl::new("order", TypeRef::named("shop.Order"))),
            ),
    )
}

#[test]
fn builder_findings_precede_validation_findings() {
    let set = orders_service();
    let roots = RootSet::new()
        .with_type("shop.Gone")
        .with_endpoint_interface("shop.Orders");
    let compilation = compile(
        &set,
        &roots,
        &BuildConfig::default(),
        &ValidationEngine::default(),
    )
    .unwrap();

    let messages: Vec<_> = compilation
        .diagnostics
        .as_slice()
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(messages.len(), 2, "{messages:?}");
    assert!(messages[0].contains("shop.Gone"));
    assert!(messages[1].contains("shop.Order"));
    assert!(compilation.has_errors());
}

#[test]
fn repeated_compiles_do_not_share_claims() {
    let set = orders_service().with(Declaration::class("shop.Order"));
    let roots = RootSet::new().with_endpoint_interface("shop.Orders");
    let engine = ValidationEngine::default();

    for _ in 0..3 {
        let compilation = compile(&set, &roots, &BuildConfig::default(), &engine).unwrap();
        assert!(compilation.diagnostics.is_empty());
        assert_eq!(compilation.exit_code(), 0);
    }
}

#[test]
fn warnings_do_not_fail_the_build() {
    let set = DeclarationSet::new().with(
        Declaration::class("misc.Memo").with_field(MemberDecl::new("text", TypeRef::string())),
    );
    let engine = ValidationEngine::with_default_rules(ValidationConfig::lenient());
    let compilation = compile(
        &set,
        &RootSet::new().with_type("misc.Memo"),
        &BuildConfig::default(),
        &engine,
    )
    .unwrap();
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.diagnostics.as_slice()[0].severity, Severity::Warning);
    assert_eq!(compilation.exit_code(), 0);
}

#[test]
fn resource_with_two_bodies_is_reported() {
    let set = DeclarationSet::new().with_package(shop()).with(
        Declaration::class("shop.Notes")
            .with_annotation(Annotation::new(names::PATH).with("value", "/notes/{id}"))
            .with_method(
                MethodDecl::new("update", TypeRef::Void)
                    .with_annotation(Annotation::new(names::HTTP_METHOD).with("value", "PUT"))
                    .with_param(
                        ParamDecl::new("id", TypeRef::string()).with_annotation(
                            Annotation::new(names::PATH_PARAM).with("value", "id"),
                        ),
                    )
                    .with_param(ParamDecl::new("title", TypeRef::string()))
                    .with_param(ParamDecl::new("body", TypeRef::string())),
            ),
    );
    let roots = RootSet::discover(&set, &["shop.Notes"]);
    let compilation = compile(
        &set,
        &roots,
        &BuildConfig::default(),
        &ValidationEngine::default(),
    )
    .unwrap();

    let rules: Vec<_> = compilation
        .diagnostics
        .as_slice()
        .iter()
        .filter_map(|d| d.rule.as_deref())
        .collect();
    assert_eq!(rules, ["single-entity-parameter"]);
    assert_eq!(compilation.model.resources()[0].methods[0].path.to_string(), "/notes/{id}");
}
