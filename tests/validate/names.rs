//! Integration tests for operation and synthetic name validation

use apimodel_builder::RootSet;
use apimodel_declaration::{
    Annotation, Declaration, DeclarationSet, MemberDecl, MethodDecl, ParamDecl, TypeRef, names,
};
use apimodel_foundation::NodeRef;

use crate::{check, errors, shop};

fn service(name: &str) -> Declaration {
    Declaration::interface(name).with_annotation(Annotation::new(names::WEB_SERVICE))
}

fn get_order() -> MethodDecl {
    MethodDecl::new("getOrder", TypeRef::string()).with_param(ParamDecl::new("id", TypeRef::string()))
}

#[test]
fn one_operation_claims_its_wrappers_cleanly() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(service("shop.Orders").with_method(get_order()));
    let roots = RootSet::new().with_endpoint_interface("shop.Orders");
    assert!(check(&set, &roots).is_empty());
}

#[test]
fn second_claim_of_a_wrapper_name_is_one_error() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(service("shop.Orders").with_method(get_order()))
        .with(service("shop.Archive").with_method(get_order()));
    let roots = RootSet::new()
        .with_endpoint_interface("shop.Orders")
        .with_endpoint_interface("shop.Archive");

    let diagnostics = check(&set, &roots);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    let error = &diagnostics[0];
    assert!(error.is_error());
    assert_eq!(error.rule.as_deref(), Some("synthetic-name-uniqueness"));
    assert_eq!(
        error.node,
        NodeRef::Operation {
            interface: "shop.Archive".into(),
            operation: "getOrder".into()
        }
    );
    assert_eq!(
        error.related,
        vec![NodeRef::Operation {
            interface: "shop.Orders".into(),
            operation: "getOrder".into()
        }]
    );
    assert!(error.message.contains("shop.wrappers.GetOrder"));
    assert!(error.message.contains("shop.Archive"));
    assert!(error.message.contains("shop.Orders"));
}

#[test]
fn renamed_wrapper_avoids_the_collision() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(service("shop.Orders").with_method(get_order()))
        .with(
            service("shop.Archive").with_method(
                get_order()
                    .with_annotation(
                        Annotation::new(names::REQUEST_WRAPPER)
                            .with("class-name", "shop.archive.GetOrder"),
                    )
                    .with_annotation(
                        Annotation::new(names::RESPONSE_WRAPPER)
                            .with("class-name", "shop.archive.GetOrderResponse"),
                    ),
            ),
        );
    let roots = RootSet::new()
        .with_endpoint_interface("shop.Orders")
        .with_endpoint_interface("shop.Archive");
    assert!(check(&set, &roots).is_empty());
}

#[test]
fn implicit_fault_beans_share_the_name_space() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(
            Declaration::class("shop.Missing")
                .with_field(MemberDecl::new("key", TypeRef::string())),
        )
        .with(
            Declaration::class("shop.other.Missing")
                .with_annotation(
                    Annotation::new(names::WEB_FAULT).with("fault-bean", "shop.wrappers.MissingBean"),
                )
                .with_field(MemberDecl::new("key", TypeRef::string())),
        )
        .with(
            service("shop.Orders").with_method(
                get_order()
                    .throws(TypeRef::named("shop.Missing"))
                    .throws(TypeRef::named("shop.other.Missing")),
            ),
        );
    let roots = RootSet::new().with_endpoint_interface("shop.Orders");

    let diagnostics = check(&set, &roots);
    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1, "{diagnostics:?}");
    assert_eq!(errors[0].node, NodeRef::Fault("shop.other.Missing".into()));
    assert_eq!(errors[0].related, vec![NodeRef::Fault("shop.Missing".into())]);
}

#[test]
fn overloaded_operation_names_clash() {
    let set = DeclarationSet::new().with_package(shop()).with(
        service("shop.Orders")
            .with_annotation(Annotation::new(names::BINDING).with("style", "bare"))
            .with_method(get_order())
            .with_method(
                MethodDecl::new("getOrder", TypeRef::string())
                    .with_param(ParamDecl::new("code", TypeRef::string())),
            ),
    );
    let roots = RootSet::new().with_endpoint_interface("shop.Orders");

    let diagnostics = check(&set, &roots);
    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1, "{diagnostics:?}");
    assert_eq!(errors[0].rule.as_deref(), Some("unique-operation-names"));
    assert_eq!(
        errors[0].node,
        NodeRef::Operation {
            interface: "shop.Orders".into(),
            operation: "getOrder".into()
        }
    );
}

#[test]
fn one_way_operation_with_result_is_an_error() {
    let set = DeclarationSet::new().with_package(shop()).with(
        service("shop.Orders").with_method(get_order().with_annotation(Annotation::new(names::ONE_WAY))),
    );
    let roots = RootSet::new().with_endpoint_interface("shop.Orders");

    let diagnostics = check(&set, &roots);
    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1, "{diagnostics:?}");
    assert_eq!(errors[0].rule.as_deref(), Some("one-way-operation"));
}
