//! Integration tests for empty namespace validation and rule configuration

use apimodel_builder::RootSet;
use apimodel_declaration::{Annotation, Declaration, DeclarationSet, MemberDecl, TypeRef, names};
use apimodel_foundation::{NodeRef, Severity};
use apimodel_validate::ValidationConfig;

use crate::{check, check_with, shop};

fn unpackaged() -> DeclarationSet {
    DeclarationSet::new().with(
        Declaration::class("misc.Note").with_field(MemberDecl::new("text", TypeRef::string())),
    )
}

fn roots() -> RootSet {
    RootSet::new().with_type("misc.Note")
}

#[test]
fn type_without_namespace_is_one_error() {
    let diagnostics = check(&unpackaged(), &roots());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].node, NodeRef::Type("misc.Note".into()));
    assert_eq!(diagnostics[0].rule.as_deref(), Some("empty-type-namespace"));
}

#[test]
fn lenient_config_downgrades_to_warning() {
    let diagnostics = check_with(&unpackaged(), &roots(), ValidationConfig::lenient());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn disabled_rule_is_silent() {
    let config = ValidationConfig::default().with_disabled("empty-type-namespace");
    assert!(check_with(&unpackaged(), &roots(), config).is_empty());
}

#[test]
fn root_element_in_empty_namespace_is_reported_separately() {
    let set = DeclarationSet::new().with(
        Declaration::class("misc.Note").with_annotation(Annotation::new(names::ROOT_ELEMENT)),
    );
    let diagnostics = check(&set, &roots());
    let rules: Vec<_> = diagnostics.iter().filter_map(|d| d.rule.as_deref()).collect();
    assert_eq!(rules, ["empty-type-namespace", "empty-root-element-namespace"]);
}

#[test]
fn explicit_namespace_overrides_missing_package() {
    let set = DeclarationSet::new().with(
        Declaration::class("misc.Note")
            .with_annotation(Annotation::new(names::TYPE).with("namespace", "urn:notes")),
    );
    assert!(check(&set, &roots()).is_empty());
}

#[test]
fn package_namespace_is_clean() {
    let set = DeclarationSet::new()
        .with_package(shop())
        .with(Declaration::class("shop.Note"));
    assert!(check(&set, &RootSet::new().with_type("shop.Note")).is_empty());
}
