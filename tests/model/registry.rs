//! Integration tests for namespace registration and prefixes

use apimodel_foundation::{NodeRef, QName};
use apimodel_model::{
    ComplexType, NamespaceRegistry, RootElementDeclaration, TypeDefinition, TypeId, TypeKind,
};

fn definition(id: u32, namespace: &str, local: &str, declaration: &str) -> TypeDefinition {
    TypeDefinition {
        id: TypeId(id),
        qname: QName::new(namespace, local),
        declaration: declaration.to_string(),
        doc: None,
        kind: TypeKind::Complex(ComplexType::default()),
    }
}

#[test]
fn same_qname_is_rejected() {
    let mut registry = NamespaceRegistry::new();
    registry
        .register_type(&definition(0, "urn:a", "order", "a.Order"))
        .unwrap();
    let err = registry
        .register_type(&definition(1, "urn:a", "order", "b.Order"))
        .unwrap_err();
    assert!(err.is_error());
    assert!(err.message.contains("a.Order"));

    assert_eq!(registry.lookup(&QName::new("urn:a", "order")), Some(TypeId(0)));
    assert_eq!(registry.schemas()[0].types, vec![TypeId(0)]);
}

#[test]
fn same_local_name_in_other_namespace_is_fine() {
    let mut registry = NamespaceRegistry::new();
    registry
        .register_type(&definition(0, "urn:a", "order", "a.Order"))
        .unwrap();
    registry
        .register_type(&definition(1, "urn:b", "order", "b.Order"))
        .unwrap();
    assert_eq!(registry.schemas().len(), 2);
}

#[test]
fn duplicate_root_element_is_rejected() {
    let mut registry = NamespaceRegistry::new();
    let root = |decl: &str| RootElementDeclaration {
        qname: QName::new("urn:a", "order"),
        type_id: TypeId(0),
        declaration: decl.to_string(),
    };
    registry.register_root_element(0, &root("a.Order")).unwrap();
    assert!(registry.register_root_element(1, &root("a.Other")).is_err());
    assert_eq!(registry.schemas()[0].root_elements, vec![0]);
}

fn prefixes(order: &[&str]) -> Vec<(String, String)> {
    let mut registry = NamespaceRegistry::new()
        .with_known_prefixes([("http://www.w3.org/2001/XMLSchema", "xs")]);
    registry
        .add_prefix("urn:pinned", "pin", "pinned.Order")
        .unwrap();
    for ns in order {
        registry.schema_mut(ns);
    }
    registry.assign_prefixes();
    registry
        .schemas()
        .iter()
        .map(|s| (s.namespace.clone(), s.prefix.clone()))
        .collect()
}

#[test]
fn prefixes_follow_first_seen_order() {
    let assigned = prefixes(&["urn:b", "", "urn:pinned", "urn:a"]);
    assert_eq!(
        assigned,
        [
            ("urn:b".to_string(), "ns0".to_string()),
            (String::new(), String::new()),
            ("urn:pinned".to_string(), "pin".to_string()),
            ("urn:a".to_string(), "ns1".to_string()),
        ]
    );
}

#[test]
fn prefixes_are_stable_across_runs() {
    let order = ["urn:x", "urn:y", "urn:z", "http://www.w3.org/2001/XMLSchema"];
    assert_eq!(prefixes(&order), prefixes(&order));
    assert_eq!(prefixes(&order)[3].1, "xs");
}

#[test]
fn clashing_package_prefix_falls_back_to_generated() {
    let mut registry = NamespaceRegistry::new();
    registry.add_prefix("urn:a", "p", "a.Order").unwrap();
    let warning = registry.add_prefix("urn:b", "p", "b.Order").unwrap_err();
    assert!(!warning.is_error());
    assert_eq!(warning.node, NodeRef::Type("b.Order".to_string()));
    assert!(warning.message.contains("urn:a"));

    // Reported once per namespace and prefix.
    assert!(registry.add_prefix("urn:b", "p", "b.Item").is_ok());

    registry.schema_mut("urn:a");
    registry.schema_mut("urn:b");
    registry.assign_prefixes();
    let assigned: Vec<_> = registry
        .schemas()
        .iter()
        .map(|s| (s.namespace.as_str(), s.prefix.as_str()))
        .collect();
    assert_eq!(assigned, [("urn:a", "p"), ("urn:b", "ns0")]);
}

#[test]
fn imports_skip_self_references() {
    let mut registry = NamespaceRegistry::new();
    registry.add_import("urn:a", "urn:a");
    registry.add_import("urn:a", "urn:b");
    let a = &registry.schemas()[0];
    assert_eq!(a.imports.iter().collect::<Vec<_>>(), ["urn:b"]);
}
