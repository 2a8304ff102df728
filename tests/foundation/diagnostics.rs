//! Integration tests for diagnostics and exit status

use apimodel_foundation::{Diagnostic, Diagnostics, NodeRef, QName, Severity};

fn member() -> NodeRef {
    NodeRef::Member {
        owner: "shop.Order".into(),
        member: "buyer".into(),
    }
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn related_nodes_and_rule_tags() {
    let d = Diagnostic::error(member(), "dangling reference")
        .with_related(NodeRef::Type("shop.Customer".into()))
        .with_rule("idref-target");
    assert!(d.is_error());
    assert_eq!(d.related, vec![NodeRef::Type("shop.Customer".into())]);
    assert_eq!(
        d.to_string(),
        "error: member shop.Order.buyer: dangling reference [idref-target]"
    );
}

#[test]
fn node_refs_display() {
    let cases = [
        (NodeRef::Type("a.B".into()), "type a.B"),
        (
            NodeRef::RootElement(QName::new("urn:a", "b")),
            "root element {urn:a}b",
        ),
        (
            NodeRef::Operation {
                interface: "a.Shop".into(),
                operation: "buy".into(),
            },
            "operation a.Shop#buy",
        ),
        (
            NodeRef::ResourceMethod {
                resource: "a.Orders".into(),
                method: "list".into(),
            },
            "resource method a.Orders#list",
        ),
        (NodeRef::Schema(String::new()), "schema \"\""),
    ];
    for (node, shown) in cases {
        assert_eq!(node.to_string(), shown);
    }
}

// =============================================================================
// Exit Status
// =============================================================================

#[test]
fn empty_list_exits_zero() {
    assert_eq!(Diagnostics::new().exit_code(), 0);
}

#[test]
fn warnings_never_fail() {
    let list: Diagnostics = (0..5)
        .map(|i| Diagnostic::warning(NodeRef::Type(format!("a.T{i}")), "suspicious"))
        .collect();
    assert_eq!(list.len(), 5);
    assert!(!list.has_errors());
    assert_eq!(list.exit_code(), 0);
}

#[test]
fn one_error_fails() {
    let mut list: Diagnostics = vec![Diagnostic::warning(member(), "hmm")].into_iter().collect();
    list.extend([Diagnostic::new(Severity::Error, member(), "bad")]);
    assert_eq!(list.exit_code(), 1);
    assert_eq!(list.errors().count(), 1);
    assert_eq!(list.warnings().count(), 1);
}

#[test]
fn order_is_preserved() {
    let list: Diagnostics = ["first", "second", "third"]
        .into_iter()
        .map(|m| Diagnostic::warning(member(), m))
        .collect();
    let messages: Vec<_> = list.as_slice().iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["first", "second", "third"]);
}
