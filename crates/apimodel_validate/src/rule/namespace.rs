//! Empty namespace detection.

use apimodel_foundation::Diagnostic;

use crate::engine::{Node, NodeKind, RuleContext};
use crate::rule::Rule;

/// Flags nodes published in the empty namespace.
///
/// One instance per node kind; the severity comes from the configuration.
#[derive(Clone, Copy, Debug)]
pub struct EmptyNamespace {
    kind: NodeKind,
}

impl EmptyNamespace {
    /// Creates the rule for types, root elements or operations.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self { kind }
    }
}

impl Rule for EmptyNamespace {
    fn name(&self) -> &'static str {
        match self.kind {
            NodeKind::RootElement => "empty-root-element-namespace",
            NodeKind::Operation => "empty-operation-namespace",
            _ => "empty-type-namespace",
        }
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let (empty, what) = match node {
            Node::Type(t) => (t.namespace().is_empty(), format!("type {}", t.qname.local)),
            Node::RootElement(r) => (
                r.namespace().is_empty(),
                format!("root element {}", r.qname.local),
            ),
            Node::Operation(ei, op) => (
                ei.namespace.is_empty(),
                format!("operation {} of {}", op.name, ei.name),
            ),
            _ => return Vec::new(),
        };
        if empty {
            vec![Diagnostic::new(
                cx.config.empty_namespace,
                node.node_ref(),
                format!("{what} is published in the empty namespace"),
            )]
        } else {
            Vec::new()
        }
    }
}
