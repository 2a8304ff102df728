//! Unresolved references.

use apimodel_foundation::{Diagnostic, NodeRef};
use apimodel_model::{FaultDetail, Member, Shape, SimpleType, TypeId, TypeKind};

use crate::engine::{Node, NodeKind, RuleContext};
use crate::rule::Rule;

/// Flags shapes that name a declaration the source could not provide, or
/// one the builder reached but did not build.
#[derive(Clone, Copy, Debug)]
pub struct UnresolvedReference {
    kind: NodeKind,
}

impl UnresolvedReference {
    /// Creates the rule for one node kind.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self { kind }
    }
}

impl Rule for UnresolvedReference {
    fn name(&self) -> &'static str {
        "unresolved-reference"
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        match node {
            Node::Type(t) => match &t.kind {
                TypeKind::Complex(c) => {
                    members(cx, t.id, &c.members, &mut found);
                }
                TypeKind::Simple(
                    SimpleType::Restriction { base: shape, .. } | SimpleType::List { item: shape },
                ) => {
                    shape_at(shape, &node.node_ref(), &mut found);
                }
                TypeKind::Simple(SimpleType::Union { members }) => {
                    for shape in members {
                        shape_at(shape, &node.node_ref(), &mut found);
                    }
                }
                TypeKind::Enum(_) => {}
            },
            Node::Operation(_, op) => {
                let at = node.node_ref();
                for param in &op.params {
                    shape_at(&param.shape, &at, &mut found);
                }
                if let Some(result) = &op.result {
                    shape_at(&result.shape, &at, &mut found);
                }
            }
            Node::Fault(fault) => match &fault.detail {
                FaultDetail::Explicit(shape) => shape_at(shape, &node.node_ref(), &mut found),
                FaultDetail::Implicit(fields) => {
                    for field in fields {
                        shape_at(&field.shape, &node.node_ref(), &mut found);
                    }
                }
            },
            Node::ResourceMethod(_, method) => {
                let at = node.node_ref();
                for param in &method.params {
                    shape_at(&param.shape, &at, &mut found);
                }
                if let Some(shape) = &method.response {
                    shape_at(shape, &at, &mut found);
                }
            }
            _ => {}
        }

        found
            .into_iter()
            .map(|(at, name)| {
                let message = match cx.model.skip_reason(&name) {
                    Some(reason) => format!("{name} is not a data type ({reason})"),
                    None => format!("no declaration named {name} is available"),
                };
                Diagnostic::error(at, message)
            })
            .collect()
    }
}

fn members(
    cx: &RuleContext<'_>,
    owner: TypeId,
    members: &[Member],
    found: &mut Vec<(NodeRef, String)>,
) {
    for member in members {
        shape_at(&member.shape, &cx.model.member_ref(owner, member), found);
    }
}

fn shape_at(shape: &Shape, at: &NodeRef, found: &mut Vec<(NodeRef, String)>) {
    found.extend(
        shape
            .unresolved()
            .into_iter()
            .map(|name| (at.clone(), name.to_string())),
    );
}
