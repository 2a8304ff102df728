//! Endpoint interface and operation rules.

use std::collections::HashMap;

use apimodel_foundation::{Diagnostic, NodeRef};
use apimodel_model::{Operation, ParameterStyle};

use crate::engine::{Node, NodeKind, RuleContext};
use crate::rule::Rule;

/// Flags operations of one interface that publish the same name.
#[derive(Clone, Copy, Debug)]
pub struct UniqueOperationNames;

impl Rule for UniqueOperationNames {
    fn name(&self) -> &'static str {
        "unique-operation-names"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::EndpointInterface
    }

    fn check(&self, node: Node<'_>, _cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::EndpointInterface(ei) = node else {
            return Vec::new();
        };
        let mut seen: HashMap<&str, &Operation> = HashMap::new();
        let mut diagnostics = Vec::new();
        for op in &ei.operations {
            if let Some(first) = seen.get(op.name.as_str()) {
                diagnostics.push(Diagnostic::error(
                    op.node_ref(ei),
                    format!(
                        "operation name {} is published by both {} and {}",
                        op.name, first.method, op.method
                    ),
                ));
            } else {
                seen.insert(&op.name, op);
            }
        }
        diagnostics
    }
}

/// One-way operations have no response: no result, no faults and no
/// output parameters.
#[derive(Clone, Copy, Debug)]
pub struct OneWayOperation;

impl Rule for OneWayOperation {
    fn name(&self) -> &'static str {
        "one-way-operation"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Operation
    }

    fn check(&self, node: Node<'_>, _cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::Operation(ei, op) = node else {
            return Vec::new();
        };
        if !op.one_way {
            return Vec::new();
        }
        let at = op.node_ref(ei);
        let mut diagnostics = Vec::new();
        if op.result.is_some() {
            diagnostics.push(Diagnostic::error(
                at.clone(),
                format!("one-way operation {} returns a value", op.name),
            ));
        }
        if !op.faults.is_empty() {
            diagnostics.push(Diagnostic::error(
                at.clone(),
                format!("one-way operation {} declares faults", op.name),
            ));
        }
        if let Some(param) = op.outputs().next() {
            diagnostics.push(Diagnostic::error(
                at,
                format!(
                    "one-way operation {} has output parameter {}",
                    op.name, param.name
                ),
            ));
        }
        diagnostics
    }
}

/// Bare operations carry at most one body part each way.
///
/// Header parts do not count. A bare operation with no input part is
/// legal but suspicious and gets a warning.
#[derive(Clone, Copy, Debug)]
pub struct BareOperation;

impl Rule for BareOperation {
    fn name(&self) -> &'static str {
        "bare-operation"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Operation
    }

    fn check(&self, node: Node<'_>, _cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::Operation(ei, op) = node else {
            return Vec::new();
        };
        if op.style != ParameterStyle::Bare {
            return Vec::new();
        }
        let at = op.node_ref(ei);
        let inputs = op.inputs().filter(|p| !p.header).count();
        let outputs = op.outputs().filter(|p| !p.header).count()
            + usize::from(op.result.as_ref().is_some_and(|r| !r.header));

        let mut diagnostics = Vec::new();
        match inputs {
            0 => diagnostics.push(Diagnostic::warning(
                at.clone(),
                format!("bare operation {} has no input part", op.name),
            )),
            1 => {}
            n => diagnostics.push(Diagnostic::error(
                at.clone(),
                format!("bare operation {} has {n} input parts; at most one is allowed", op.name),
            )),
        }
        if outputs > 1 {
            diagnostics.push(Diagnostic::error(
                at,
                format!(
                    "bare operation {} has {outputs} output parts; at most one is allowed",
                    op.name
                ),
            ));
        }
        diagnostics
    }
}

/// Claims the synthetic class names of request/response wrappers and
/// implicit fault beans.
///
/// The first claim of a name succeeds. A node whose names are already
/// taken gets one error naming every earlier claimant.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticNames {
    kind: NodeKind,
}

impl SyntheticNames {
    /// Creates the rule for operations or faults.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self { kind }
    }
}

impl Rule for SyntheticNames {
    fn name(&self) -> &'static str {
        "synthetic-name-uniqueness"
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let names: Vec<&str> = match node {
            Node::Operation(_, op) => op
                .request_wrapper
                .iter()
                .chain(&op.response_wrapper)
                .map(|w| w.class_name.as_str())
                .collect(),
            Node::Fault(fault) if fault.is_implicit() => vec![fault.bean_name.as_str()],
            _ => return Vec::new(),
        };

        let claimant = node.node_ref();
        let mut taken: Vec<&str> = Vec::new();
        let mut holders: Vec<NodeRef> = Vec::new();
        for name in names {
            if let Err(holder) = cx.claimed.claim(name, &claimant) {
                taken.push(name);
                if !holders.contains(&holder) {
                    holders.push(holder);
                }
            }
        }
        if taken.is_empty() {
            return Vec::new();
        }

        let message = format!(
            "synthetic class name {} for {claimant} is already claimed by {}",
            taken.join(", "),
            holders
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let diagnostic = holders
            .into_iter()
            .fold(Diagnostic::error(claimant, message), Diagnostic::with_related);
        vec![diagnostic]
    }
}
