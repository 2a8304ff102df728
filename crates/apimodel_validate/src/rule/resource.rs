//! Resource method rules.

use apimodel_foundation::Diagnostic;
use apimodel_model::ResourceParamKind;

use crate::engine::{Node, NodeKind, RuleContext};
use crate::rule::Rule;

/// A resource method reads at most one request body.
#[derive(Clone, Copy, Debug)]
pub struct SingleEntityParameter;

impl Rule for SingleEntityParameter {
    fn name(&self) -> &'static str {
        "single-entity-parameter"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::ResourceMethod
    }

    fn check(&self, node: Node<'_>, _cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::ResourceMethod(resource, method) = node else {
            return Vec::new();
        };
        let entities: Vec<&str> = method.entities().map(|p| p.name.as_str()).collect();
        if entities.len() > 1 {
            vec![Diagnostic::error(
                method.node_ref(resource),
                format!(
                    "resource method {} reads the request body into {} parameters ({})",
                    method.name,
                    entities.len(),
                    entities.join(", ")
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Path parameters name a variable of the method's full path.
#[derive(Clone, Copy, Debug)]
pub struct PathParameterBound;

impl Rule for PathParameterBound {
    fn name(&self) -> &'static str {
        "path-parameter-bound"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::ResourceMethod
    }

    fn check(&self, node: Node<'_>, _cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::ResourceMethod(resource, method) = node else {
            return Vec::new();
        };
        method
            .params
            .iter()
            .filter(|p| p.kind == ResourceParamKind::Path && !method.path.has_variable(&p.name))
            .map(|p| {
                Diagnostic::warning(
                    method.node_ref(resource),
                    format!(
                        "path parameter {} does not appear in {}",
                        p.name, method.path
                    ),
                )
            })
            .collect()
    }
}
