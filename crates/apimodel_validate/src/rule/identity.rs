//! Identity graph rules.
//!
//! A type has at most one key (`Id`) member, and every reference
//! (`IdRef`) member must point at a type whose instances carry a key,
//! either directly, through a base type, or through one of the subtypes
//! it may be substituted by.

use std::collections::HashSet;

use apimodel_foundation::Diagnostic;
use apimodel_model::{Identity, Model, Primitive, Shape, TypeDefinition, TypeId};

use crate::engine::{Node, NodeKind, RuleContext};
use crate::rule::Rule;

/// At most one key across the flattened member set; keys are strings.
#[derive(Clone, Copy, Debug)]
pub struct SingleId;

impl Rule for SingleId {
    fn name(&self) -> &'static str {
        "single-id"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Type
    }

    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::Type(t) = node else {
            return Vec::new();
        };
        if t.as_complex().is_none() {
            return Vec::new();
        }

        let model = cx.model;
        let mut diagnostics = Vec::new();
        let mut first = None;

        for (owner, member) in model.flattened_members(t.id) {
            if member.identity != Identity::Id {
                continue;
            }
            if owner == t.id && !is_string(&member.shape) {
                diagnostics.push(Diagnostic::error(
                    model.member_ref(owner, member),
                    format!("key member {} must be a string, found {}", member.name, member.shape),
                ));
            }
            let Some((first_owner, first_member)) = first else {
                first = Some((owner, member));
                continue;
            };
            if owner == t.id {
                diagnostics.push(
                    Diagnostic::error(
                        model.member_ref(owner, member),
                        format!(
                            "{} already has key member {}",
                            t.qname.local, first_member.name
                        ),
                    )
                    .with_related(model.member_ref(first_owner, first_member)),
                );
            }
        }

        diagnostics
    }
}

fn is_string(shape: &Shape) -> bool {
    match shape {
        Shape::Value(Primitive::String) => true,
        Shape::AdaptedVia { target, .. } => is_string(target),
        _ => false,
    }
}

/// Every reference member resolves to a keyed type.
#[derive(Clone, Copy, Debug)]
pub struct IdRefTarget;

impl Rule for IdRefTarget {
    fn name(&self) -> &'static str {
        "idref-target"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Type
    }

    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::Type(t) = node else {
            return Vec::new();
        };
        let Some(complex) = t.as_complex() else {
            return Vec::new();
        };

        let model = cx.model;
        let mut diagnostics = Vec::new();

        for member in complex.members.iter().filter(|m| m.identity == Identity::IdRef) {
            let at = model.member_ref(t.id, member);
            match member.shape.item() {
                Shape::Any => {
                    if cx.config.warn_untyped_idref {
                        diagnostics.push(Diagnostic::warning(
                            at,
                            format!("reference member {} has no typed target", member.name),
                        ));
                    }
                }
                Shape::Unresolved(_) => {}
                Shape::Reference(target) | Shape::EnumRef(target) => {
                    if !is_keyed(model, *target, &mut HashSet::new()) {
                        diagnostics.push(
                            Diagnostic::error(
                                at,
                                format!(
                                    "reference member {} points at {}, which has no key member",
                                    member.name,
                                    target_name(model, *target)
                                ),
                            )
                            .with_related(model.type_ref(*target)),
                        );
                    }
                }
                other => diagnostics.push(Diagnostic::error(
                    at,
                    format!(
                        "reference member {} must point at a type, found {other}",
                        member.name
                    ),
                )),
            }
        }

        diagnostics
    }
}

/// Returns true if instances of `id` carry a key.
///
/// Looks at the flattened member set first, then at the substitution set.
/// `visited` keeps a cyclic substitution graph from recursing forever.
fn is_keyed(model: &Model, id: TypeId, visited: &mut HashSet<TypeId>) -> bool {
    if !visited.insert(id) {
        return false;
    }
    if model
        .flattened_members(id)
        .iter()
        .any(|(_, m)| m.identity == Identity::Id)
    {
        return true;
    }
    model
        .type_definition(id)
        .and_then(TypeDefinition::as_complex)
        .is_some_and(|c| c.substitutes.iter().any(|s| is_keyed(model, *s, visited)))
}

fn target_name(model: &Model, id: TypeId) -> String {
    model
        .type_definition(id)
        .map_or_else(|| id.to_string(), |t| t.declaration.clone())
}
