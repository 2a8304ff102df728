//! Member layout rules for complex types.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use apimodel_foundation::{Diagnostic, QName};
use apimodel_model::{Member, MemberCategory, Model, TypeDefinition, TypeId};

use crate::engine::{Node, NodeKind, RuleContext};
use crate::rule::Rule;

// =============================================================================
// Unique names
// =============================================================================

/// Flags two members of one flattened member set that publish the same
/// name in the same category.
///
/// Wrapper elements share the element name space.
#[derive(Clone, Copy, Debug)]
pub struct UniqueMemberNames;

impl Rule for UniqueMemberNames {
    fn name(&self) -> &'static str {
        "unique-member-names"
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
        let mut seen: HashMap<(MemberCategory, &QName), (TypeId, &Member)> = HashMap::new();
        let mut diagnostics = Vec::new();

        for (owner, member) in model.flattened_members(t.id) {
            if member.is_value() {
                continue;
            }
            let mut names = vec![(member.category(), &member.qname)];
            if let Some(wrapper) = member.wrapper().filter(|w| **w != member.qname) {
                names.push((MemberCategory::Element, wrapper));
            }

            for key in names {
                match seen.entry(key) {
                    Entry::Occupied(first) => {
                        // Inherited clashes are reported on the type that declares both.
                        if owner != t.id {
                            continue;
                        }
                        let (first_owner, first_member) = *first.get();
                        diagnostics.push(
                            Diagnostic::error(
                                model.member_ref(owner, member),
                                format!(
                                    "{} name {} is already used by member {}",
                                    key.0, key.1, first_member.name
                                ),
                            )
                            .with_related(model.member_ref(first_owner, first_member)),
                        );
                    }
                    Entry::Vacant(slot) => {
                        slot.insert((owner, member));
                    }
                }
            }
        }

        diagnostics
    }
}

// =============================================================================
// Value member
// =============================================================================

/// Checks the placement of a type's text content.
///
/// A type has at most one value member. A value member excludes element
/// members and may not extend a base type that has members of its own. The
/// value itself must be text.
#[derive(Clone, Copy, Debug)]
pub struct ValueMember;

impl Rule for ValueMember {
    fn name(&self) -> &'static str {
        "value-member"
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
        let mut values = complex.members.iter().filter(|m| m.is_value());
        let Some(value) = values.next() else {
            return diagnostics;
        };
        let at = model.member_ref(t.id, value);

        for extra in values {
            diagnostics.push(
                Diagnostic::error(
                    model.member_ref(t.id, extra),
                    format!("{} already has value member {}", t.qname.local, value.name),
                )
                .with_related(at.clone()),
            );
        }

        if let Some(base) = complex.base.filter(|b| !model.flattened_members(*b).is_empty()) {
            diagnostics.push(
                Diagnostic::error(
                    at.clone(),
                    format!("value member {} extends a base type with members", value.name),
                )
                .with_related(model.type_ref(base)),
            );
        } else if let Some(element) = complex.elements().next() {
            diagnostics.push(
                Diagnostic::error(
                    at.clone(),
                    format!(
                        "value member {} cannot be combined with element {}",
                        value.name, element.name
                    ),
                )
                .with_related(model.member_ref(t.id, element)),
            );
        }

        if value.shape.unresolved().is_empty() && !model.is_simple_shape(value.shape.item()) {
            diagnostics.push(Diagnostic::error(
                at,
                format!("value member {} must be text, found {}", value.name, value.shape),
            ));
        }

        diagnostics
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Flags attributes whose values are not text.
#[derive(Clone, Copy, Debug)]
pub struct AttributeSimpleValue;

impl Rule for AttributeSimpleValue {
    fn name(&self) -> &'static str {
        "attribute-simple-value"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Type
    }

    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic> {
        let Node::Type(t) = node else {
            return Vec::new();
        };
        let model = cx.model;
        t.as_complex()
            .into_iter()
            .flat_map(|c| c.attributes())
            .filter(|a| a.shape.unresolved().is_empty())
            .filter(|a| !model.is_simple_shape(a.shape.item()))
            .map(|a| structured_attribute(model, t, a))
            .collect()
    }
}

fn structured_attribute(model: &Model, t: &TypeDefinition, attribute: &Member) -> Diagnostic {
    Diagnostic::error(
        model.member_ref(t.id, attribute),
        format!(
            "attribute {} must have a text value, found {}",
            attribute.qname, attribute.shape
        ),
    )
}
