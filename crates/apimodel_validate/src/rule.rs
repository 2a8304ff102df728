//! Validation rules.
//!
//! A [`Rule`] checks one kind of model node and returns its findings. The
//! default set, in run order:
//!
//! | Rule | Node | Finding |
//! |------|------|---------|
//! | `empty-*-namespace` | type, root element, operation | published in the empty namespace |
//! | `unresolved-reference` | type, operation, fault, resource method | refers to a missing declaration |
//! | `unique-member-names` | type | two members publish the same name |
//! | `value-member` | type | misplaced text content |
//! | `attribute-simple-value` | type | structured attribute |
//! | `single-id` | type | more than one key, or a non-string key |
//! | `idref-target` | type | reference to a type without a key |
//! | `unique-operation-names` | endpoint interface | overloaded operation name |
//! | `one-way-operation` | operation | one-way operation with a response |
//! | `bare-operation` | operation | bare operation with several parts |
//! | `synthetic-name-uniqueness` | operation, fault | generated class name taken |
//! | `single-entity-parameter` | resource method | several request bodies |
//! | `path-parameter-bound` | resource method | path parameter without a variable |

use apimodel_foundation::Diagnostic;

use crate::engine::{Node, NodeKind, RuleContext};

mod identity;
mod member;
mod namespace;
mod operation;
mod reference;
mod resource;

pub use identity::{IdRefTarget, SingleId};
pub use member::{AttributeSimpleValue, UniqueMemberNames, ValueMember};
pub use namespace::EmptyNamespace;
pub use operation::{BareOperation, OneWayOperation, SyntheticNames, UniqueOperationNames};
pub use reference::UnresolvedReference;
pub use resource::{PathParameterBound, SingleEntityParameter};

/// One validation check.
pub trait Rule {
    /// Stable rule name, used to tag and disable findings.
    fn name(&self) -> &'static str;

    /// The kind of node this rule checks.
    fn kind(&self) -> NodeKind;

    /// Checks one node of this rule's kind.
    fn check(&self, node: Node<'_>, cx: &mut RuleContext<'_>) -> Vec<Diagnostic>;
}

/// Returns the default rule set, in run order.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EmptyNamespace::new(NodeKind::Type)),
        Box::new(EmptyNamespace::new(NodeKind::RootElement)),
        Box::new(EmptyNamespace::new(NodeKind::Operation)),
        Box::new(UnresolvedReference::new(NodeKind::Type)),
        Box::new(UnresolvedReference::new(NodeKind::Operation)),
        Box::new(UnresolvedReference::new(NodeKind::Fault)),
        Box::new(UnresolvedReference::new(NodeKind::ResourceMethod)),
        Box::new(UniqueMemberNames),
        Box::new(ValueMember),
        Box::new(AttributeSimpleValue),
        Box::new(SingleId),
        Box::new(IdRefTarget),
        Box::new(UniqueOperationNames),
        Box::new(OneWayOperation),
        Box::new(BareOperation),
        Box::new(SyntheticNames::new(NodeKind::Operation)),
        Box::new(SyntheticNames::new(NodeKind::Fault)),
        Box::new(SingleEntityParameter),
        Box::new(PathParameterBound),
    ]
}
