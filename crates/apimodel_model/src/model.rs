//! The assembled model.

use std::collections::{BTreeMap, HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::Serialize;

use apimodel_foundation::{NodeRef, QName};

use crate::member::Member;
use crate::schema::{RootElementDeclaration, SchemaInfo};
use crate::service::{EndpointInterface, Fault, FaultId, Operation, Resource, ResourceMethod};
use crate::shape::{Shape, TypeId};
use crate::types::{TypeDefinition, TypeKind};

/// The pieces a builder assembles into a [`Model`].
#[derive(Clone, Debug, Default)]
pub struct ModelParts {
    /// Type definitions; `types[i].id == TypeId(i)`.
    pub types: Vec<TypeDefinition>,
    /// Schemas, in first-seen namespace order.
    pub schemas: Vec<SchemaInfo>,
    /// Root elements, in registration order.
    pub root_elements: Vec<RootElementDeclaration>,
    /// Endpoint interfaces, in registration order.
    pub endpoint_interfaces: Vec<EndpointInterface>,
    /// Resources, in registration order.
    pub resources: Vec<Resource>,
    /// Deduplicated fault table; `faults[i].id == FaultId(i)`.
    pub faults: Vec<Fault>,
    /// Declarations reached but deliberately not built, with the reason.
    pub skipped: BTreeMap<String, String>,
}

/// A fully resolved, immutable API model.
///
/// Every reference inside the model is an arena index into this value, so
/// consumers never need to look anything up elsewhere. With the `serde`
/// feature the model serializes for snapshots; it is rebuilt, not loaded.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Model {
    types: Vec<TypeDefinition>,
    schemas: Vec<SchemaInfo>,
    root_elements: Vec<RootElementDeclaration>,
    endpoint_interfaces: Vec<EndpointInterface>,
    resources: Vec<Resource>,
    faults: Vec<Fault>,
    #[cfg_attr(feature = "serde", serde(skip))]
    skipped: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    by_declaration: HashMap<String, TypeId>,
}

impl From<ModelParts> for Model {
    fn from(parts: ModelParts) -> Self {
        let by_declaration = parts
            .types
            .iter()
            .map(|t| (t.declaration.clone(), t.id))
            .collect();
        Self {
            types: parts.types,
            schemas: parts.schemas,
            root_elements: parts.root_elements,
            endpoint_interfaces: parts.endpoint_interfaces,
            resources: parts.resources,
            faults: parts.faults,
            skipped: parts.skipped,
            by_declaration,
        }
    }
}

impl Model {
    // =========================================================================
    // Data types
    // =========================================================================

    /// Returns all schemas, in first-seen namespace order.
    #[must_use]
    pub fn schemas(&self) -> &[SchemaInfo] {
        &self.schemas
    }

    /// Returns the schema for a namespace.
    #[must_use]
    pub fn schema(&self, namespace: &str) -> Option<&SchemaInfo> {
        self.schemas.iter().find(|s| s.namespace == namespace)
    }

    /// Returns all type definitions, in registration order.
    #[must_use]
    pub fn type_definitions(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Returns the type definition with the given id.
    #[must_use]
    pub fn type_definition(&self, id: TypeId) -> Option<&TypeDefinition> {
        self.types.get(id.index())
    }

    /// Returns the type definition built from the named declaration.
    #[must_use]
    pub fn type_by_declaration(&self, declaration: &str) -> Option<&TypeDefinition> {
        self.by_declaration
            .get(declaration)
            .and_then(|id| self.type_definition(*id))
    }

    /// Returns the first type definition with the given published name.
    #[must_use]
    pub fn type_by_qname(&self, qname: &QName) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| &t.qname == qname)
    }

    /// Returns why a reached declaration was not built as a data type.
    #[must_use]
    pub fn skip_reason(&self, declaration: &str) -> Option<&str> {
        self.skipped.get(declaration).map(String::as_str)
    }

    /// Returns all root elements.
    #[must_use]
    pub fn root_elements(&self) -> &[RootElementDeclaration] {
        &self.root_elements
    }

    /// Returns the base chain of a type, starting with the type itself.
    ///
    /// Stops at the first repeated id, so a malformed cyclic chain cannot
    /// loop forever.
    #[must_use]
    pub fn base_chain(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            chain.push(id);
            current = self
                .type_definition(id)
                .and_then(TypeDefinition::as_complex)
                .and_then(|c| c.base);
        }
        chain
    }

    /// Returns the flattened member set of a type: inherited members first,
    /// each paired with the type that declares it.
    #[must_use]
    pub fn flattened_members(&self, id: TypeId) -> Vec<(TypeId, &Member)> {
        let mut members = Vec::new();
        for owner in self.base_chain(id).into_iter().rev() {
            if let Some(complex) = self.type_definition(owner).and_then(TypeDefinition::as_complex)
            {
                members.extend(complex.members.iter().map(|m| (owner, m)));
            }
        }
        members
    }

    /// Returns true if values of this shape are text-only.
    ///
    /// Unresolved and untyped shapes are not simple.
    #[must_use]
    pub fn is_simple_shape(&self, shape: &Shape) -> bool {
        match shape {
            Shape::Value(_) | Shape::EnumRef(_) => true,
            Shape::Reference(id) => self
                .type_definition(*id)
                .is_some_and(TypeDefinition::is_simple_content),
            Shape::AdaptedVia { target, .. } => self.is_simple_shape(target),
            Shape::Any
            | Shape::CollectionOf(_)
            | Shape::ArrayOf(_)
            | Shape::MapOf(..)
            | Shape::Unresolved(_) => false,
        }
    }

    /// Returns the diagnostic reference for a type.
    #[must_use]
    pub fn type_ref(&self, id: TypeId) -> NodeRef {
        NodeRef::Type(
            self.type_definition(id)
                .map_or_else(|| id.to_string(), |t| t.declaration.clone()),
        )
    }

    /// Returns the diagnostic reference for a member of a type.
    #[must_use]
    pub fn member_ref(&self, owner: TypeId, member: &Member) -> NodeRef {
        NodeRef::Member {
            owner: self
                .type_definition(owner)
                .map_or_else(|| owner.to_string(), |t| t.declaration.clone()),
            member: member.name.clone(),
        }
    }

    /// Returns the number of complex, simple and enum definitions.
    #[must_use]
    pub fn kind_counts(&self) -> (usize, usize, usize) {
        self.types
            .iter()
            .fold((0, 0, 0), |(c, s, e), t| match t.kind {
                TypeKind::Complex(_) => (c + 1, s, e),
                TypeKind::Simple(_) => (c, s + 1, e),
                TypeKind::Enum(_) => (c, s, e + 1),
            })
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Returns all endpoint interfaces.
    #[must_use]
    pub fn endpoint_interfaces(&self) -> &[EndpointInterface] {
        &self.endpoint_interfaces
    }

    /// Iterates over every operation with its interface.
    pub fn operations(&self) -> impl Iterator<Item = (&EndpointInterface, &Operation)> {
        self.endpoint_interfaces
            .iter()
            .flat_map(|ei| ei.operations.iter().map(move |op| (ei, op)))
    }

    /// Returns the deduplicated fault table.
    #[must_use]
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Returns the fault with the given id.
    #[must_use]
    pub fn fault(&self, id: FaultId) -> Option<&Fault> {
        self.faults.get(id.index())
    }

    /// Returns all resources.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Iterates over every resource method with its resource.
    pub fn resource_methods(&self) -> impl Iterator<Item = (&Resource, &ResourceMethod)> {
        self.resources
            .iter()
            .flat_map(|r| r.methods.iter().map(move |m| (r, m)))
    }
}
