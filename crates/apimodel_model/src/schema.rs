//! Per-namespace grouping.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use apimodel_foundation::QName;

use crate::shape::TypeId;

/// A published top-level name bound to one type definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RootElementDeclaration {
    /// Published name.
    pub qname: QName,
    /// The bound complex or simple type.
    pub type_id: TypeId,
    /// Qualified name of the originating declaration.
    pub declaration: String,
}

impl RootElementDeclaration {
    /// Returns the namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.qname.namespace
    }
}

/// Everything published in one namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchemaInfo {
    /// Namespace URI (may be empty).
    pub namespace: String,
    /// Assigned prefix.
    pub prefix: String,
    /// Type definitions, in registration order.
    pub types: Vec<TypeId>,
    /// Indices into the model's root element list, in registration order.
    pub root_elements: Vec<usize>,
    /// Namespaces referenced from this one.
    pub imports: BTreeSet<String>,
    /// Packages contributing to this namespace.
    pub packages: BTreeSet<String>,
}

impl SchemaInfo {
    /// Creates an empty schema for a namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Returns true if nothing is published in this namespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.root_elements.is_empty()
    }
}
