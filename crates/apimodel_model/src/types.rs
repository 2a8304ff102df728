//! Type definitions.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use apimodel_declaration::Primitive;
use apimodel_foundation::QName;

use crate::member::Member;
use crate::shape::{Shape, TypeId};

/// A named structural data shape.
///
/// Every definition has exactly one qualified name and therefore belongs to
/// exactly one namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDefinition {
    /// Arena index.
    pub id: TypeId,
    /// Published name.
    pub qname: QName,
    /// Qualified name of the originating declaration.
    pub declaration: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Complex, simple or enum.
    pub kind: TypeKind,
}

impl TypeDefinition {
    /// Returns the namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.qname.namespace
    }

    /// Returns the complex type, if this is one.
    #[must_use]
    pub const fn as_complex(&self) -> Option<&ComplexType> {
        match &self.kind {
            TypeKind::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the enum type, if this is one.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumType> {
        match &self.kind {
            TypeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the simple type, if this is one.
    #[must_use]
    pub const fn as_simple(&self) -> Option<&SimpleType> {
        match &self.kind {
            TypeKind::Simple(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true unless this is a complex type.
    #[must_use]
    pub const fn is_simple_content(&self) -> bool {
        !matches!(self.kind, TypeKind::Complex(_))
    }
}

/// The three kinds of type definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    /// Structured content with members.
    Complex(ComplexType),
    /// Text content.
    Simple(SimpleType),
    /// A closed (or fallback-open) set of named values.
    Enum(EnumType),
}

/// A type with ordered members and single inheritance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplexType {
    /// Own members, in declaration order.
    pub members: Vec<Member>,
    /// Base type, if any.
    pub base: Option<TypeId>,
    /// Known subtypes a value of this type may be at runtime.
    pub substitutes: BTreeSet<TypeId>,
}

impl ComplexType {
    /// Returns the value member, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.is_value())
    }

    /// Iterates over element members.
    pub fn elements(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_element())
    }

    /// Iterates over attribute members.
    pub fn attributes(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_attribute())
    }
}

/// A restriction facet (`minLength = 3`, `pattern = [a-z]+`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Facet name.
    pub name: String,
    /// Facet value, verbatim.
    pub value: String,
}

impl Facet {
    /// Creates a facet.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Text-only content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SimpleType {
    /// A base shape narrowed by facets.
    Restriction {
        /// The restricted shape (a primitive, enum or other simple type).
        base: Shape,
        /// Facets, ordered by name.
        facets: Vec<Facet>,
    },
    /// A whitespace-separated list of simple items.
    List {
        /// The item shape.
        item: Shape,
    },
    /// One of several simple shapes.
    Union {
        /// Member shapes, in declaration order.
        members: Vec<Shape>,
    },
}

/// An enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumType {
    /// Primitive the external values are written as.
    pub base: Primitive,
    /// Values, in declaration order.
    pub values: Vec<EnumValue>,
}

impl EnumType {
    /// Returns the fallback value, if any.
    #[must_use]
    pub fn fallback(&self) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.fallback)
    }

    /// Decodes an external token.
    ///
    /// Unrecognized tokens map to the fallback value when one exists.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<&EnumValue> {
        self.values
            .iter()
            .find(|v| !v.fallback && v.external() == token)
            .or_else(|| self.fallback())
    }
}

/// One enumeration value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    /// Constant name.
    pub name: String,
    /// External representation, when it differs from the name.
    pub external: Option<String>,
    /// Whether this value receives unrecognized tokens.
    pub fallback: bool,
    /// Documentation text.
    pub doc: Option<String>,
}

impl EnumValue {
    /// Creates a value whose external form is its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external: None,
            fallback: false,
            doc: None,
        }
    }

    /// Sets the external representation.
    #[must_use]
    pub fn with_external(mut self, external: impl Into<String>) -> Self {
        self.external = Some(external.into());
        self
    }

    /// Marks this value as the fallback.
    #[must_use]
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Returns the external token.
    #[must_use]
    pub fn external(&self) -> &str {
        self.external.as_deref().unwrap_or(&self.name)
    }
}
