//! Members of complex types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use apimodel_foundation::QName;

use crate::shape::Shape;

/// Whether an element may be absent or explicitly nil.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cardinality {
    /// Must be present.
    Required,
    /// May be absent.
    #[default]
    Optional,
    /// May be absent or present as nil.
    Nillable,
}

/// Upper bound on element occurrences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Occurs {
    /// At most once.
    #[default]
    Single,
    /// Any number of times.
    Unbounded,
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "1"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Identity role of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Identity {
    /// Plain data.
    #[default]
    None,
    /// Unique key of the owning type.
    Id,
    /// Points, by value, at another instance's key.
    IdRef,
}

/// Member categories; names are unique per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemberCategory {
    /// Ordered child elements.
    Element,
    /// Unordered attributes.
    Attribute,
    /// Text content.
    Value,
}

impl fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element => write!(f, "element"),
            Self::Attribute => write!(f, "attribute"),
            Self::Value => write!(f, "value"),
        }
    }
}

/// How a member appears in an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemberKind {
    /// A positional child element.
    Element {
        /// Presence requirement.
        cardinality: Cardinality,
        /// Occurrence bound.
        occurs: Occurs,
        /// Container element around the occurrences, if any.
        wrapper: Option<QName>,
    },
    /// A single-valued attribute.
    Attribute {
        /// Whether the attribute must be present.
        required: bool,
    },
    /// The text content of the owning type.
    Value,
}

impl MemberKind {
    /// Returns the category of this kind.
    #[must_use]
    pub const fn category(&self) -> MemberCategory {
        match self {
            Self::Element { .. } => MemberCategory::Element,
            Self::Attribute { .. } => MemberCategory::Attribute,
            Self::Value => MemberCategory::Value,
        }
    }
}

/// A named, typed slot inside a complex type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    /// Field name in the declaration.
    pub name: String,
    /// Published name.
    pub qname: QName,
    /// Element, attribute or value.
    pub kind: MemberKind,
    /// Resolved shape.
    pub shape: Shape,
    /// Identity role.
    pub identity: Identity,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Member {
    /// Creates an optional, single-valued element.
    #[must_use]
    pub fn element(name: impl Into<String>, qname: QName, shape: Shape) -> Self {
        let occurs = if shape.is_repeated() {
            Occurs::Unbounded
        } else {
            Occurs::Single
        };
        Self::new(
            name,
            qname,
            MemberKind::Element {
                cardinality: Cardinality::Optional,
                occurs,
                wrapper: None,
            },
            shape,
        )
    }

    /// Creates an optional attribute.
    #[must_use]
    pub fn attribute(name: impl Into<String>, qname: QName, shape: Shape) -> Self {
        Self::new(name, qname, MemberKind::Attribute { required: false }, shape)
    }

    /// Creates a value member.
    #[must_use]
    pub fn value(name: impl Into<String>, shape: Shape) -> Self {
        let name = name.into();
        let qname = QName::unqualified(name.clone());
        Self::new(name, qname, MemberKind::Value, shape)
    }

    /// Creates a member of any kind.
    #[must_use]
    pub fn new(name: impl Into<String>, qname: QName, kind: MemberKind, shape: Shape) -> Self {
        Self {
            name: name.into(),
            qname,
            kind,
            shape,
            identity: Identity::None,
            doc: None,
        }
    }

    /// Sets the identity role.
    #[must_use]
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Sets the cardinality of an element; no effect on other kinds.
    #[must_use]
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        if let MemberKind::Element {
            cardinality: c, ..
        } = &mut self.kind
        {
            *c = cardinality;
        }
        self
    }

    /// Collects an element's occurrences under a wrapper; no effect on other kinds.
    #[must_use]
    pub fn with_wrapper(mut self, wrapper: QName) -> Self {
        if let MemberKind::Element { wrapper: w, .. } = &mut self.kind {
            *w = Some(wrapper);
        }
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Returns the member category.
    #[must_use]
    pub const fn category(&self) -> MemberCategory {
        self.kind.category()
    }

    /// Returns true for element members.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self.kind, MemberKind::Element { .. })
    }

    /// Returns true for attribute members.
    #[must_use]
    pub const fn is_attribute(&self) -> bool {
        matches!(self.kind, MemberKind::Attribute { .. })
    }

    /// Returns true for the value member.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self.kind, MemberKind::Value)
    }

    /// Returns the wrapper element name, if any.
    #[must_use]
    pub fn wrapper(&self) -> Option<&QName> {
        match &self.kind {
            MemberKind::Element { wrapper, .. } => wrapper.as_ref(),
            _ => None,
        }
    }

    /// Returns the minimum number of occurrences.
    #[must_use]
    pub const fn min_occurs(&self) -> u32 {
        match self.kind {
            MemberKind::Element {
                cardinality: Cardinality::Required,
                ..
            }
            | MemberKind::Attribute { required: true } => 1,
            _ => 0,
        }
    }

    /// Returns the occurrence bound; attributes and values occur at most once.
    #[must_use]
    pub const fn occurs(&self) -> Occurs {
        match self.kind {
            MemberKind::Element { occurs, .. } => occurs,
            _ => Occurs::Single,
        }
    }
}
