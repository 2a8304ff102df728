//! Classified shapes.
//!
//! A [`Shape`] is what a declared type *means* to the model: a scalar, a
//! container of some other shape, a value adapted through a converter, or a
//! reference to a type definition. The classifier produces shapes whose
//! references are still declaration names (`Shape<String>`); the builder
//! resolves them to arena ids once every placeholder exists.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use apimodel_declaration::Primitive;

/// Stable index of a type definition in the model arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeId(pub u32);

impl TypeId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The semantic shape of a declared type.
///
/// `R` is how type definitions are referenced: declaration names before
/// resolution, [`TypeId`]s afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape<R = TypeId> {
    /// A built-in scalar.
    Value(Primitive),
    /// Unconstrained content (raw collections, type variables).
    Any,
    /// A repeated shape.
    CollectionOf(Box<Shape<R>>),
    /// A key/value map.
    MapOf(Box<Shape<R>>, Box<Shape<R>>),
    /// A fixed array.
    ArrayOf(Box<Shape<R>>),
    /// A value carried through an external converter.
    AdaptedVia {
        /// Converter declaration name.
        converter: String,
        /// The shape the converter produces.
        target: Box<Shape<R>>,
    },
    /// An enumeration type definition.
    EnumRef(R),
    /// A complex or simple type definition.
    Reference(R),
    /// A declaration that is not available from the source.
    Unresolved(String),
}

impl<R> Shape<R> {
    /// Wraps this shape in a collection.
    #[must_use]
    pub fn collection(self) -> Self {
        Self::CollectionOf(Box::new(self))
    }

    /// Wraps this shape in an array.
    #[must_use]
    pub fn array(self) -> Self {
        Self::ArrayOf(Box::new(self))
    }

    /// Wraps this shape in a converter adaptation.
    #[must_use]
    pub fn adapted(self, converter: impl Into<String>) -> Self {
        Self::AdaptedVia {
            converter: converter.into(),
            target: Box::new(self),
        }
    }

    /// Returns true for collections and arrays, looking through adaptation.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        match self {
            Self::CollectionOf(_) | Self::ArrayOf(_) => true,
            Self::AdaptedVia { target, .. } => target.is_repeated(),
            _ => false,
        }
    }

    /// Returns the shape of one occurrence.
    ///
    /// Collections and arrays yield their component, adaptations their
    /// target; anything else is its own item.
    #[must_use]
    pub fn item(&self) -> &Self {
        match self {
            Self::CollectionOf(inner) | Self::ArrayOf(inner) => inner.item(),
            Self::AdaptedVia { target, .. } => target.item(),
            _ => self,
        }
    }

    /// Returns the type definition this shape ultimately points at, if any.
    #[must_use]
    pub fn target(&self) -> Option<&R> {
        match self.item() {
            Self::EnumRef(r) | Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Appends every reference in this shape.
    pub fn collect_refs<'a>(&'a self, out: &mut Vec<&'a R>) {
        match self {
            Self::EnumRef(r) | Self::Reference(r) => out.push(r),
            Self::CollectionOf(inner) | Self::ArrayOf(inner) => inner.collect_refs(out),
            Self::MapOf(k, v) => {
                k.collect_refs(out);
                v.collect_refs(out);
            }
            Self::AdaptedVia { target, .. } => target.collect_refs(out),
            Self::Value(_) | Self::Any | Self::Unresolved(_) => {}
        }
    }

    /// Returns every unresolved declaration name in this shape.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        match self {
            Self::Unresolved(name) => vec![name.as_str()],
            Self::CollectionOf(inner) | Self::ArrayOf(inner) => inner.unresolved(),
            Self::MapOf(k, v) => {
                let mut names = k.unresolved();
                names.extend(v.unresolved());
                names
            }
            Self::AdaptedVia { target, .. } => target.unresolved(),
            _ => Vec::new(),
        }
    }

    /// Rewrites every reference.
    ///
    /// `resolve` returns the new reference, or `Err(name)` to mark the
    /// reference as unresolved.
    pub fn map_refs<S, F>(&self, resolve: &mut F) -> Shape<S>
    where
        F: FnMut(&R) -> Result<S, String>,
    {
        match self {
            Self::Value(p) => Shape::Value(*p),
            Self::Any => Shape::Any,
            Self::CollectionOf(inner) => Shape::CollectionOf(Box::new(inner.map_refs(resolve))),
            Self::ArrayOf(inner) => Shape::ArrayOf(Box::new(inner.map_refs(resolve))),
            Self::MapOf(k, v) => Shape::MapOf(
                Box::new(k.map_refs(resolve)),
                Box::new(v.map_refs(resolve)),
            ),
            Self::AdaptedVia { converter, target } => Shape::AdaptedVia {
                converter: converter.clone(),
                target: Box::new(target.map_refs(resolve)),
            },
            Self::EnumRef(r) => resolve(r).map_or_else(Shape::Unresolved, Shape::EnumRef),
            Self::Reference(r) => resolve(r).map_or_else(Shape::Unresolved, Shape::Reference),
            Self::Unresolved(name) => Shape::Unresolved(name.clone()),
        }
    }
}

impl<R: fmt::Display> fmt::Display for Shape<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(p) => write!(f, "{p}"),
            Self::Any => write!(f, "any"),
            Self::CollectionOf(inner) => write!(f, "collection<{inner}>"),
            Self::ArrayOf(inner) => write!(f, "{inner}[]"),
            Self::MapOf(k, v) => write!(f, "map<{k}, {v}>"),
            Self::AdaptedVia { converter, target } => write!(f, "{target} via {converter}"),
            Self::EnumRef(r) => write!(f, "enum {r}"),
            Self::Reference(r) => write!(f, "{r}"),
            Self::Unresolved(name) => write!(f, "unresolved {name}"),
        }
    }
}
