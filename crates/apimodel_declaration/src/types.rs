//! Type references as they appear at use sites.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built-in scalar kinds.
///
/// The adapter normalizes library scalars (strings, dates, URIs, ...) to
/// one of these so that the classifier never has to know library names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive {
    /// Boolean.
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Single character.
    Char,
    /// Arbitrary precision decimal.
    Decimal,
    /// Arbitrary precision integer.
    Integer,
    /// Character string.
    String,
    /// Calendar date.
    Date,
    /// Date with time of day.
    DateTime,
    /// Time of day.
    Time,
    /// Duration.
    Duration,
    /// URI.
    Uri,
    /// Qualified name.
    QName,
    /// UUID.
    Uuid,
    /// Opaque binary data.
    Binary,
}

impl Primitive {
    /// Returns true for scalar kinds that can never be absent.
    ///
    /// Members of these kinds default to required cardinality.
    #[must_use]
    pub const fn is_value_type(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::Char
        )
    }

    /// Returns true for textual kinds.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Char)
    }

    /// Returns the lower-case name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::Uri => "anyURI",
            Self::QName => "QName",
            Self::Uuid => "uuid",
            Self::Binary => "base64Binary",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A reference to a type at a use site (field, parameter, return, supertype).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeRef {
    /// A built-in scalar.
    Primitive(Primitive),
    /// No value (method returns only).
    Void,
    /// A user declaration, with type arguments if generic.
    Declared {
        /// Qualified declaration name.
        name: String,
        /// Type arguments, in parameter order.
        args: Vec<TypeRef>,
    },
    /// A single-argument collection; `None` when written without an argument.
    Collection(Option<Box<TypeRef>>),
    /// A key/value map; `None` when written without arguments.
    Map(Option<(Box<TypeRef>, Box<TypeRef>)>),
    /// A fixed array.
    Array(Box<TypeRef>),
    /// A type variable of the enclosing generic declaration.
    Variable(String),
}

impl TypeRef {
    /// Creates a non-generic declared type reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a generic declared type reference.
    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Declared {
            name: name.into(),
            args,
        }
    }

    /// Creates a collection of the given item type.
    #[must_use]
    pub fn collection(item: TypeRef) -> Self {
        Self::Collection(Some(Box::new(item)))
    }

    /// Creates a collection written without a type argument.
    #[must_use]
    pub const fn raw_collection() -> Self {
        Self::Collection(None)
    }

    /// Creates a map type.
    #[must_use]
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map(Some((Box::new(key), Box::new(value))))
    }

    /// Creates an array type.
    #[must_use]
    pub fn array(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    /// Creates a type variable reference.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Shorthand for the string primitive.
    #[must_use]
    pub const fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    /// Returns the declaration name if this is a declared type.
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Self::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns true for collections and arrays (byte arrays excluded).
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        match self {
            Self::Collection(_) => true,
            Self::Array(component) => **component != Self::Primitive(Primitive::Byte),
            _ => false,
        }
    }

    /// Returns the item type of a collection or array, if any.
    #[must_use]
    pub fn item(&self) -> Option<&TypeRef> {
        match self {
            Self::Collection(Some(item)) | Self::Array(item) => Some(item),
            _ => None,
        }
    }

    /// Replaces type variables using the given bindings.
    #[must_use]
    pub fn substitute(&self, bindings: &[(String, TypeRef)]) -> TypeRef {
        match self {
            Self::Variable(v) => bindings
                .iter()
                .find(|(name, _)| name == v)
                .map_or_else(|| self.clone(), |(_, bound)| bound.clone()),
            Self::Declared { name, args } => Self::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
            Self::Collection(item) => {
                Self::Collection(item.as_ref().map(|i| Box::new(i.substitute(bindings))))
            }
            Self::Map(kv) => Self::Map(kv.as_ref().map(|(k, v)| {
                (
                    Box::new(k.substitute(bindings)),
                    Box::new(v.substitute(bindings)),
                )
            })),
            Self::Array(c) => Self::Array(Box::new(c.substitute(bindings))),
            Self::Primitive(_) | Self::Void => self.clone(),
        }
    }

    /// Appends every declaration name mentioned anywhere in this reference.
    pub fn collect_names(&self, out: &mut Vec<String>) {
        match self {
            Self::Declared { name, args } => {
                out.push(name.clone());
                for arg in args {
                    arg.collect_names(out);
                }
            }
            Self::Collection(Some(item)) | Self::Array(item) => item.collect_names(out),
            Self::Map(Some((k, v))) => {
                k.collect_names(out);
                v.collect_names(out);
            }
            Self::Collection(None)
            | Self::Map(None)
            | Self::Primitive(_)
            | Self::Void
            | Self::Variable(_) => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Void => write!(f, "void"),
            Self::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Self::Collection(Some(item)) => write!(f, "collection<{item}>"),
            Self::Collection(None) => write!(f, "collection"),
            Self::Map(Some((k, v))) => write!(f, "map<{k}, {v}>"),
            Self::Map(None) => write!(f, "map"),
            Self::Array(c) => write!(f, "{c}[]"),
            Self::Variable(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({self})")
    }
}
