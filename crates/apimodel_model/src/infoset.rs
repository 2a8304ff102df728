//! A minimal instance infoset.
//!
//! Backends define concrete wire formats; this module only fixes how an
//! instance of a model type maps onto a flat stream of start, attribute,
//! text and end events. Attributes come first, then the value, then
//! elements in member order. Occurrences of an unwrapped repeated element
//! are emitted as consecutive siblings; a wrapped one is enclosed in its
//! wrapper element.

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::slice;

use thiserror::Error;

use apimodel_foundation::QName;

use crate::member::{Member, Occurs};
use crate::model::Model;
use crate::shape::{Shape, TypeId};
use crate::types::TypeDefinition;

/// A value of some model type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instance {
    /// Text content of a simple-valued type.
    Text(String),
    /// Structured content of a complex type, keyed by member name.
    Complex {
        /// Attribute values.
        attributes: BTreeMap<String, String>,
        /// Element occurrences, in order.
        elements: BTreeMap<String, Vec<Instance>>,
        /// Value member content.
        text: Option<String>,
    },
}

impl Instance {
    /// Creates an empty complex instance.
    #[must_use]
    pub const fn complex() -> Self {
        Self::Complex {
            attributes: BTreeMap::new(),
            elements: BTreeMap::new(),
            text: None,
        }
    }

    /// Creates a text instance.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Sets an attribute; no effect on text instances.
    #[must_use]
    pub fn with_attribute(mut self, member: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Complex { attributes, .. } = &mut self {
            attributes.insert(member.into(), value.into());
        }
        self
    }

    /// Appends one element occurrence; no effect on text instances.
    #[must_use]
    pub fn with_element(mut self, member: impl Into<String>, value: Instance) -> Self {
        if let Self::Complex { elements, .. } = &mut self {
            elements.entry(member.into()).or_default().push(value);
        }
        self
    }

    /// Sets the value content; no effect on text instances.
    #[must_use]
    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        if let Self::Complex { text, .. } = &mut self {
            *text = Some(value.into());
        }
        self
    }

    /// Returns the occurrences of an element member.
    #[must_use]
    pub fn elements(&self, member: &str) -> &[Instance] {
        match self {
            Self::Complex { elements, .. } => elements.get(member).map_or(&[], Vec::as_slice),
            Self::Text(_) => &[],
        }
    }
}

/// One infoset event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Opens an element.
    Start(QName),
    /// An attribute of the most recently opened element.
    Attribute(QName, String),
    /// Text content.
    Text(String),
    /// Closes the most recently opened element.
    End,
}

/// Errors from encoding or decoding an instance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The type id is not in the model.
    #[error("no type definition {0}")]
    UnknownType(TypeId),

    /// The instance or stream names a member the type does not have.
    #[error("{type_name} has no member {member}")]
    UnknownMember {
        /// Declaration of the type.
        type_name: String,
        /// The offending name.
        member: String,
    },

    /// A single-valued member has more than one occurrence.
    #[error("{member} occurs {count} times but is single-valued")]
    TooManyOccurrences {
        /// The member.
        member: String,
        /// Number of occurrences.
        count: usize,
    },

    /// The instance does not fit the member's shape.
    #[error("instance of {member} does not match its shape")]
    ShapeMismatch {
        /// The member, or the root type.
        member: String,
    },

    /// The event stream has an event where another was required.
    #[error("expected {expected}, found {found}")]
    UnexpectedEvent {
        /// What was required.
        expected: &'static str,
        /// What was found.
        found: String,
    },

    /// The event stream ended early.
    #[error("unexpected end of events")]
    UnexpectedEnd,
}

/// Result type for the codec.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

fn lookup(model: &Model, id: TypeId) -> CodecResult<&TypeDefinition> {
    model.type_definition(id).ok_or(CodecError::UnknownType(id))
}

/// Returns the complex type a shape's items are encoded as, if any.
fn complex_target(model: &Model, shape: &Shape) -> Option<TypeId> {
    match shape.item() {
        Shape::Reference(id) => model
            .type_definition(*id)
            .filter(|t| t.as_complex().is_some())
            .map(|t| t.id),
        _ => None,
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes an instance of `type_id` under the root element `root`.
///
/// # Errors
///
/// Returns an error if the instance names members the type lacks, gives a
/// single-valued member several occurrences, or does not match a shape.
pub fn encode(
    model: &Model,
    type_id: TypeId,
    root: &QName,
    instance: &Instance,
) -> CodecResult<Vec<Event>> {
    let mut out = vec![Event::Start(root.clone())];
    encode_body(model, type_id, instance, &mut out)?;
    out.push(Event::End);
    Ok(out)
}

fn encode_body(
    model: &Model,
    type_id: TypeId,
    instance: &Instance,
    out: &mut Vec<Event>,
) -> CodecResult<()> {
    let definition = lookup(model, type_id)?;
    if definition.as_complex().is_none() {
        let Instance::Text(text) = instance else {
            return Err(CodecError::ShapeMismatch {
                member: definition.declaration.clone(),
            });
        };
        out.push(Event::Text(text.clone()));
        return Ok(());
    }
    let Instance::Complex {
        attributes,
        elements,
        text,
    } = instance
    else {
        return Err(CodecError::ShapeMismatch {
            member: definition.declaration.clone(),
        });
    };

    let members: Vec<&Member> = model
        .flattened_members(type_id)
        .into_iter()
        .map(|(_, m)| m)
        .collect();
    let unknown = |name: &String| CodecError::UnknownMember {
        type_name: definition.declaration.clone(),
        member: name.clone(),
    };
    if let Some(name) = attributes
        .keys()
        .find(|n| !members.iter().any(|m| m.is_attribute() && &m.name == *n))
    {
        return Err(unknown(name));
    }
    if let Some(name) = elements
        .keys()
        .find(|n| !members.iter().any(|m| m.is_element() && &m.name == *n))
    {
        return Err(unknown(name));
    }

    for member in members.iter().filter(|m| m.is_attribute()) {
        if let Some(value) = attributes.get(&member.name) {
            out.push(Event::Attribute(member.qname.clone(), value.clone()));
        }
    }
    if let Some(text) = text {
        if !members.iter().any(|m| m.is_value()) {
            return Err(CodecError::ShapeMismatch {
                member: definition.declaration.clone(),
            });
        }
        out.push(Event::Text(text.clone()));
    }
    for member in members.iter().filter(|m| m.is_element()) {
        let Some(items) = elements.get(&member.name).filter(|i| !i.is_empty()) else {
            continue;
        };
        if member.occurs() == Occurs::Single && items.len() > 1 {
            return Err(CodecError::TooManyOccurrences {
                member: member.name.clone(),
                count: items.len(),
            });
        }
        if let Some(wrapper) = member.wrapper() {
            out.push(Event::Start(wrapper.clone()));
        }
        for item in items {
            out.push(Event::Start(member.qname.clone()));
            encode_content(model, member, item, out)?;
            out.push(Event::End);
        }
        if member.wrapper().is_some() {
            out.push(Event::End);
        }
    }
    Ok(())
}

fn encode_content(
    model: &Model,
    member: &Member,
    item: &Instance,
    out: &mut Vec<Event>,
) -> CodecResult<()> {
    if let Some(target) = complex_target(model, &member.shape) {
        return encode_body(model, target, item, out);
    }
    match item {
        Instance::Text(text) => {
            out.push(Event::Text(text.clone()));
            Ok(())
        }
        Instance::Complex { .. } => Err(CodecError::ShapeMismatch {
            member: member.name.clone(),
        }),
    }
}

// =============================================================================
// Decoding
// =============================================================================

type Cursor<'a> = Peekable<slice::Iter<'a, Event>>;

/// Decodes an instance of `type_id` from a complete event stream.
///
/// # Errors
///
/// Returns an error if the stream is not a single well-nested element whose
/// content matches the type.
pub fn decode(model: &Model, type_id: TypeId, events: &[Event]) -> CodecResult<Instance> {
    let mut cursor = events.iter().peekable();
    match cursor.next() {
        Some(Event::Start(_)) => {}
        Some(other) => return Err(unexpected("start of root element", other)),
        None => return Err(CodecError::UnexpectedEnd),
    }
    let instance = decode_body(model, type_id, &mut cursor)?;
    expect_end(&mut cursor)?;
    match cursor.next() {
        None => Ok(instance),
        Some(other) => Err(unexpected("end of events", other)),
    }
}

fn unexpected(expected: &'static str, found: &Event) -> CodecError {
    CodecError::UnexpectedEvent {
        expected,
        found: format!("{found:?}"),
    }
}

fn expect_end(cursor: &mut Cursor<'_>) -> CodecResult<()> {
    match cursor.next() {
        Some(Event::End) => Ok(()),
        Some(other) => Err(unexpected("end of element", other)),
        None => Err(CodecError::UnexpectedEnd),
    }
}

fn decode_text(cursor: &mut Cursor<'_>) -> Instance {
    if let Some(Event::Text(text)) = cursor.peek().copied() {
        cursor.next();
        Instance::Text(text.clone())
    } else {
        Instance::Text(String::new())
    }
}

fn decode_body(model: &Model, type_id: TypeId, cursor: &mut Cursor<'_>) -> CodecResult<Instance> {
    let definition = lookup(model, type_id)?;
    if definition.as_complex().is_none() {
        return Ok(decode_text(cursor));
    }
    let members: Vec<&Member> = model
        .flattened_members(type_id)
        .into_iter()
        .map(|(_, m)| m)
        .collect();
    let unknown = |q: &QName| CodecError::UnknownMember {
        type_name: definition.declaration.clone(),
        member: q.to_string(),
    };

    let mut attributes = BTreeMap::new();
    let mut elements: BTreeMap<String, Vec<Instance>> = BTreeMap::new();
    let mut text = None;

    loop {
        match cursor.peek().copied() {
            None => return Err(CodecError::UnexpectedEnd),
            Some(Event::End) => break,
            Some(Event::Attribute(q, value)) => {
                let member = members
                    .iter()
                    .find(|m| m.is_attribute() && &m.qname == q)
                    .ok_or_else(|| unknown(q))?;
                attributes.insert(member.name.clone(), value.clone());
                cursor.next();
            }
            Some(Event::Text(value)) => {
                if !members.iter().any(|m| m.is_value()) {
                    return Err(CodecError::ShapeMismatch {
                        member: definition.declaration.clone(),
                    });
                }
                text = Some(value.clone());
                cursor.next();
            }
            Some(Event::Start(q)) => {
                let q = q.clone();
                cursor.next();
                if let Some(member) = members
                    .iter()
                    .find(|m| m.is_element() && m.wrapper() == Some(&q))
                {
                    let items = elements.entry(member.name.clone()).or_default();
                    while let Some(Event::Start(item)) = cursor.peek().copied() {
                        if item != &member.qname {
                            return Err(unknown(item));
                        }
                        cursor.next();
                        items.push(decode_content(model, member, cursor)?);
                        expect_end(cursor)?;
                    }
                    expect_end(cursor)?;
                } else {
                    let member = members
                        .iter()
                        .find(|m| m.is_element() && m.wrapper().is_none() && m.qname == q)
                        .ok_or_else(|| unknown(&q))?;
                    let item = decode_content(model, member, cursor)?;
                    expect_end(cursor)?;
                    elements.entry(member.name.clone()).or_default().push(item);
                }
            }
        }
    }

    Ok(Instance::Complex {
        attributes,
        elements,
        text,
    })
}

fn decode_content(model: &Model, member: &Member, cursor: &mut Cursor<'_>) -> CodecResult<Instance> {
    match complex_target(model, &member.shape) {
        Some(target) => decode_body(model, target, cursor),
        None => Ok(decode_text(cursor)),
    }
}
