//! Validation diagnostics.
//!
//! Diagnostics are values: producing one never aborts anything. The host
//! decides what to do with the full list once construction and validation
//! have both finished.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::qname::QName;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// A rule violation against an otherwise sound model.
    Error,
    /// Informational; never affects the exit status.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Reference to the model node a diagnostic is about.
///
/// Nodes are identified by the qualified names of the declarations they
/// came from, so a reference stays meaningful after the model is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeRef {
    /// A type definition, by declaration name.
    Type(String),
    /// A member of a type definition.
    Member {
        /// Declaration name of the owning type.
        owner: String,
        /// Member (field) name.
        member: String,
    },
    /// A root element declaration.
    RootElement(QName),
    /// An endpoint interface, by declaration name.
    EndpointInterface(String),
    /// An operation of an endpoint interface.
    Operation {
        /// Declaration name of the endpoint interface.
        interface: String,
        /// Operation name.
        operation: String,
    },
    /// A fault, by declaration name.
    Fault(String),
    /// A resource, by declaration name.
    Resource(String),
    /// A method of a resource.
    ResourceMethod {
        /// Declaration name of the resource.
        resource: String,
        /// Method name.
        method: String,
    },
    /// A schema, by namespace URI.
    Schema(String),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "type {name}"),
            Self::Member { owner, member } => write!(f, "member {owner}.{member}"),
            Self::RootElement(qname) => write!(f, "root element {qname}"),
            Self::EndpointInterface(name) => write!(f, "endpoint interface {name}"),
            Self::Operation {
                interface,
                operation,
            } => write!(f, "operation {interface}#{operation}"),
            Self::Fault(name) => write!(f, "fault {name}"),
            Self::Resource(name) => write!(f, "resource {name}"),
            Self::ResourceMethod { resource, method } => {
                write!(f, "resource method {resource}#{method}")
            }
            Self::Schema(ns) => write!(f, "schema \"{ns}\""),
        }
    }
}

/// A severity-tagged message about one model node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// The offending node.
    pub node: NodeRef,
    /// Other nodes involved (e.g. the earlier claimant of a name).
    pub related: Vec<NodeRef>,
    /// Name of the rule that produced this diagnostic, if any.
    pub rule: Option<String>,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(node: NodeRef, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, node, message)
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(node: NodeRef, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, node, message)
    }

    /// Creates a diagnostic with the given severity.
    #[must_use]
    pub fn new(severity: Severity, node: NodeRef, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            node,
            related: Vec::new(),
            rule: None,
        }
    }

    /// Adds a related node.
    #[must_use]
    pub fn with_related(mut self, node: NodeRef) -> Self {
        self.related.push(node);
        self
    }

    /// Tags the diagnostic with the producing rule's name.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Returns true for error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.node, self.message)?;
        if let Some(rule) = &self.rule {
            write!(f, " [{rule}]")?;
        }
        Ok(())
    }
}

/// An ordered list of diagnostics with summary helpers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Returns all diagnostics in the order they were produced.
    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Iterates over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Returns true if any diagnostic has error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Process exit code for a host: non-zero iff there is an error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_errors())
    }

    /// Consumes the list and returns the inner vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
