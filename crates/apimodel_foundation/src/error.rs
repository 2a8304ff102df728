//! Structural errors.
//!
//! A structural error means the declaration graph contradicts itself and no
//! sound model can be built from it. Construction stops at the first one.
//! Everything else is reported as a [`Diagnostic`](crate::Diagnostic).

use std::fmt;

use thiserror::Error;

/// The main error type for model construction.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate enum fallback error.
    #[must_use]
    pub fn duplicate_fallback(enum_type: &str, first: &str, second: &str) -> Self {
        Self::new(ErrorKind::DuplicateFallback {
            enum_type: enum_type.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        })
    }

    /// Creates a duplicate enum value error.
    #[must_use]
    pub fn duplicate_enum_value(enum_type: &str, value: &str) -> Self {
        Self::new(ErrorKind::DuplicateEnumValue {
            enum_type: enum_type.to_string(),
            value: value.to_string(),
        })
    }

    /// Creates an unclassifiable type error.
    #[must_use]
    pub fn unclassifiable(declaration: &str, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unclassifiable {
            declaration: declaration.to_string(),
            reason: reason.into(),
        })
    }

    /// Creates a contradictory annotations error.
    #[must_use]
    pub fn contradictory_annotations(declaration: &str, annotations: &[&str]) -> Self {
        Self::new(ErrorKind::ContradictoryAnnotations {
            declaration: declaration.to_string(),
            annotations: annotations.iter().map(ToString::to_string).collect(),
        })
    }

    /// Creates a not-a-converter error.
    #[must_use]
    pub fn not_a_converter(converter: &str) -> Self {
        Self::new(ErrorKind::NotAConverter(converter.to_string()))
    }
}

/// Categorized structural error kinds.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An enumeration marks more than one value as the fallback.
    #[error("{enum_type}: both {first} and {second} are marked as the unknown/fallback value")]
    DuplicateFallback {
        /// The enumeration declaration.
        enum_type: String,
        /// The first fallback constant.
        first: String,
        /// The second fallback constant.
        second: String,
    },

    /// An enumeration maps two constants to the same external value.
    #[error("{enum_type}: duplicate enum value {value}")]
    DuplicateEnumValue {
        /// The enumeration declaration.
        enum_type: String,
        /// The external value that appears twice.
        value: String,
    },

    /// A declared type cannot be given any shape.
    #[error("{declaration}: cannot classify: {reason}")]
    Unclassifiable {
        /// The offending declaration.
        declaration: String,
        /// Why classification failed.
        reason: String,
    },

    /// A declaration carries annotations that exclude each other.
    #[error("{declaration}: contradictory annotations: {}", .annotations.join(", "))]
    ContradictoryAnnotations {
        /// The offending declaration.
        declaration: String,
        /// The conflicting annotation names.
        annotations: Vec<String>,
    },

    /// A converter does not descend from the converter base type.
    #[error("{0} is not a converter: no converter base type in its ancestry")]
    NotAConverter(String),

    /// A converter's binding to the base type does not carry two type arguments.
    #[error("{converter} must bind both a value type and a bound type (found {found})")]
    ConverterArity {
        /// The converter declaration.
        converter: String,
        /// Number of type arguments found.
        found: usize,
    },

    /// An interface is annotated as a data type.
    #[error("{0}: an interface must not be annotated as a data type")]
    AnnotatedInterface(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
///
/// The stack lists the declarations through which the failing one was
/// reached, innermost first.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Member or method being processed, if any.
    pub member: Option<String>,
    /// Declarations through which the failing one was reached.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the member being processed.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(member) = &self.member {
            write!(f, "at {member}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  referenced from {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, Error>;
