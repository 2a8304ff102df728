//! Core types shared by every apimodel layer.
//!
//! This crate provides:
//! - [`QName`] - Namespace-qualified names for types, elements and wrappers
//! - [`Diagnostic`] - Severity-tagged validation findings with a [`NodeRef`]
//! - [`Error`] - Structural errors that abort model construction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod error;
pub mod qname;

pub use diagnostic::{Diagnostic, Diagnostics, NodeRef, Severity};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use qname::{QName, capitalize, decapitalize};
