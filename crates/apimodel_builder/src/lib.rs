//! Model construction for apimodel.
//!
//! This crate turns declarations into a [`Model`](apimodel_model::Model):
//! - [`TypeClassifier`] - Unwraps declared types into shapes, following converters
//! - [`ModelBuilder`] - Two-pass register-then-resolve construction
//! - [`RootSet`] - The declarations a build starts from
//! - [`BuildConfig`] - Prefixes, synthetic naming and classification options
//!
//! Structural errors abort [`build`]; everything else is left for validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod classify;
pub mod config;
pub mod roots;

pub use builder::{ModelBuilder, build};
pub use classify::{ConverterBinding, NamedShape, TypeClassifier};
pub use config::{BuildConfig, KNOWN_PREFIXES};
pub use roots::RootSet;
