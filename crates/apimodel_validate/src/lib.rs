//! Validation of the assembled API model.
//!
//! This crate provides:
//! - [`ValidationEngine`] - Runs an ordered rule list over every model node
//! - [`Rule`] - One check, typed to one [`NodeKind`]
//! - [`ClaimedNames`] - The synthetic class names claimed so far in a build
//! - [`ValidationConfig`] - Severities and disabled rules
//!
//! Validation never fails: every finding is a [`Diagnostic`](apimodel_foundation::Diagnostic).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod claims;
pub mod config;
pub mod engine;
pub mod rule;

pub use claims::ClaimedNames;
pub use config::ValidationConfig;
pub use engine::{Node, NodeKind, RuleContext, ValidationEngine};
pub use rule::{Rule, default_rules};
