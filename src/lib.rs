//! apimodel - Compiles annotated program declarations into a cross-referenced API model
//!
//! This crate re-exports all layers of the apimodel system and ties the
//! builder and the validator together in [`compile`].
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: apimodel_validate   : Validation engine and default rules
//! Layer 3: apimodel_builder    : Type classifier, two-pass model builder
//! Layer 2: apimodel_model      : Model nodes, schemas, path templates, infoset
//! Layer 1: apimodel_declaration: Declaration view consumed by the builder
//! Layer 0: apimodel_foundation : Core types (QName, Diagnostic, Error)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use apimodel_builder as builder;
pub use apimodel_declaration as declaration;
pub use apimodel_foundation as foundation;
pub use apimodel_model as model;
pub use apimodel_validate as validate;

use apimodel_builder::{BuildConfig, RootSet};
use apimodel_declaration::DeclarationSource;
use apimodel_foundation::{Diagnostics, Result};
use apimodel_model::Model;
use apimodel_validate::{ClaimedNames, ValidationEngine};

/// The outcome of a successful compilation.
///
/// The model is complete even when `diagnostics` holds errors; the host
/// decides what to do with them.
#[derive(Clone, Debug)]
pub struct Compilation {
    /// The assembled model.
    pub model: Model,
    /// Builder findings followed by validation findings.
    pub diagnostics: Diagnostics,
}

impl Compilation {
    /// Process exit code for a host: non-zero iff any diagnostic is an error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.diagnostics.exit_code()
    }

    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Builds a model from `roots` and validates it.
///
/// Synthetic name claims are scoped to this call.
///
/// # Errors
///
/// Returns a structural error if the declarations contradict themselves;
/// no model is produced in that case.
pub fn compile(
    source: &dyn DeclarationSource,
    roots: &RootSet,
    config: &BuildConfig,
    validator: &ValidationEngine,
) -> Result<Compilation> {
    let (model, built) = apimodel_builder::build(source, roots, config)?;
    let checked = validator.validate(&model, &mut ClaimedNames::new());

    let diagnostics: Diagnostics = built.into_iter().chain(checked).collect();
    tracing::debug!(
        types = model.type_definitions().len(),
        errors = diagnostics.errors().count(),
        warnings = diagnostics.warnings().count(),
        "compiled model"
    );

    Ok(Compilation { model, diagnostics })
}
