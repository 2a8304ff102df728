//! Integration tests for Layer 3: Builder
//!
//! Tests for model assembly from declaration sets: reachability, cycles,
//! enumerations and service descriptions.

mod enums;
mod services;
mod types;

use apimodel_declaration::PackageDecl;

/// The package every fixture declares its types in.
pub fn shop() -> PackageDecl {
    PackageDecl::new("shop").with_namespace("urn:shop")
}
