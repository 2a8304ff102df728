//! Integration tests for Layer 2: Model
//!
//! Tests for path templates, namespace registration and the infoset codec.

mod infoset;
mod paths;
mod registry;
