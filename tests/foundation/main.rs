//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: QName, Diagnostic, Error.

mod diagnostics;
mod qnames;
