//! Integration tests for Layer 1: Declaration view
//!
//! Tests for the declaration source: lookup, reachability and annotations.

mod annotations;
mod reachability;
