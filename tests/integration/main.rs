//! Integration tests for the full pipeline
//!
//! Each test compiles a declaration set through [`apimodel::compile`] and
//! checks the model and diagnostics together.

mod pipeline;
