//! Unit tests for the message module.
//!
//! Tests are organised by family, covering happy paths, rejected input and
//! the shared validation chain.

mod error_tests;
mod execution_tests;
