//! Message validation implementation.
//!
//! This module provides the shared validation chain (base envelope checks,
//! then declared requirements, presence and shape together) and the typed
//! field reader constructors use to copy declared fields out of a property
//! bag.

mod fields;
pub mod rules;

pub use fields::FieldReader;
pub use rules::{validate_envelope, validate_requirement, validate_requirements};
