//! Step definitions for message construction BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
