//! Application services for the message subsystem.
//!
//! The dispatcher resolves a discriminant to its constructor and drives the
//! validation chain; each family owns one instance.

mod dispatcher;

pub use dispatcher::{Constructor, Dispatcher};
