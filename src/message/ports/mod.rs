//! Port trait definitions for the message subsystem.
//!
//! Ports define the abstract interfaces the families expose to the services
//! that consume them.

pub mod message;

pub use message::FamilyMessage;
