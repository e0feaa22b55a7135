//! Ingest messages: the shared message schemas of the ingestion workers.
//!
//! Worker services that import, transform and index documents exchange
//! typed messages: task lifecycle commands, execution steps, status events
//! and data chunks. This crate defines every message kind, validates that a
//! message is structurally complete before it is handed to the transport,
//! and reports malformed input through a single error type,
//! [`InvalidMessage`].
//!
//! # Families
//!
//! - [`task`]: commands that start a unit of work
//! - [`execution`]: steps a worker performs against the search index
//! - [`status`]: progress and completion events
//! - [`data`]: document payload chunks
//!
//! # Example
//!
//! ```
//! use ingest_messages::{FamilyMessage, InvalidMessage, PropertyBag, status};
//! use serde_json::json;
//!
//! let props = PropertyBag::new()
//!     .with("taskId", "t1")
//!     .with("error", json!({"reason": "mapping conflict"}));
//! let message = status::create(status::StatusKind::Error, &props).expect("valid error status");
//! assert_eq!(message.type_name(), "STATUS_ERROR");
//!
//! let rejected: Result<_, InvalidMessage> = status::create("STATUS_UNKNOWN", &props);
//! assert!(rejected.is_err_and(|err| err.is_unknown_type()));
//! ```

pub mod message;

pub use message::domain::{
    Envelope, Family, ImportSource, MessageId, MessageKind, PropertyBag, Requirement, TaskId,
};
pub use message::error::InvalidMessage;
pub use message::families::{data, execution, status, task};
pub use message::ports::FamilyMessage;
