//! Message schemas and validation for the ingestion workers.
//!
//! This module implements the message envelope, the per-family kind
//! catalogues and the validation chain every constructor runs through.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Envelope`], [`domain::PropertyBag`], [`domain::Requirement`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::FamilyMessage`])
//! - **Services**: Discriminant dispatch ([`services::Dispatcher`])
//! - **Validation**: Base and kind-specific checks at the construction boundary
//! - **Families**: The task, execution, status and data catalogues
//!
//! # Example
//!
//! ```
//! use ingest_messages::message::families::execution::{self, ExecutionKind, ExecutionMessage};
//! use ingest_messages::message::domain::PropertyBag;
//!
//! let props = PropertyBag::new()
//!     .with("taskId", "t1")
//!     .with("sourceIndex", "docs-v1")
//!     .with("targetIndex", "docs-v2");
//! let message = execution::create(ExecutionKind::Reindex, &props).expect("valid reindex");
//! if let ExecutionMessage::Reindex(reindex) = message {
//!     assert_eq!(reindex.target_index(), "docs-v2");
//! }
//! ```

pub mod domain;
pub mod error;
pub mod families;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
