//! Domain types for the message subsystem.
//!
//! This module contains the pieces every family is assembled from: the
//! envelope, identifiers, kind descriptors, the property bag and the import
//! source pair. All types are immutable after construction and serialisable
//! via serde.

mod envelope;
mod ids;
mod kind;
mod props;
mod source;

pub use envelope::Envelope;
pub use ids::{MessageId, TaskId};
pub use kind::{Family, MessageKind, Requirement};
pub use props::PropertyBag;
pub(crate) use props::{is_blank, json_type_name};
pub use source::ImportSource;
