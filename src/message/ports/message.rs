//! Uniform read access to any constructed message.

use crate::message::domain::{Envelope, MessageId, MessageKind, TaskId};

/// Port implemented by the sum type of each message family.
///
/// Transport code can route any message through this trait without knowing
/// which family it came from.
///
/// # Examples
///
/// ```
/// use ingest_messages::{FamilyMessage, PropertyBag, status};
///
/// let props = PropertyBag::new().with("taskId", "t1").with("index", "docs");
/// let message = status::create(status::StatusKind::IndexCreated, &props)
///     .expect("valid status");
/// assert_eq!(message.type_name(), "STATUS_INDEX_CREATED");
/// assert_eq!(message.task_id().map(|id| id.as_str()), Some("t1"));
/// ```
pub trait FamilyMessage {
    /// The kind enumeration of the family.
    type Kind: MessageKind;

    /// Returns the envelope shared by every variant.
    fn envelope(&self) -> &Envelope<Self::Kind>;

    /// Returns the generated message identifier.
    fn id(&self) -> MessageId {
        self.envelope().id()
    }

    /// Returns the message kind.
    fn kind(&self) -> Self::Kind {
        self.envelope().kind()
    }

    /// Returns the discriminant string.
    fn type_name(&self) -> &'static str {
        self.envelope().type_name()
    }

    /// Returns the correlation id, absent only for task messages.
    fn task_id(&self) -> Option<&TaskId> {
        self.envelope().task_id()
    }
}
