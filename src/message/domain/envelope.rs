//! The identity shape shared by every message.

use super::{MessageId, MessageKind, TaskId};
use serde::Serialize;

/// Common header of every constructed message.
///
/// # Invariants
///
/// - `id` is generated fresh for each envelope and never changes
/// - `kind` is a member of the owning family's enumeration
/// - `task_id` is present for every family that requires correlation
///
/// Envelopes are only built by the validation layer, after the base checks
/// have passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<K: MessageKind> {
    id: MessageId,

    #[serde(rename = "type")]
    kind: K,

    #[serde(skip_serializing_if = "Option::is_none")]
    task_id: Option<TaskId>,
}

impl<K: MessageKind> Envelope<K> {
    pub(crate) fn new(kind: K, task_id: Option<TaskId>) -> Self {
        Self {
            id: MessageId::new(),
            kind,
            task_id,
        }
    }

    /// Returns the generated message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> K {
        self.kind
    }

    /// Returns the discriminant string.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Returns the correlation id, absent only for task messages.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }
}
