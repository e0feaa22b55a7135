//! Identifier newtypes carried by every message envelope.
//!
//! `MessageId` is generated fresh at every construction. `TaskId` is the
//! correlation id supplied by the caller, linking a message to the task it
//! belongs to.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Identity of one constructed message.
///
/// Every call to a family `create` stamps a fresh id into the envelope, so
/// two messages built from the same properties are still told apart.
///
/// # Examples
///
/// ```
/// use ingest_messages::{FamilyMessage, PropertyBag, task};
///
/// let props = PropertyBag::new().with("query", "*").with("index", "docs");
/// let first = task::create("TASK_DELETE", &props).expect("valid delete");
/// let second = task::create("TASK_DELETE", &props).expect("valid delete");
///
/// assert_eq!(first.id().as_ref().get_version_num(), 4);
/// assert_ne!(first.id(), second.id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generates the id for a message about to be constructed.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Same as [`MessageId::new`]: each call yields an unused id.
impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for MessageId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Correlation id of the task a message belongs to.
///
/// The value is assigned by whichever service originated the task; this
/// crate only guarantees it is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task id, returning `None` for blank input.
    ///
    /// # Examples
    ///
    /// ```
    /// use ingest_messages::TaskId;
    ///
    /// assert_eq!(TaskId::new("t1").map(|id| id.to_string()), Some("t1".to_owned()));
    /// assert!(TaskId::new("   ").is_none());
    /// ```
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let text: String = value.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
