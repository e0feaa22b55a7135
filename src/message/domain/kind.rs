//! Family and kind descriptors shared by the four message families.

use std::fmt;
use std::hash::Hash;

/// The four message namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Task lifecycle commands issued by the API service.
    Task,
    /// Commands directing a worker to perform one step of a task.
    Execution,
    /// Progress and completion events.
    Status,
    /// Chunks of document payload to be indexed.
    Data,
}

impl Family {
    /// Returns the family name as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Execution => "execution",
            Self::Status => "status",
            Self::Data => "data",
        }
    }

    /// Returns `true` if messages of this family must carry a `taskId`.
    ///
    /// Task messages originate a task, so they never carry one.
    #[must_use]
    pub const fn requires_task_id(&self) -> bool {
        !matches!(self, Self::Task)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required-field rule declared by a message kind.
///
/// Rules are checked in declaration order and each one checks both presence
/// and shape, so the first failing field is always the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// An identifier-like field: a non-empty string or number.
    Text(&'static str),
    /// An opaque field: any non-empty JSON value.
    Value(&'static str),
    /// An identifier-like field or an opaque payload, at least one of which
    /// must be present. A present first field must still be text.
    OneOf(&'static str, &'static str),
}

impl Requirement {
    /// Returns the property names this rule inspects.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match *self {
            Self::Text(field) | Self::Value(field) => vec![field],
            Self::OneOf(first, second) => vec![first, second],
        }
    }
}

/// A closed enumeration of discriminants belonging to one family.
///
/// Implementors are plain fieldless enums; the trait ties each variant to
/// its wire name and declared requirements.
pub trait MessageKind:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + AsRef<str> + Send + Sync + 'static
{
    /// The family this kind belongs to.
    const FAMILY: Family;

    /// Every member of the enumeration, in declaration order.
    const ALL: &'static [Self];

    /// Returns the discriminant string, e.g. `"TASK_CREATE"`.
    fn as_str(self) -> &'static str;

    /// Returns the required-field rules checked after base validation.
    fn requirements(self) -> &'static [Requirement];
}
