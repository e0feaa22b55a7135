//! Task lifecycle commands.
//!
//! Task messages are issued by the API service to start a unit of work. They
//! originate the task, so unlike every other family they carry no `taskId`.

use crate::message::{
    domain::{Envelope, Family, ImportSource, MessageKind, PropertyBag, Requirement},
    error::InvalidMessage,
    ports::FamilyMessage,
    services::Dispatcher,
    validation::FieldReader,
};
use mockable::{Clock, DefaultClock};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Discriminants of the task family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum TaskKind {
    /// Import a new dataset into a fresh index.
    Create,
    /// Import a dataset and concatenate it onto an existing index.
    Concat,
    /// Import a dataset replacing the contents of an existing index.
    Overwrite,
    /// Delete the documents matching a query.
    Delete,
    /// Delete a whole index.
    DeleteIndex,
}

impl TaskKind {
    /// Returns the discriminant string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "TASK_CREATE",
            Self::Concat => "TASK_CONCAT",
            Self::Overwrite => "TASK_OVERWRITE",
            Self::Delete => "TASK_DELETE",
            Self::DeleteIndex => "TASK_DELETE_INDEX",
        }
    }
}

impl MessageKind for TaskKind {
    const FAMILY: Family = Family::Task;

    const ALL: &'static [Self] = &[
        Self::Create,
        Self::Concat,
        Self::Overwrite,
        Self::Delete,
        Self::DeleteIndex,
    ];

    fn as_str(self) -> &'static str {
        Self::as_str(&self)
    }

    fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::Create => &[
                Requirement::Text("datasetId"),
                Requirement::Text("provider"),
                Requirement::OneOf("fileUrl", "data"),
            ],
            Self::Concat | Self::Overwrite => &[
                Requirement::Text("datasetId"),
                Requirement::Text("index"),
                Requirement::Text("provider"),
                Requirement::OneOf("fileUrl", "data"),
            ],
            Self::Delete => &[Requirement::Value("query"), Requirement::Text("index")],
            Self::DeleteIndex => &[Requirement::Text("index"), Requirement::Text("datasetId")],
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TaskKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<TaskKind> for &'static str {
    fn from(kind: TaskKind) -> Self {
        kind.as_str()
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = InvalidMessage;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "TASK_CREATE" => Ok(Self::Create),
            "TASK_CONCAT" => Ok(Self::Concat),
            "TASK_OVERWRITE" => Ok(Self::Overwrite),
            "TASK_DELETE" => Ok(Self::Delete),
            "TASK_DELETE_INDEX" => Ok(Self::DeleteIndex),
            _ => Err(InvalidMessage::unknown_type(Family::Task, s)),
        }
    }
}

impl FromStr for TaskKind {
    type Err = InvalidMessage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Request to import a dataset into a new index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(flatten)]
    envelope: Envelope<TaskKind>,
    dataset_id: String,
    provider: String,
    #[serde(flatten)]
    source: ImportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Value>,
}

impl CreateTask {
    /// Returns the dataset identifier.
    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Returns the source format, e.g. `csv`.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the document source.
    #[must_use]
    pub const fn source(&self) -> &ImportSource {
        &self.source
    }

    /// Returns the field mapping legend, if supplied.
    #[must_use]
    pub const fn legend(&self) -> Option<&Value> {
        self.legend.as_ref()
    }
}

/// Request to import a dataset into an existing index.
///
/// Used by both `TASK_CONCAT` and `TASK_OVERWRITE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexImportTask {
    #[serde(flatten)]
    envelope: Envelope<TaskKind>,
    dataset_id: String,
    index: String,
    provider: String,
    #[serde(flatten)]
    source: ImportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Value>,
}

impl IndexImportTask {
    /// Returns the dataset identifier.
    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Returns the target index.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the source format, e.g. `csv`.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the document source.
    #[must_use]
    pub const fn source(&self) -> &ImportSource {
        &self.source
    }

    /// Returns the field mapping legend, if supplied.
    #[must_use]
    pub const fn legend(&self) -> Option<&Value> {
        self.legend.as_ref()
    }
}

/// Request to delete the documents matching a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteTask {
    #[serde(flatten)]
    envelope: Envelope<TaskKind>,
    query: Value,
    index: String,
}

impl DeleteTask {
    /// Returns the backend query selecting documents to delete.
    #[must_use]
    pub const fn query(&self) -> &Value {
        &self.query
    }

    /// Returns the index the query runs against.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }
}

/// Request to delete an index belonging to a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteIndexTask {
    #[serde(flatten)]
    envelope: Envelope<TaskKind>,
    index: String,
    dataset_id: String,
}

impl DeleteIndexTask {
    /// Returns the index to delete.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the owning dataset identifier.
    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }
}

/// A validated task message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskMessage {
    /// `TASK_CREATE`.
    Create(CreateTask),
    /// `TASK_CONCAT`.
    Concat(IndexImportTask),
    /// `TASK_OVERWRITE`.
    Overwrite(IndexImportTask),
    /// `TASK_DELETE`.
    Delete(DeleteTask),
    /// `TASK_DELETE_INDEX`.
    DeleteIndex(DeleteIndexTask),
}

impl FamilyMessage for TaskMessage {
    type Kind = TaskKind;

    fn envelope(&self) -> &Envelope<TaskKind> {
        match self {
            Self::Create(message) => &message.envelope,
            Self::Concat(message) | Self::Overwrite(message) => &message.envelope,
            Self::Delete(message) => &message.envelope,
            Self::DeleteIndex(message) => &message.envelope,
        }
    }
}

static DISPATCHER: Lazy<Dispatcher<TaskKind, TaskMessage>> = Lazy::new(|| {
    Dispatcher::new()
        .register(TaskKind::Create, build_create)
        .register(TaskKind::Concat, build_index_import)
        .register(TaskKind::Overwrite, build_index_import)
        .register(TaskKind::Delete, build_delete)
        .register(TaskKind::DeleteIndex, build_delete_index)
});

/// Returns the task family dispatcher.
#[must_use]
pub fn dispatcher() -> &'static Dispatcher<TaskKind, TaskMessage> {
    &DISPATCHER
}

/// Constructs a task message from a discriminant and a property bag.
///
/// # Errors
///
/// Returns [`InvalidMessage`] for an unknown discriminant or the first
/// required field that is missing.
///
/// # Examples
///
/// ```
/// use ingest_messages::{PropertyBag, task};
///
/// let props = PropertyBag::new()
///     .with("datasetId", "1234")
///     .with("fileUrl", "https://x/doc.csv")
///     .with("provider", "csv");
/// let message = task::create(task::TaskKind::Create, &props).expect("valid task");
/// assert!(matches!(message, task::TaskMessage::Create(_)));
///
/// let err = task::create("TASK_DELETE", &PropertyBag::new()).expect_err("query required");
/// assert!(err.to_string().contains("query"));
/// ```
pub fn create(kind: impl AsRef<str>, props: &PropertyBag) -> Result<TaskMessage, InvalidMessage> {
    create_with_clock(kind, props, &DefaultClock)
}

/// Constructs a task message using the supplied clock.
///
/// # Errors
///
/// See [`create`].
pub fn create_with_clock(
    kind: impl AsRef<str>,
    props: &PropertyBag,
    clock: &impl Clock,
) -> Result<TaskMessage, InvalidMessage> {
    DISPATCHER.dispatch(kind.as_ref(), props, clock)
}

fn build_create(
    envelope: Envelope<TaskKind>,
    fields: &FieldReader<'_>,
) -> Result<TaskMessage, InvalidMessage> {
    Ok(TaskMessage::Create(CreateTask {
        envelope,
        dataset_id: fields.string("datasetId")?,
        provider: fields.string("provider")?,
        source: fields.source()?,
        legend: fields.optional_value("legend"),
    }))
}

fn build_index_import(
    envelope: Envelope<TaskKind>,
    fields: &FieldReader<'_>,
) -> Result<TaskMessage, InvalidMessage> {
    let variant: fn(IndexImportTask) -> TaskMessage = match envelope.kind() {
        TaskKind::Concat => TaskMessage::Concat,
        TaskKind::Overwrite => TaskMessage::Overwrite,
        other => return Err(InvalidMessage::unknown_type(Family::Task, other.as_str())),
    };
    Ok(variant(IndexImportTask {
        envelope,
        dataset_id: fields.string("datasetId")?,
        index: fields.string("index")?,
        provider: fields.string("provider")?,
        source: fields.source()?,
        legend: fields.optional_value("legend"),
    }))
}

fn build_delete(
    envelope: Envelope<TaskKind>,
    fields: &FieldReader<'_>,
) -> Result<TaskMessage, InvalidMessage> {
    Ok(TaskMessage::Delete(DeleteTask {
        envelope,
        query: fields.value("query")?,
        index: fields.string("index")?,
    }))
}

fn build_delete_index(
    envelope: Envelope<TaskKind>,
    fields: &FieldReader<'_>,
) -> Result<TaskMessage, InvalidMessage> {
    Ok(TaskMessage::DeleteIndex(DeleteIndexTask {
        envelope,
        index: fields.string("index")?,
        dataset_id: fields.string("datasetId")?,
    }))
}
