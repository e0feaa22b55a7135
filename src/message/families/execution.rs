//! Execution commands.
//!
//! Each execution message directs a worker to perform one step of a task
//! against the search index: importing documents, deleting by query,
//! reindexing, and confirming the asynchronous backend operations those steps
//! start.

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

const IMPORT: &[Requirement] = &[
    Requirement::Text("datasetId"),
    Requirement::Text("provider"),
    Requirement::OneOf("fileUrl", "data"),
];

const INDEX_IMPORT: &[Requirement] = &[
    Requirement::Text("datasetId"),
    Requirement::Text("index"),
    Requirement::Text("provider"),
    Requirement::OneOf("fileUrl", "data"),
];

const ELASTIC_TASK: &[Requirement] = &[Requirement::Text("elasticTaskId")];

const INDEX: &[Requirement] = &[Requirement::Text("index")];

/// Discriminants of the execution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum ExecutionKind {
    /// Create an index and import a dataset into it.
    Create,
    /// Import a dataset onto an existing index.
    Concat,
    /// Append a dataset to an existing index.
    Append,
    /// Run a delete-by-query against an index.
    Delete,
    /// Check whether a running delete-by-query has finished.
    ConfirmDelete,
    /// Delete an index.
    DeleteIndex,
    /// Confirm that an import into an index is complete.
    ConfirmImport,
    /// Copy the documents of one index into another.
    Reindex,
    /// Check whether a running reindex has finished.
    ConfirmReindex,
    /// Read a source file and stream its contents as data messages.
    ReadFile,
}

impl ExecutionKind {
    /// Returns the discriminant string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "EXECUTION_CREATE",
            Self::Concat => "EXECUTION_CONCAT",
            Self::Append => "EXECUTION_APPEND",
            Self::Delete => "EXECUTION_DELETE",
            Self::ConfirmDelete => "EXECUTION_CONFIRM_DELETE",
            Self::DeleteIndex => "EXECUTION_DELETE_INDEX",
            Self::ConfirmImport => "EXECUTION_CONFIRM_IMPORT",
            Self::Reindex => "EXECUTION_REINDEX",
            Self::ConfirmReindex => "EXECUTION_CONFIRM_REINDEX",
            Self::ReadFile => "EXECUTION_READ_FILE",
        }
    }
}

impl MessageKind for ExecutionKind {
    const FAMILY: Family = Family::Execution;

    const ALL: &'static [Self] = &[
        Self::Create,
        Self::Concat,
        Self::Append,
        Self::Delete,
        Self::ConfirmDelete,
        Self::DeleteIndex,
        Self::ConfirmImport,
        Self::Reindex,
        Self::ConfirmReindex,
        Self::ReadFile,
    ];

    fn as_str(self) -> &'static str {
        Self::as_str(&self)
    }

    fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::Create => IMPORT,
            Self::Concat | Self::Append => INDEX_IMPORT,
            Self::Delete => &[Requirement::Value("query"), Requirement::Text("index")],
            Self::ConfirmDelete | Self::ConfirmReindex => ELASTIC_TASK,
            Self::DeleteIndex | Self::ConfirmImport => INDEX,
            Self::Reindex => &[
                Requirement::Text("sourceIndex"),
                Requirement::Text("targetIndex"),
            ],
            Self::ReadFile => &[
                Requirement::Text("provider"),
                Requirement::Text("index"),
                Requirement::OneOf("fileUrl", "data"),
            ],
        }
    }
}

impl fmt::Display for ExecutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ExecutionKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ExecutionKind> for &'static str {
    fn from(kind: ExecutionKind) -> Self {
        kind.as_str()
    }
}

impl TryFrom<&str> for ExecutionKind {
    type Error = InvalidMessage;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidMessage::unknown_type(Family::Execution, s))
    }
}

impl FromStr for ExecutionKind {
    type Err = InvalidMessage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Import options shared by every import-style execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_path: Option<String>,
}

impl ImportOptions {
    fn read(fields: &FieldReader<'_>) -> Result<Self, InvalidMessage> {
        Ok(Self {
            legend: fields.optional_value("legend"),
            verified: fields.optional_flag("verified")?,
            data_path: fields.optional_string("dataPath")?,
        })
    }

    /// Returns the field mapping legend, if supplied.
    #[must_use]
    pub const fn legend(&self) -> Option<&Value> {
        self.legend.as_ref()
    }

    /// Returns whether the legend has been verified by a user.
    #[must_use]
    pub const fn verified(&self) -> Option<bool> {
        self.verified
    }

    /// Returns the path to the records inside a nested document, if any.
    #[must_use]
    pub fn data_path(&self) -> Option<&str> {
        self.data_path.as_deref()
    }
}

/// Command to create an index and import a dataset into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    dataset_id: String,
    provider: String,
    #[serde(flatten)]
    source: ImportSource,
    #[serde(flatten)]
    options: ImportOptions,
}

impl ImportExecution {
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

    /// Returns the optional import settings.
    #[must_use]
    pub const fn options(&self) -> &ImportOptions {
        &self.options
    }
}

/// Command to import a dataset onto an existing index.
///
/// Used by both `EXECUTION_CONCAT` and `EXECUTION_APPEND`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexImportExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    dataset_id: String,
    index: String,
    provider: String,
    #[serde(flatten)]
    source: ImportSource,
    #[serde(flatten)]
    options: ImportOptions,
}

impl IndexImportExecution {
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

    /// Returns the optional import settings.
    #[must_use]
    pub const fn options(&self) -> &ImportOptions {
        &self.options
    }
}

/// Command to run a delete-by-query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    query: Value,
    index: String,
}

impl DeleteExecution {
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

/// Command to poll an asynchronous backend operation.
///
/// Used by `EXECUTION_CONFIRM_DELETE` and `EXECUTION_CONFIRM_REINDEX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticTaskExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    elastic_task_id: String,
}

impl ElasticTaskExecution {
    /// Returns the backend operation identifier.
    #[must_use]
    pub fn elastic_task_id(&self) -> &str {
        &self.elastic_task_id
    }
}

/// Command acting on a single index.
///
/// Used by `EXECUTION_DELETE_INDEX` and `EXECUTION_CONFIRM_IMPORT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    index: String,
}

impl IndexExecution {
    /// Returns the index.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }
}

/// Command to copy one index into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    source_index: String,
    target_index: String,
}

impl ReindexExecution {
    /// Returns the index documents are copied from.
    #[must_use]
    pub fn source_index(&self) -> &str {
        &self.source_index
    }

    /// Returns the index documents are copied into.
    #[must_use]
    pub fn target_index(&self) -> &str {
        &self.target_index
    }
}

/// Command to read a source file into data messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileExecution {
    #[serde(flatten)]
    envelope: Envelope<ExecutionKind>,
    provider: String,
    index: String,
    #[serde(flatten)]
    source: ImportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    dataset_id: Option<String>,
    #[serde(flatten)]
    options: ImportOptions,
}

impl ReadFileExecution {
    /// Returns the source format, e.g. `csv`.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the index the documents will be written to.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the document source.
    #[must_use]
    pub const fn source(&self) -> &ImportSource {
        &self.source
    }

    /// Returns the dataset identifier, if supplied.
    #[must_use]
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    /// Returns the optional import settings.
    #[must_use]
    pub const fn options(&self) -> &ImportOptions {
        &self.options
    }
}

/// A validated execution message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExecutionMessage {
    /// `EXECUTION_CREATE`.
    Create(ImportExecution),
    /// `EXECUTION_CONCAT`.
    Concat(IndexImportExecution),
    /// `EXECUTION_APPEND`.
    Append(IndexImportExecution),
    /// `EXECUTION_DELETE`.
    Delete(DeleteExecution),
    /// `EXECUTION_CONFIRM_DELETE`.
    ConfirmDelete(ElasticTaskExecution),
    /// `EXECUTION_DELETE_INDEX`.
    DeleteIndex(IndexExecution),
    /// `EXECUTION_CONFIRM_IMPORT`.
    ConfirmImport(IndexExecution),
    /// `EXECUTION_REINDEX`.
    Reindex(ReindexExecution),
    /// `EXECUTION_CONFIRM_REINDEX`.
    ConfirmReindex(ElasticTaskExecution),
    /// `EXECUTION_READ_FILE`.
    ReadFile(ReadFileExecution),
}

impl FamilyMessage for ExecutionMessage {
    type Kind = ExecutionKind;

    fn envelope(&self) -> &Envelope<ExecutionKind> {
        match self {
            Self::Create(message) => &message.envelope,
            Self::Concat(message) | Self::Append(message) => &message.envelope,
            Self::Delete(message) => &message.envelope,
            Self::ConfirmDelete(message) | Self::ConfirmReindex(message) => &message.envelope,
            Self::DeleteIndex(message) | Self::ConfirmImport(message) => &message.envelope,
            Self::Reindex(message) => &message.envelope,
            Self::ReadFile(message) => &message.envelope,
        }
    }
}

static DISPATCHER: Lazy<Dispatcher<ExecutionKind, ExecutionMessage>> = Lazy::new(|| {
    Dispatcher::new()
        .register(ExecutionKind::Create, build_create)
        .register(ExecutionKind::Concat, build_index_import)
        .register(ExecutionKind::Append, build_index_import)
        .register(ExecutionKind::Delete, build_delete)
        .register(ExecutionKind::ConfirmDelete, build_elastic_task)
        .register(ExecutionKind::DeleteIndex, build_index)
        .register(ExecutionKind::ConfirmImport, build_index)
        .register(ExecutionKind::Reindex, build_reindex)
        .register(ExecutionKind::ConfirmReindex, build_elastic_task)
        .register(ExecutionKind::ReadFile, build_read_file)
});

/// Returns the execution family dispatcher.
#[must_use]
pub fn dispatcher() -> &'static Dispatcher<ExecutionKind, ExecutionMessage> {
    &DISPATCHER
}

/// Constructs an execution message from a discriminant and a property bag.
///
/// # Errors
///
/// Returns [`InvalidMessage`] for an unknown discriminant, a missing
/// `taskId`, or the first required field that is missing.
///
/// # Examples
///
/// ```
/// use ingest_messages::{PropertyBag, execution};
///
/// let props = PropertyBag::new().with("taskId", "t1");
/// let err = execution::create("EXECUTION_CONFIRM_REINDEX", &props)
///     .expect_err("elasticTaskId required");
/// assert!(err.mentions("elasticTaskId"));
///
/// let props = props.with("elasticTaskId", "e1");
/// assert!(execution::create("EXECUTION_CONFIRM_REINDEX", &props).is_ok());
/// ```
pub fn create(
    kind: impl AsRef<str>,
    props: &PropertyBag,
) -> Result<ExecutionMessage, InvalidMessage> {
    create_with_clock(kind, props, &DefaultClock)
}

/// Constructs an execution message using the supplied clock.
///
/// # Errors
///
/// See [`create`].
pub fn create_with_clock(
    kind: impl AsRef<str>,
    props: &PropertyBag,
    clock: &impl Clock,
) -> Result<ExecutionMessage, InvalidMessage> {
    DISPATCHER.dispatch(kind.as_ref(), props, clock)
}

fn build_create(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    Ok(ExecutionMessage::Create(ImportExecution {
        envelope,
        dataset_id: fields.string("datasetId")?,
        provider: fields.string("provider")?,
        source: fields.source()?,
        options: ImportOptions::read(fields)?,
    }))
}

fn build_index_import(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    let variant: fn(IndexImportExecution) -> ExecutionMessage = match envelope.kind() {
        ExecutionKind::Concat => ExecutionMessage::Concat,
        ExecutionKind::Append => ExecutionMessage::Append,
        other => return Err(unexpected(other)),
    };
    Ok(variant(IndexImportExecution {
        envelope,
        dataset_id: fields.string("datasetId")?,
        index: fields.string("index")?,
        provider: fields.string("provider")?,
        source: fields.source()?,
        options: ImportOptions::read(fields)?,
    }))
}

fn build_delete(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    Ok(ExecutionMessage::Delete(DeleteExecution {
        envelope,
        query: fields.value("query")?,
        index: fields.string("index")?,
    }))
}

fn build_elastic_task(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    let variant: fn(ElasticTaskExecution) -> ExecutionMessage = match envelope.kind() {
        ExecutionKind::ConfirmDelete => ExecutionMessage::ConfirmDelete,
        ExecutionKind::ConfirmReindex => ExecutionMessage::ConfirmReindex,
        other => return Err(unexpected(other)),
    };
    Ok(variant(ElasticTaskExecution {
        envelope,
        elastic_task_id: fields.string("elasticTaskId")?,
    }))
}

fn build_index(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    let variant: fn(IndexExecution) -> ExecutionMessage = match envelope.kind() {
        ExecutionKind::DeleteIndex => ExecutionMessage::DeleteIndex,
        ExecutionKind::ConfirmImport => ExecutionMessage::ConfirmImport,
        other => return Err(unexpected(other)),
    };
    Ok(variant(IndexExecution {
        envelope,
        index: fields.string("index")?,
    }))
}

fn build_reindex(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    Ok(ExecutionMessage::Reindex(ReindexExecution {
        envelope,
        source_index: fields.string("sourceIndex")?,
        target_index: fields.string("targetIndex")?,
    }))
}

fn build_read_file(
    envelope: Envelope<ExecutionKind>,
    fields: &FieldReader<'_>,
) -> Result<ExecutionMessage, InvalidMessage> {
    Ok(ExecutionMessage::ReadFile(ReadFileExecution {
        envelope,
        provider: fields.string("provider")?,
        index: fields.string("index")?,
        source: fields.source()?,
        dataset_id: fields.optional_string("datasetId")?,
        options: ImportOptions::read(fields)?,
    }))
}

fn unexpected(kind: ExecutionKind) -> InvalidMessage {
    InvalidMessage::unknown_type(Family::Execution, kind.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::services::Constructor;
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    #[case(ExecutionKind::DeleteIndex, build_index_import)]
    #[case(ExecutionKind::ConfirmImport, build_elastic_task)]
    #[case(ExecutionKind::ConfirmDelete, build_index)]
    fn shared_builders_refuse_kinds_they_do_not_build(
        #[case] kind: ExecutionKind,
        #[case] builder: Constructor<ExecutionKind, ExecutionMessage>,
    ) {
        let dispatcher = Dispatcher::new().register(kind, builder);
        let props = PropertyBag::new()
            .with("taskId", "t1")
            .with("index", "docs")
            .with("elasticTaskId", "e1");

        let err = dispatcher
            .dispatch(kind.as_str(), &props, &DefaultClock)
            .expect_err("builder must not relabel the kind");

        assert_eq!(err, InvalidMessage::unknown_type(Family::Execution, kind.as_str()));
    }
}
