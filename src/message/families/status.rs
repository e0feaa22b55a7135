//! Status events.
//!
//! Workers report progress and completion of each task step through status
//! messages. Kinds that track an asynchronous backend operation stamp the
//! instant they were built in `lastCheckedDate`; the stamp is informational
//! and never validated.

use crate::message::{
    domain::{Envelope, Family, MessageKind, PropertyBag, Requirement},
    error::InvalidMessage,
    ports::FamilyMessage,
    services::Dispatcher,
    validation::FieldReader,
};
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};

const ELASTIC_TASK: &[Requirement] = &[Requirement::Text("elasticTaskId")];

/// Discriminants of the status family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum StatusKind {
    /// An index was created.
    IndexCreated,
    /// An index was taken out of service.
    IndexDeactivated,
    /// A chunk of source data was read.
    ReadData,
    /// A provenance record was generated for the imported data.
    BlockchainGenerated,
    /// A source file was read completely.
    ReadFile,
    /// A chunk of data was written to the index.
    WrittenData,
    /// A delete-by-query was started in the backend.
    PerformedDeleteQuery,
    /// A delete-by-query finished.
    FinishedDeleteQuery,
    /// A reindex was started in the backend.
    PerformedReindex,
    /// A reindex finished.
    FinishedReindex,
    /// An index was deleted.
    IndexDeleted,
    /// An import was confirmed complete.
    ImportConfirmed,
    /// A step failed.
    Error,
}

impl StatusKind {
    /// Returns the discriminant string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IndexCreated => "STATUS_INDEX_CREATED",
            Self::IndexDeactivated => "STATUS_INDEX_DEACTIVATED",
            Self::ReadData => "STATUS_READ_DATA",
            Self::BlockchainGenerated => "STATUS_BLOCKCHAIN_GENERATED",
            Self::ReadFile => "STATUS_READ_FILE",
            Self::WrittenData => "STATUS_WRITTEN_DATA",
            Self::PerformedDeleteQuery => "STATUS_PERFORMED_DELETE_QUERY",
            Self::FinishedDeleteQuery => "STATUS_FINISHED_DELETE_QUERY",
            Self::PerformedReindex => "STATUS_PERFORMED_REINDEX",
            Self::FinishedReindex => "STATUS_FINISHED_REINDEX",
            Self::IndexDeleted => "STATUS_INDEX_DELETED",
            Self::ImportConfirmed => "STATUS_IMPORT_CONFIRMED",
            Self::Error => "STATUS_ERROR",
        }
    }

    /// Returns `true` if messages of this kind carry `lastCheckedDate`.
    #[must_use]
    pub const fn stamps_check_date(&self) -> bool {
        matches!(
            self,
            Self::PerformedDeleteQuery
                | Self::FinishedDeleteQuery
                | Self::PerformedReindex
                | Self::FinishedReindex
                | Self::IndexDeleted
                | Self::ImportConfirmed
        )
    }
}

impl MessageKind for StatusKind {
    const FAMILY: Family = Family::Status;

    const ALL: &'static [Self] = &[
        Self::IndexCreated,
        Self::IndexDeactivated,
        Self::ReadData,
        Self::BlockchainGenerated,
        Self::ReadFile,
        Self::WrittenData,
        Self::PerformedDeleteQuery,
        Self::FinishedDeleteQuery,
        Self::PerformedReindex,
        Self::FinishedReindex,
        Self::IndexDeleted,
        Self::ImportConfirmed,
        Self::Error,
    ];

    fn as_str(self) -> &'static str {
        Self::as_str(&self)
    }

    fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::IndexCreated | Self::IndexDeactivated => &[Requirement::Text("index")],
            Self::ReadData => &[Requirement::Text("hash"), Requirement::Text("file")],
            Self::BlockchainGenerated => &[Requirement::Value("blockchain")],
            Self::ReadFile => &[Requirement::Text("file")],
            Self::WrittenData => &[
                Requirement::Text("index"),
                Requirement::Text("hash"),
                Requirement::Text("file"),
            ],
            Self::PerformedDeleteQuery | Self::PerformedReindex => ELASTIC_TASK,
            Self::FinishedDeleteQuery
            | Self::FinishedReindex
            | Self::IndexDeleted
            | Self::ImportConfirmed => &[],
            Self::Error => &[Requirement::Value("error")],
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for StatusKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<StatusKind> for &'static str {
    fn from(kind: StatusKind) -> Self {
        kind.as_str()
    }
}

impl TryFrom<&str> for StatusKind {
    type Error = InvalidMessage;

    fn try_from(s: &str) -> Result<Self, InvalidMessage> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidMessage::unknown_type(Family::Status, s))
    }
}

impl FromStr for StatusKind {
    type Err = InvalidMessage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// An event about a single index.
///
/// Used by `STATUS_INDEX_CREATED` and `STATUS_INDEX_DEACTIVATED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    index: String,
}

impl IndexStatus {
    /// Returns the index the event is about.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }
}

/// A chunk of source data was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadDataStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    hash: String,
    file: String,
}

impl ReadDataStatus {
    /// Returns the content hash of the chunk.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the file the chunk came from.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// A provenance record was generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockchainStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    blockchain: Value,
}

impl BlockchainStatus {
    /// Returns the provenance record.
    #[must_use]
    pub const fn blockchain(&self) -> &Value {
        &self.blockchain
    }
}

/// A source file was read completely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadFileStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    file: String,
}

impl ReadFileStatus {
    /// Returns the file that was read.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// A chunk of data was written to the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenDataStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    index: String,
    hash: String,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    with_errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<Value>,
}

impl WrittenDataStatus {
    /// Returns the index written to.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the content hash of the written chunk.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the file the chunk came from.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns `true` if the backend reported per-document failures.
    #[must_use]
    pub fn with_errors(&self) -> bool {
        self.with_errors.unwrap_or(false)
    }

    /// Returns the backend response detail, if supplied.
    #[must_use]
    pub const fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }
}

/// A backend operation was started and should be polled.
///
/// Used by `STATUS_PERFORMED_DELETE_QUERY` and `STATUS_PERFORMED_REINDEX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticTaskStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    elastic_task_id: String,
    last_checked_date: DateTime<Utc>,
}

impl ElasticTaskStatus {
    /// Returns the backend operation identifier.
    #[must_use]
    pub fn elastic_task_id(&self) -> &str {
        &self.elastic_task_id
    }

    /// Returns when the message was built.
    #[must_use]
    pub const fn last_checked_date(&self) -> DateTime<Utc> {
        self.last_checked_date
    }
}

/// A completion checkpoint with no payload.
///
/// Used by `STATUS_FINISHED_DELETE_QUERY`, `STATUS_FINISHED_REINDEX`,
/// `STATUS_INDEX_DELETED` and `STATUS_IMPORT_CONFIRMED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    last_checked_date: DateTime<Utc>,
}

impl CheckpointStatus {
    /// Returns when the message was built.
    #[must_use]
    pub const fn last_checked_date(&self) -> DateTime<Utc> {
        self.last_checked_date
    }
}

/// A step failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorStatus {
    #[serde(flatten)]
    envelope: Envelope<StatusKind>,
    error: Value,
}

impl ErrorStatus {
    /// Returns the opaque failure detail.
    #[must_use]
    pub const fn error(&self) -> &Value {
        &self.error
    }
}

/// A validated status message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusMessage {
    /// `STATUS_INDEX_CREATED`.
    IndexCreated(IndexStatus),
    /// `STATUS_INDEX_DEACTIVATED`.
    IndexDeactivated(IndexStatus),
    /// `STATUS_READ_DATA`.
    ReadData(ReadDataStatus),
    /// `STATUS_BLOCKCHAIN_GENERATED`.
    BlockchainGenerated(BlockchainStatus),
    /// `STATUS_READ_FILE`.
    ReadFile(ReadFileStatus),
    /// `STATUS_WRITTEN_DATA`.
    WrittenData(WrittenDataStatus),
    /// `STATUS_PERFORMED_DELETE_QUERY`.
    PerformedDeleteQuery(ElasticTaskStatus),
    /// `STATUS_FINISHED_DELETE_QUERY`.
    FinishedDeleteQuery(CheckpointStatus),
    /// `STATUS_PERFORMED_REINDEX`.
    PerformedReindex(ElasticTaskStatus),
    /// `STATUS_FINISHED_REINDEX`.
    FinishedReindex(CheckpointStatus),
    /// `STATUS_INDEX_DELETED`.
    IndexDeleted(CheckpointStatus),
    /// `STATUS_IMPORT_CONFIRMED`.
    ImportConfirmed(CheckpointStatus),
    /// `STATUS_ERROR`.
    Error(ErrorStatus),
}

impl StatusMessage {
    /// Returns the `lastCheckedDate` stamp for kinds that carry one.
    #[must_use]
    pub const fn last_checked_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::PerformedDeleteQuery(message) | Self::PerformedReindex(message) => {
                Some(message.last_checked_date)
            }
            Self::FinishedDeleteQuery(message)
            | Self::FinishedReindex(message)
            | Self::IndexDeleted(message)
            | Self::ImportConfirmed(message) => Some(message.last_checked_date),
            Self::IndexCreated(_)
            | Self::IndexDeactivated(_)
            | Self::ReadData(_)
            | Self::BlockchainGenerated(_)
            | Self::ReadFile(_)
            | Self::WrittenData(_)
            | Self::Error(_) => None,
        }
    }
}

impl FamilyMessage for StatusMessage {
    type Kind = StatusKind;

    fn envelope(&self) -> &Envelope<StatusKind> {
        match self {
            Self::IndexCreated(message) | Self::IndexDeactivated(message) => &message.envelope,
            Self::ReadData(message) => &message.envelope,
            Self::BlockchainGenerated(message) => &message.envelope,
            Self::ReadFile(message) => &message.envelope,
            Self::WrittenData(message) => &message.envelope,
            Self::PerformedDeleteQuery(message) | Self::PerformedReindex(message) => {
                &message.envelope
            }
            Self::FinishedDeleteQuery(message)
            | Self::FinishedReindex(message)
            | Self::IndexDeleted(message)
            | Self::ImportConfirmed(message) => &message.envelope,
            Self::Error(message) => &message.envelope,
        }
    }
}

static DISPATCHER: Lazy<Dispatcher<StatusKind, StatusMessage>> = Lazy::new(|| {
    Dispatcher::new()
        .register(StatusKind::IndexCreated, build_index)
        .register(StatusKind::IndexDeactivated, build_index)
        .register(StatusKind::ReadData, build_read_data)
        .register(StatusKind::BlockchainGenerated, build_blockchain)
        .register(StatusKind::ReadFile, build_read_file)
        .register(StatusKind::WrittenData, build_written_data)
        .register(StatusKind::PerformedDeleteQuery, build_elastic_task)
        .register(StatusKind::FinishedDeleteQuery, build_checkpoint)
        .register(StatusKind::PerformedReindex, build_elastic_task)
        .register(StatusKind::FinishedReindex, build_checkpoint)
        .register(StatusKind::IndexDeleted, build_checkpoint)
        .register(StatusKind::ImportConfirmed, build_checkpoint)
        .register(StatusKind::Error, build_error)
});

/// Returns the status family dispatcher.
#[must_use]
pub fn dispatcher() -> &'static Dispatcher<StatusKind, StatusMessage> {
    &DISPATCHER
}

/// Constructs a status message from a discriminant and a property bag.
///
/// # Errors
///
/// Returns [`InvalidMessage`] for an unknown discriminant, a missing
/// `taskId`, or the first required field that is missing.
///
/// # Examples
///
/// ```
/// use ingest_messages::{PropertyBag, status};
///
/// let props = PropertyBag::new()
///     .with("taskId", "t1")
///     .with("index", "idx")
///     .with("hash", "h1")
///     .with("file", "f1");
/// let message = status::create(status::StatusKind::WrittenData, &props).expect("valid status");
/// assert!(matches!(message, status::StatusMessage::WrittenData(_)));
/// ```
pub fn create(kind: impl AsRef<str>, props: &PropertyBag) -> Result<StatusMessage, InvalidMessage> {
    create_with_clock(kind, props, &DefaultClock)
}

/// Constructs a status message stamping `lastCheckedDate` from `clock`.
///
/// # Errors
///
/// See [`create`].
pub fn create_with_clock(
    kind: impl AsRef<str>,
    props: &PropertyBag,
    clock: &impl Clock,
) -> Result<StatusMessage, InvalidMessage> {
    DISPATCHER.dispatch(kind.as_ref(), props, clock)
}

fn build_index(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    let variant: fn(IndexStatus) -> StatusMessage = match envelope.kind() {
        StatusKind::IndexCreated => StatusMessage::IndexCreated,
        StatusKind::IndexDeactivated => StatusMessage::IndexDeactivated,
        other => return Err(unexpected(other)),
    };
    Ok(variant(IndexStatus {
        envelope,
        index: fields.string("index")?,
    }))
}

fn build_read_data(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    Ok(StatusMessage::ReadData(ReadDataStatus {
        envelope,
        hash: fields.string("hash")?,
        file: fields.string("file")?,
    }))
}

fn build_blockchain(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    Ok(StatusMessage::BlockchainGenerated(BlockchainStatus {
        envelope,
        blockchain: fields.value("blockchain")?,
    }))
}

fn build_read_file(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    Ok(StatusMessage::ReadFile(ReadFileStatus {
        envelope,
        file: fields.string("file")?,
    }))
}

fn build_written_data(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    Ok(StatusMessage::WrittenData(WrittenDataStatus {
        envelope,
        index: fields.string("index")?,
        hash: fields.string("hash")?,
        file: fields.string("file")?,
        with_errors: fields.optional_flag("withErrors")?,
        detail: fields.optional_value("detail"),
    }))
}

fn build_elastic_task(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    let variant: fn(ElasticTaskStatus) -> StatusMessage = match envelope.kind() {
        StatusKind::PerformedDeleteQuery => StatusMessage::PerformedDeleteQuery,
        StatusKind::PerformedReindex => StatusMessage::PerformedReindex,
        other => return Err(unexpected(other)),
    };
    Ok(variant(ElasticTaskStatus {
        envelope,
        elastic_task_id: fields.string("elasticTaskId")?,
        last_checked_date: fields.now(),
    }))
}

fn build_checkpoint(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    let variant: fn(CheckpointStatus) -> StatusMessage = match envelope.kind() {
        StatusKind::FinishedDeleteQuery => StatusMessage::FinishedDeleteQuery,
        StatusKind::FinishedReindex => StatusMessage::FinishedReindex,
        StatusKind::IndexDeleted => StatusMessage::IndexDeleted,
        StatusKind::ImportConfirmed => StatusMessage::ImportConfirmed,
        other => return Err(unexpected(other)),
    };
    Ok(variant(CheckpointStatus {
        envelope,
        last_checked_date: fields.now(),
    }))
}

fn build_error(
    envelope: Envelope<StatusKind>,
    fields: &FieldReader<'_>,
) -> Result<StatusMessage, InvalidMessage> {
    Ok(StatusMessage::Error(ErrorStatus {
        envelope,
        error: fields.value("error")?,
    }))
}

fn unexpected(kind: StatusKind) -> InvalidMessage {
    InvalidMessage::unknown_type(Family::Status, kind.as_str())
}
