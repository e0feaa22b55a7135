//! Data payload chunks.
//!
//! The reader worker splits a source document into chunks and sends each one
//! to the writer as a `DATA` message.

use crate::message::{
    domain::{Envelope, Family, MessageKind, PropertyBag, Requirement},
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

/// Discriminants of the data family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum DataKind {
    /// A chunk of documents to index.
    Data,
}

impl DataKind {
    /// Returns the discriminant string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "DATA",
        }
    }
}

impl MessageKind for DataKind {
    const FAMILY: Family = Family::Data;

    const ALL: &'static [Self] = &[Self::Data];

    fn as_str(self) -> &'static str {
        Self::as_str(&self)
    }

    fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::Data => &[
                Requirement::Value("data"),
                Requirement::Text("index"),
                Requirement::Text("file"),
            ],
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DataKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<DataKind> for &'static str {
    fn from(kind: DataKind) -> Self {
        kind.as_str()
    }
}

impl TryFrom<&str> for DataKind {
    type Error = InvalidMessage;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "DATA" => Ok(Self::Data),
            _ => Err(InvalidMessage::unknown_type(Family::Data, s)),
        }
    }
}

impl FromStr for DataKind {
    type Err = InvalidMessage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// A chunk of documents bound for an index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataChunk {
    #[serde(flatten)]
    envelope: Envelope<DataKind>,
    data: Value,
    index: String,
    file: String,
}

impl DataChunk {
    /// Returns the documents in this chunk.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the index the documents are written to.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the source file the chunk was read from.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// A validated data message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataMessage {
    /// `DATA`.
    Data(DataChunk),
}

impl FamilyMessage for DataMessage {
    type Kind = DataKind;

    fn envelope(&self) -> &Envelope<DataKind> {
        match self {
            Self::Data(message) => &message.envelope,
        }
    }
}

static DISPATCHER: Lazy<Dispatcher<DataKind, DataMessage>> =
    Lazy::new(|| Dispatcher::new().register(DataKind::Data, build_data));

/// Returns the data family dispatcher.
#[must_use]
pub fn dispatcher() -> &'static Dispatcher<DataKind, DataMessage> {
    &DISPATCHER
}

/// Constructs a data message from a discriminant and a property bag.
///
/// # Errors
///
/// Returns [`InvalidMessage`] for an unknown discriminant, a missing
/// `taskId`, or a missing `data`, `index` or `file`.
///
/// # Examples
///
/// ```
/// use ingest_messages::{PropertyBag, data};
/// use serde_json::json;
///
/// let props = PropertyBag::new().with("taskId", "t1").with("data", json!([1, 2, 3]));
/// let err = data::create(data::DataKind::Data, &props).expect_err("index and file required");
/// assert!(err.mentions("index"));
/// ```
pub fn create(kind: impl AsRef<str>, props: &PropertyBag) -> Result<DataMessage, InvalidMessage> {
    create_with_clock(kind, props, &DefaultClock)
}

/// Constructs a data message using the supplied clock.
///
/// # Errors
///
/// See [`create`].
pub fn create_with_clock(
    kind: impl AsRef<str>,
    props: &PropertyBag,
    clock: &impl Clock,
) -> Result<DataMessage, InvalidMessage> {
    DISPATCHER.dispatch(kind.as_ref(), props, clock)
}

fn build_data(
    envelope: Envelope<DataKind>,
    fields: &FieldReader<'_>,
) -> Result<DataMessage, InvalidMessage> {
    Ok(DataMessage::Data(DataChunk {
        envelope,
        data: fields.value("data")?,
        index: fields.string("index")?,
        file: fields.string("file")?,
    }))
}
