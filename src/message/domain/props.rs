//! The property bag a caller hands to a family dispatcher.

use crate::message::error::InvalidMessage;
use serde_json::{Map, Value};

/// Loosely typed input to message construction.
///
/// Only the fields a kind declares are ever read; everything else is
/// ignored.
///
/// # Examples
///
/// ```
/// use ingest_messages::PropertyBag;
/// use serde_json::json;
///
/// let props = PropertyBag::new()
///     .with("taskId", "t1")
///     .with("index", "documents");
/// assert!(props.has_value("index"));
///
/// let from_json = PropertyBag::from_value(json!({"taskId": "t1"})).expect("object");
/// assert_eq!(from_json.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag(Map<String, Value>);

impl PropertyBag {
    /// Creates an empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Creates a property bag from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::NotAnObject`] unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Result<Self, InvalidMessage> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(InvalidMessage::NotAnObject(json_type_name(&other))),
        }
    }

    /// Adds a property, returning the updated bag.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts a property, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a property, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` holds a present, non-empty value.
    ///
    /// `null`, whitespace-only strings, empty arrays and empty objects all
    /// count as empty.
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|value| !is_blank(value))
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the bag holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for PropertyBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for PropertyBag {
    type Error = InvalidMessage;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

/// Returns `true` for values that count as "not supplied".
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
