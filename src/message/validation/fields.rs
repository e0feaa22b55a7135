//! Typed reads of declared fields from a property bag.

use crate::message::{
    domain::{ImportSource, PropertyBag, is_blank, json_type_name},
    error::InvalidMessage,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::Value;

/// Reads the fields one message kind declares.
///
/// Every failure is reported against `kind`, so errors always name the
/// discriminant being built and the offending property.
pub struct FieldReader<'a> {
    kind: &'static str,
    props: &'a PropertyBag,
    clock: &'a dyn Clock,
}

impl<'a> FieldReader<'a> {
    /// Creates a reader for the given kind.
    #[must_use]
    pub const fn new(kind: &'static str, props: &'a PropertyBag, clock: &'a dyn Clock) -> Self {
        Self { kind, props, clock }
    }

    /// Returns the discriminant the reader reports against.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns `true` if `field` holds a present, non-empty value.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.props.has_value(field)
    }

    /// Reads a required identifier-like field.
    ///
    /// Numbers are accepted and rendered to their decimal text.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::MissingField`] if the field is absent or
    /// empty, or [`InvalidMessage::InvalidFieldType`] if it is not a string
    /// or number.
    pub fn string(&self, field: &'static str) -> Result<String, InvalidMessage> {
        self.optional_string(field)?
            .ok_or(InvalidMessage::missing_field(self.kind, field))
    }

    /// Reads an optional identifier-like field.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::InvalidFieldType`] if a non-empty value is
    /// neither a string nor a number.
    pub fn optional_string(&self, field: &'static str) -> Result<Option<String>, InvalidMessage> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(_) => Err(self.wrong_type(field, "a string")),
        }
    }

    /// Reads a required opaque field.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::MissingField`] if the field is absent or
    /// empty.
    pub fn value(&self, field: &'static str) -> Result<Value, InvalidMessage> {
        self.optional_value(field)
            .ok_or(InvalidMessage::missing_field(self.kind, field))
    }

    /// Reads an optional opaque field.
    #[must_use]
    pub fn optional_value(&self, field: &str) -> Option<Value> {
        self.present(field).cloned()
    }

    /// Reads an optional boolean flag.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::InvalidFieldType`] if a non-empty value is
    /// not a boolean.
    pub fn optional_flag(&self, field: &'static str) -> Result<Option<bool>, InvalidMessage> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(_) => Err(self.wrong_type(field, "a boolean")),
        }
    }

    /// Reads the `fileUrl` / `data` pair.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::MissingAlternative`] if both are absent, or
    /// [`InvalidMessage::InvalidFieldType`] if `fileUrl` is malformed.
    pub fn source(&self) -> Result<ImportSource, InvalidMessage> {
        let file_url = self.optional_string("fileUrl")?;
        let data = self.optional_value("data");
        ImportSource::new(file_url, data).ok_or(InvalidMessage::MissingAlternative {
            kind: self.kind,
            first: "fileUrl",
            second: "data",
        })
    }

    /// Returns the current instant from the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.props.get(field).filter(|value| !is_blank(value))
    }

    fn wrong_type(&self, field: &'static str, expected: &'static str) -> InvalidMessage {
        let got = self.props.get(field).map_or("nothing", json_type_name);
        tracing::trace!(kind = self.kind, field, got, "declared field has the wrong shape");
        InvalidMessage::InvalidFieldType {
            kind: self.kind,
            field,
            expected,
        }
    }
}
