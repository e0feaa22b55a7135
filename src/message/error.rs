//! The single error type raised when a message cannot be constructed.
//!
//! Every family reports every construction failure through
//! [`InvalidMessage`], so callers can separate "malformed message" from any
//! other failure class with one type check. Variants describe which rule
//! failed; the rendered [`Display`](std::fmt::Display) text is the
//! human-readable reason.

use super::domain::Family;
use thiserror::Error;

/// A message was rejected at the construction boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMessage {
    /// The discriminant is not a member of the family's enumeration.
    #[error("invalid type '{discriminant}' for {family} message")]
    UnknownType {
        /// The family whose dispatcher was asked.
        family: Family,
        /// The discriminant as supplied by the caller.
        discriminant: String,
    },

    /// A required field is absent, null or empty.
    #[error("{kind} message requires a non-empty {field}")]
    MissingField {
        /// The discriminant of the message being built.
        kind: &'static str,
        /// The property name of the missing field.
        field: &'static str,
    },

    /// Neither alternative of an either/or requirement was supplied.
    #[error("{kind} message requires {first} or {second}")]
    MissingAlternative {
        /// The discriminant of the message being built.
        kind: &'static str,
        /// The first accepted property name.
        first: &'static str,
        /// The second accepted property name.
        second: &'static str,
    },

    /// A declared field carries a JSON value of the wrong shape.
    #[error("{kind} field {field} must be {expected}")]
    InvalidFieldType {
        /// The discriminant of the message being built.
        kind: &'static str,
        /// The property name of the offending field.
        field: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
    },

    /// The property bag itself is not a JSON object.
    #[error("message properties must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl InvalidMessage {
    /// Creates an unknown-type error for the given family.
    #[must_use]
    pub fn unknown_type(family: Family, discriminant: impl Into<String>) -> Self {
        Self::UnknownType {
            family,
            discriminant: discriminant.into(),
        }
    }

    /// Creates a missing-field error.
    #[must_use]
    pub const fn missing_field(kind: &'static str, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }

    /// Returns the human-readable reason for the rejection.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Returns the single field this error is about, if any.
    ///
    /// Either/or failures name two fields and return `None`; use
    /// [`InvalidMessage::mentions`] for those.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. } | Self::InvalidFieldType { field, .. } => Some(*field),
            Self::UnknownType { .. } | Self::MissingAlternative { .. } | Self::NotAnObject(_) => {
                None
            }
        }
    }

    /// Returns `true` if the error names `field` as a cause.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        match self {
            Self::MissingField { field: named, .. } | Self::InvalidFieldType { field: named, .. } => {
                *named == field
            }
            Self::MissingAlternative { first, second, .. } => *first == field || *second == field,
            Self::UnknownType { .. } | Self::NotAnObject(_) => false,
        }
    }

    /// Returns `true` if the discriminant was not recognised.
    #[must_use]
    pub const fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }
}
