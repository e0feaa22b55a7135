//! Unit tests for `InvalidMessage` rendering and inspection.

use crate::message::{domain::Family, error::InvalidMessage};
use rstest::rstest;

#[rstest]
#[case(
    InvalidMessage::unknown_type(Family::Status, "STATUS_NOPE"),
    "invalid type 'STATUS_NOPE' for status message"
)]
#[case(
    InvalidMessage::missing_field("EXECUTION_REINDEX", "sourceIndex"),
    "EXECUTION_REINDEX message requires a non-empty sourceIndex"
)]
#[case(
    InvalidMessage::MissingAlternative { kind: "TASK_CREATE", first: "fileUrl", second: "data" },
    "TASK_CREATE message requires fileUrl or data"
)]
#[case(
    InvalidMessage::InvalidFieldType { kind: "STATUS_WRITTEN_DATA", field: "withErrors", expected: "a boolean" },
    "STATUS_WRITTEN_DATA field withErrors must be a boolean"
)]
#[case(
    InvalidMessage::NotAnObject("an array"),
    "message properties must be a JSON object, got an array"
)]
fn errors_render_a_readable_reason(#[case] err: InvalidMessage, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
    assert_eq!(err.reason(), expected);
}

#[test]
fn either_or_failure_mentions_both_fields_but_names_neither() {
    let err = InvalidMessage::MissingAlternative {
        kind: "EXECUTION_READ_FILE",
        first: "fileUrl",
        second: "data",
    };

    assert!(err.mentions("fileUrl"));
    assert!(err.mentions("data"));
    assert!(!err.mentions("index"));
    assert_eq!(err.field(), None);
}

#[test]
fn unknown_type_mentions_no_field() {
    let err = InvalidMessage::unknown_type(Family::Data, "DATUM");

    assert!(err.is_unknown_type());
    assert!(!err.mentions("DATUM"));
    assert_eq!(err.field(), None);
}

#[test]
fn errors_are_comparable_values() {
    let err = InvalidMessage::missing_field("DATA", "file");

    assert_eq!(err.clone(), InvalidMessage::missing_field("DATA", "file"));
    assert_ne!(err, InvalidMessage::missing_field("DATA", "index"));
}
