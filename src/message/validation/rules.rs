//! The validation chain shared by every message kind.
//!
//! Base validation builds the envelope; requirement validation then walks the
//! kind's declared rules in order, checking presence and shape together. Both
//! stop at the first failure.

use super::FieldReader;
use crate::message::{
    domain::{Envelope, MessageKind, Requirement, TaskId},
    error::InvalidMessage,
};

/// Runs the base checks and builds the envelope for `kind`.
///
/// # Errors
///
/// Returns [`InvalidMessage::MissingField`] naming `taskId` when the family
/// requires correlation and none was supplied.
pub fn validate_envelope<K: MessageKind>(
    kind: K,
    fields: &FieldReader<'_>,
) -> Result<Envelope<K>, InvalidMessage> {
    if !K::FAMILY.requires_task_id() {
        return Ok(Envelope::new(kind, None));
    }

    let raw = fields.string("taskId")?;
    let task_id =
        TaskId::new(raw).ok_or(InvalidMessage::missing_field(kind.as_str(), "taskId"))?;
    Ok(Envelope::new(kind, Some(task_id)))
}

/// Checks each declared requirement in order.
///
/// # Errors
///
/// Returns the error for the first requirement that is not met.
pub fn validate_requirements(
    fields: &FieldReader<'_>,
    requirements: &[Requirement],
) -> Result<(), InvalidMessage> {
    requirements
        .iter()
        .try_for_each(|requirement| validate_requirement(fields, *requirement))
}

/// Checks a single requirement.
///
/// # Errors
///
/// Returns [`InvalidMessage::MissingField`] or
/// [`InvalidMessage::MissingAlternative`] when the rule is not met, or
/// [`InvalidMessage::InvalidFieldType`] when a text field has another shape.
pub fn validate_requirement(
    fields: &FieldReader<'_>,
    requirement: Requirement,
) -> Result<(), InvalidMessage> {
    match requirement {
        Requirement::Text(field) => fields.string(field).map(drop),
        Requirement::Value(field) if !fields.has(field) => {
            Err(InvalidMessage::missing_field(fields.kind(), field))
        }
        Requirement::Value(_) => Ok(()),
        Requirement::OneOf(first, second) => {
            if fields.optional_string(first)?.is_some() || fields.has(second) {
                Ok(())
            } else {
                Err(InvalidMessage::MissingAlternative {
                    kind: fields.kind(),
                    first,
                    second,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::domain::PropertyBag;
    use mockable::DefaultClock;
    use rstest::rstest;
    use serde_json::json;

    const RULES: &[Requirement] = &[
        Requirement::Text("index"),
        Requirement::Value("query"),
        Requirement::OneOf("fileUrl", "data"),
    ];

    fn check(props: &PropertyBag) -> Result<(), InvalidMessage> {
        let clock = DefaultClock;
        let fields = FieldReader::new("TEST_KIND", props, &clock);
        validate_requirements(&fields, RULES)
    }

    #[rstest]
    #[case(json!({"index": "i", "query": {}, "fileUrl": "u"}))]
    #[case(json!({"index": 7, "query": "*", "data": [1]}))]
    #[case(json!({"index": "i", "query": {"match": 1}, "fileUrl": "u", "data": [1]}))]
    fn requirements_accept_either_alternative(#[case] input: serde_json::Value) {
        let props = PropertyBag::from_value(input).expect("object");
        assert!(check(&props).is_ok());
    }

    #[test]
    fn requirements_report_first_failure_in_declaration_order() {
        let err = check(&PropertyBag::new()).expect_err("empty bag must fail");
        assert_eq!(err, InvalidMessage::missing_field("TEST_KIND", "index"));
    }

    #[rstest]
    #[case(json!({"index": "i", "query": "*"}))]
    #[case(json!({"index": "i", "query": "*", "fileUrl": "", "data": []}))]
    #[case(json!({"index": "i", "query": "*", "fileUrl": null, "data": {}}))]
    fn requirements_reject_when_both_alternatives_are_empty(#[case] input: serde_json::Value) {
        let props = PropertyBag::from_value(input).expect("object");
        let err = check(&props).expect_err("missing source must fail");
        assert!(matches!(
            err,
            InvalidMessage::MissingAlternative {
                first: "fileUrl",
                second: "data",
                ..
            }
        ));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("   "))]
    #[case(json!([]))]
    #[case(json!({}))]
    fn blank_values_count_as_missing(#[case] blank: serde_json::Value) {
        let props = PropertyBag::new()
            .with("index", blank)
            .with("query", "*")
            .with("data", "x");
        let err = check(&props).expect_err("blank index must fail");
        assert!(err.mentions("index"));
    }

    #[test]
    fn wrong_shape_is_reported_before_a_later_missing_field() {
        let props = PropertyBag::new().with("index", json!({"nested": 1}));

        let err = check(&props).expect_err("object index must fail");

        assert_eq!(
            err,
            InvalidMessage::InvalidFieldType {
                kind: "TEST_KIND",
                field: "index",
                expected: "a string",
            }
        );
    }

    #[test]
    fn opaque_fields_accept_any_shape() {
        let props = PropertyBag::new()
            .with("index", "i")
            .with("query", json!({"bool": {"must": []}}))
            .with("data", json!({"rows": [1, 2]}));

        assert!(check(&props).is_ok());
    }

    #[test]
    fn malformed_first_alternative_is_rejected_even_when_second_is_present() {
        let props = PropertyBag::new()
            .with("index", "i")
            .with("query", "*")
            .with("fileUrl", json!(["not", "a", "url"]))
            .with("data", "x");

        let err = check(&props).expect_err("array fileUrl must fail");

        assert_eq!(err.field(), Some("fileUrl"));
    }
}
