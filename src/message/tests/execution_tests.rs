//! Unit tests for the execution family.

use super::fixtures::{complete_props, without};
use crate::message::{
    domain::{MessageKind, PropertyBag},
    error::InvalidMessage,
    families::execution::{self, ExecutionKind, ExecutionMessage},
    ports::FamilyMessage,
};
use rstest::rstest;
use serde_json::json;

// ============================================================================
// Successful construction
// ============================================================================

#[rstest]
#[case(ExecutionKind::Create)]
#[case(ExecutionKind::Concat)]
#[case(ExecutionKind::Append)]
#[case(ExecutionKind::Delete)]
#[case(ExecutionKind::ConfirmDelete)]
#[case(ExecutionKind::DeleteIndex)]
#[case(ExecutionKind::ConfirmImport)]
#[case(ExecutionKind::Reindex)]
#[case(ExecutionKind::ConfirmReindex)]
#[case(ExecutionKind::ReadFile)]
fn complete_props_construct_every_kind(#[case] kind: ExecutionKind) {
    let message =
        execution::create(kind, &complete_props(kind.as_str())).expect("valid execution");

    assert_eq!(message.kind(), kind);
    assert_eq!(message.type_name(), kind.as_str());
    assert_eq!(message.task_id().map(|id| id.as_str()), Some("task-1"));
}

#[test]
fn confirm_reindex_carries_elastic_task_id() {
    let props = PropertyBag::new()
        .with("taskId", "t1")
        .with("elasticTaskId", "e1");

    let message = execution::create("EXECUTION_CONFIRM_REINDEX", &props).expect("valid");

    let ExecutionMessage::ConfirmReindex(body) = message else {
        panic!("expected EXECUTION_CONFIRM_REINDEX, got {message:?}");
    };
    assert_eq!(body.elastic_task_id(), "e1");
}

#[rstest]
#[case(ExecutionKind::DeleteIndex)]
#[case(ExecutionKind::ConfirmImport)]
fn index_kinds_keep_their_own_variant(#[case] kind: ExecutionKind) {
    let message = execution::create(kind, &complete_props(kind.as_str())).expect("valid");

    match (kind, &message) {
        (ExecutionKind::DeleteIndex, ExecutionMessage::DeleteIndex(body))
        | (ExecutionKind::ConfirmImport, ExecutionMessage::ConfirmImport(body)) => {
            assert_eq!(body.index(), "docs");
        }
        _ => panic!("{kind} built {message:?}"),
    }
}

#[test]
fn import_options_are_carried_when_supplied() {
    let props = complete_props("EXECUTION_CREATE")
        .with("legend", json!({"title": "name"}))
        .with("verified", true)
        .with("dataPath", "records.items");

    let message = execution::create(ExecutionKind::Create, &props).expect("valid");

    let ExecutionMessage::Create(body) = message else {
        panic!("expected EXECUTION_CREATE, got {message:?}");
    };
    assert_eq!(body.options().verified(), Some(true));
    assert_eq!(body.options().data_path(), Some("records.items"));
    assert_eq!(body.options().legend(), Some(&json!({"title": "name"})));
}

#[test]
fn read_file_dataset_id_is_optional() {
    let bare = complete_props("EXECUTION_READ_FILE");
    let with_dataset = bare.clone().with("datasetId", "ds-9");

    let built = [&bare, &with_dataset].map(|props| {
        match execution::create(ExecutionKind::ReadFile, props).expect("valid") {
            ExecutionMessage::ReadFile(body) => body.dataset_id().map(str::to_owned),
            other => panic!("expected EXECUTION_READ_FILE, got {other:?}"),
        }
    });

    assert_eq!(built, [None, Some("ds-9".to_owned())]);
}

#[test]
fn numeric_task_id_is_accepted() {
    let props = complete_props("EXECUTION_REINDEX").with("taskId", 77);

    let message = execution::create(ExecutionKind::Reindex, &props).expect("valid");

    assert_eq!(message.task_id().map(ToString::to_string), Some("77".to_owned()));
}

// ============================================================================
// Rejected input
// ============================================================================

#[rstest]
#[case(ExecutionKind::Create)]
#[case(ExecutionKind::Concat)]
#[case(ExecutionKind::Append)]
#[case(ExecutionKind::Delete)]
#[case(ExecutionKind::ConfirmDelete)]
#[case(ExecutionKind::DeleteIndex)]
#[case(ExecutionKind::ConfirmImport)]
#[case(ExecutionKind::Reindex)]
#[case(ExecutionKind::ConfirmReindex)]
#[case(ExecutionKind::ReadFile)]
fn missing_task_id_is_rejected_before_anything_else(#[case] kind: ExecutionKind) {
    let err = execution::create(kind, &PropertyBag::new()).expect_err("taskId required");

    assert_eq!(err, InvalidMessage::missing_field(kind.as_str(), "taskId"));
}

#[rstest]
#[case(json!(null))]
#[case(json!(""))]
#[case(json!("  "))]
fn blank_task_id_is_rejected(#[case] task_id: serde_json::Value) {
    let props = complete_props("EXECUTION_DELETE_INDEX").with("taskId", task_id);

    let err = execution::create(ExecutionKind::DeleteIndex, &props).expect_err("blank taskId");

    assert_eq!(err.field(), Some("taskId"));
}

#[rstest]
#[case(ExecutionKind::Create)]
#[case(ExecutionKind::Concat)]
#[case(ExecutionKind::Append)]
#[case(ExecutionKind::Delete)]
#[case(ExecutionKind::ConfirmDelete)]
#[case(ExecutionKind::DeleteIndex)]
#[case(ExecutionKind::ConfirmImport)]
#[case(ExecutionKind::Reindex)]
#[case(ExecutionKind::ConfirmReindex)]
#[case(ExecutionKind::ReadFile)]
fn removing_any_required_field_is_rejected(#[case] kind: ExecutionKind) {
    for requirement in kind.requirements() {
        let props = requirement
            .fields()
            .into_iter()
            .fold(complete_props(kind.as_str()), without);

        let err = execution::create(kind, &props).expect_err("incomplete execution must fail");

        for field in requirement.fields() {
            assert!(err.mentions(field), "{err} should mention {field}");
        }
    }
}

#[test]
fn reindex_reports_source_before_target() {
    let props = PropertyBag::new().with("taskId", "t1");

    let err = execution::create(ExecutionKind::Reindex, &props).expect_err("indices required");

    assert_eq!(err.field(), Some("sourceIndex"));
}

#[test]
fn verified_flag_must_be_boolean() {
    let props = complete_props("EXECUTION_CREATE").with("verified", "yes");

    let err = execution::create(ExecutionKind::Create, &props).expect_err("flag must be bool");

    assert_eq!(
        err,
        InvalidMessage::InvalidFieldType {
            kind: "EXECUTION_CREATE",
            field: "verified",
            expected: "a boolean",
        }
    );
}

#[test]
fn blank_verified_flag_is_left_unset() {
    let props = complete_props("EXECUTION_APPEND").with("verified", "");

    let message = execution::create(ExecutionKind::Append, &props).expect("valid");

    let ExecutionMessage::Append(body) = message else {
        panic!("expected EXECUTION_APPEND, got {message:?}");
    };
    assert_eq!(body.options().verified(), None);
}

#[test]
fn numeric_provider_passes_but_object_provider_fails() {
    let numeric = complete_props("EXECUTION_READ_FILE").with("provider", 3);
    let object = complete_props("EXECUTION_READ_FILE").with("provider", json!({"kind": "csv"}));

    assert!(execution::create(ExecutionKind::ReadFile, &numeric).is_ok());
    let err = execution::create(ExecutionKind::ReadFile, &object).expect_err("object provider");
    assert_eq!(err.field(), Some("provider"));
}

#[test]
fn task_discriminant_is_unknown_to_execution_family() {
    let err = execution::create("TASK_CREATE", &complete_props("EXECUTION_CREATE"))
        .expect_err("wrong family");

    assert!(err.is_unknown_type());
    assert_eq!(
        err.to_string(),
        "invalid type 'TASK_CREATE' for execution message"
    );
}

// ============================================================================
// Kind catalogue and serialisation
// ============================================================================

#[test]
fn kind_catalogue_round_trips_through_text() {
    assert_eq!(ExecutionKind::ALL.len(), 10);
    for kind in ExecutionKind::ALL {
        assert_eq!(ExecutionKind::try_from(kind.as_str()), Ok(*kind));
    }
}

#[test]
fn serialised_reindex_uses_wire_field_names() {
    let message = execution::create(
        ExecutionKind::Reindex,
        &complete_props("EXECUTION_REINDEX"),
    )
    .expect("valid");

    let value = serde_json::to_value(&message).expect("serialise");

    assert_eq!(value["type"], "EXECUTION_REINDEX");
    assert_eq!(value["taskId"], "task-1");
    assert_eq!(value["sourceIndex"], "docs-v1");
    assert_eq!(value["targetIndex"], "docs-v2");
}
