//! Behaviour tests for message construction across the four families.

mod message_construction_steps;

use message_construction_steps::world::{MessageWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Complete task creation is accepted"
)]
fn complete_task_creation(world: MessageWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Empty delete request names the query"
)]
fn empty_delete_request(world: MessageWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Reindex confirmation requires the backend task id"
)]
fn confirm_reindex_requires_elastic_task(world: MessageWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Reindex confirmation with the backend task id is accepted"
)]
fn confirm_reindex_accepted(world: MessageWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Written data status is accepted"
)]
fn written_data_status(world: MessageWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Data chunk without a destination is rejected"
)]
fn data_chunk_without_destination(world: MessageWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_construction.feature",
    name = "Retired discriminant is rejected"
)]
fn retired_discriminant(world: MessageWorld) {
    let _ = world;
}
