//! Then steps for message construction BDD scenarios.

use super::world::{Constructed, MessageWorld};
use ingest_messages::InvalidMessage;
use rstest_bdd_macros::then;

fn constructed(world: &MessageWorld) -> Result<&Constructed, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Ok(message)) => Ok(message),
        Some(Err(err)) => Err(eyre::eyre!("expected a message, construction failed: {err}")),
        None => Err(eyre::eyre!("no construction attempt in scenario world")),
    }
}

fn rejection(world: &MessageWorld) -> Result<&InvalidMessage, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(message)) => Err(eyre::eyre!(
            "expected a rejection, built {}",
            message.type_name
        )),
        None => Err(eyre::eyre!("no construction attempt in scenario world")),
    }
}

#[then(r#"construction succeeds with type "{kind}""#)]
fn construction_succeeds(world: &MessageWorld, kind: String) -> Result<(), eyre::Report> {
    let message = constructed(world)?;
    if message.type_name != kind {
        return Err(eyre::eyre!("expected {kind}, built {}", message.type_name));
    }
    if message.wire["type"] != kind.as_str() {
        return Err(eyre::eyre!("wire type mismatch: {}", message.wire["type"]));
    }
    Ok(())
}

#[then(r#"the message carries taskId "{task_id}""#)]
fn message_carries_task_id(world: &MessageWorld, task_id: String) -> Result<(), eyre::Report> {
    let message = constructed(world)?;
    if message.task_id.as_deref() != Some(task_id.as_str()) {
        return Err(eyre::eyre!(
            "expected taskId {task_id}, found {:?}",
            message.task_id
        ));
    }
    Ok(())
}

#[then(r#"construction fails mentioning "{field}""#)]
fn construction_fails_mentioning(world: &MessageWorld, field: String) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    if !err.mentions(&field) {
        return Err(eyre::eyre!("expected rejection to mention {field}, got: {err}"));
    }
    Ok(())
}

#[then("construction fails with an unknown type")]
fn construction_fails_unknown_type(world: &MessageWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    if !err.is_unknown_type() {
        return Err(eyre::eyre!("expected unknown type rejection, got: {err}"));
    }
    Ok(())
}
