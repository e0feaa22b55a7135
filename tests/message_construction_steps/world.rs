//! Shared world state for message construction BDD scenarios.

use ingest_messages::{FamilyMessage, InvalidMessage, PropertyBag, data, execution, status, task};
use rstest::fixture;
use serde_json::Value;

/// Outcome of a construction attempt, reduced to what the steps assert on.
pub struct Constructed {
    /// Discriminant of the built message.
    pub type_name: &'static str,
    /// Correlation id, if the family carries one.
    pub task_id: Option<String>,
    /// The message as it would be transmitted.
    pub wire: Value,
}

/// Scenario world for message construction behaviour tests.
#[derive(Default)]
pub struct MessageWorld {
    /// Properties accumulated by the given steps.
    pub props: PropertyBag,
    /// Result of the last construction attempt.
    pub outcome: Option<Result<Constructed, InvalidMessage>>,
}

#[fixture]
pub fn world() -> MessageWorld {
    MessageWorld::default()
}

fn capture<M: FamilyMessage + serde::Serialize>(message: &M) -> eyre::Result<Constructed> {
    Ok(Constructed {
        type_name: message.type_name(),
        task_id: message.task_id().map(ToString::to_string),
        wire: serde_json::to_value(message)?,
    })
}

/// Builds a message through the named family's entry point.
///
/// # Errors
///
/// Returns an error for an unrecognised family name or if serialisation
/// fails; construction failures are captured in the outcome instead.
pub fn construct(
    family: &str,
    kind: &str,
    props: &PropertyBag,
) -> eyre::Result<Result<Constructed, InvalidMessage>> {
    let outcome = match family {
        "task" => task::create(kind, props).map(|message| capture(&message)),
        "execution" => execution::create(kind, props).map(|message| capture(&message)),
        "status" => status::create(kind, props).map(|message| capture(&message)),
        "data" => data::create(kind, props).map(|message| capture(&message)),
        other => return Err(eyre::eyre!("unknown family '{other}' in scenario")),
    };
    match outcome {
        Ok(captured) => Ok(Ok(captured?)),
        Err(error) => Ok(Err(error)),
    }
}
