//! Given steps for message construction BDD scenarios.

use super::world::MessageWorld;
use eyre::WrapErr;
use ingest_messages::PropertyBag;
use rstest_bdd_macros::given;

#[given("an empty property bag")]
fn empty_property_bag(world: &mut MessageWorld) {
    world.props = PropertyBag::new();
    world.outcome = None;
}

#[given(r#"a property bag with taskId "{task_id}""#)]
fn property_bag_with_task_id(world: &mut MessageWorld, task_id: String) {
    world.props = PropertyBag::new().with("taskId", task_id);
    world.outcome = None;
}

#[given(r#"the property "{field}" is "{value}""#)]
fn property_is_text(world: &mut MessageWorld, field: String, value: String) {
    world.props.insert(field, value);
}

#[given(r#"the property "{field}" holds {json}"#)]
fn property_holds_json(
    world: &mut MessageWorld,
    field: String,
    json: String,
) -> Result<(), eyre::Report> {
    let value: serde_json::Value =
        serde_json::from_str(&json).wrap_err_with(|| format!("parse JSON for {field}"))?;
    world.props.insert(field, value);
    Ok(())
}
