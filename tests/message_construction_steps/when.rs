//! When steps for message construction BDD scenarios.

use super::world::{MessageWorld, construct};
use rstest_bdd_macros::when;

#[when(r#"I create a "{kind}" {family} message"#)]
fn create_message(
    world: &mut MessageWorld,
    kind: String,
    family: String,
) -> Result<(), eyre::Report> {
    world.outcome = Some(construct(&family, &kind, &world.props)?);
    Ok(())
}
