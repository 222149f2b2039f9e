//! When steps for session validation BDD scenarios.

use super::world::SessionWorld;
use rstest_bdd_macros::when;

#[when("the session is validated")]
fn validate(world: &mut SessionWorld) {
    world.report = Some(world.validator.validate(&world.messages));
}
