//! When steps for execution driver BDD scenarios.

use super::world::DriverWorld;
use rstest_bdd_macros::when;

#[when(r#"the CLI runs "{args}""#)]
fn the_cli_runs(world: &mut DriverWorld, args: String) {
    world.run(&args);
}
