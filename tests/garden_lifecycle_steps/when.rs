//! When steps for garden lifecycle BDD scenarios.

use super::world::{GardenWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the task is completed with reflection "{reflection}""#)]
fn complete_task(world: &mut GardenWorld, reflection: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.complete(world.owner, task_id, &reflection));
    if let Some(summary) = world.record(result) {
        world.task = Some(summary.task.clone());
        world.last_completion = Some(summary);
    }
    Ok(())
}

#[when("the task is abandoned")]
fn abandon_task(world: &mut GardenWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.abandon(world.owner, task_id));
    if let Some(summary) = world.record(result) {
        world.task = Some(summary.task);
    }
    Ok(())
}

#[when("the task is started")]
fn start_task(world: &mut GardenWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.start(world.owner, task_id));
    if let Some(started) = world.record(result) {
        world.task = Some(started);
    }
    Ok(())
}

#[when("a second start is attempted")]
fn start_task_again(world: &mut GardenWorld) -> Result<(), eyre::Report> {
    start_task(world)
}
