//! Then steps for garden lifecycle BDD scenarios.

use super::world::{GardenWorld, run_async};
use eyre::WrapErr;
use gardenkeep::garden::domain::PlantType;
use gardenkeep::ledger::domain::{EffortWeight, TaskStatus};
use gardenkeep::lifecycle::services::{CompletionSummary, LifecycleError};
use rstest_bdd_macros::then;

fn completion(world: &GardenWorld) -> Result<&CompletionSummary, eyre::Report> {
    world
        .last_completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion summary"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &GardenWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task()?.id();
    let stored = run_async(world.service.get_task(world.owner, task_id))
        .wrap_err("reload scenario task")?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the garden health is {health:u8}")]
fn garden_health_is(world: &GardenWorld, health: u8) -> Result<(), eyre::Report> {
    let garden = run_async(world.service.garden(world.owner)).wrap_err("load garden")?;
    let actual = garden.gardener.garden_health().value();
    if actual != health {
        return Err(eyre::eyre!("expected garden health {health}, found {actual}"));
    }
    Ok(())
}

#[then("the garden has {count:usize} plants")]
fn garden_has_plants(world: &GardenWorld, count: usize) -> Result<(), eyre::Report> {
    let garden = run_async(world.service.garden(world.owner)).wrap_err("load garden")?;
    if garden.plants.len() != count {
        return Err(eyre::eyre!(
            "expected {count} plants, found {}",
            garden.plants.len()
        ));
    }
    Ok(())
}

#[then("the new plant is at stage {stage:u8} with health {health:u8}")]
fn new_plant_profile(world: &GardenWorld, stage: u8, health: u8) -> Result<(), eyre::Report> {
    let plant = &completion(world)?.plant;
    let actual = (plant.growth_stage().value(), plant.health().value());
    if actual != (stage, health) {
        return Err(eyre::eyre!(
            "expected stage {stage} and health {health}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the new plant comes from the "{effort}" pool"#)]
fn new_plant_pool(world: &GardenWorld, effort: String) -> Result<(), eyre::Report> {
    let weight = EffortWeight::try_from(effort.as_str())
        .map_err(|err| eyre::eyre!("invalid effort in scenario: {err}"))?;
    let species: PlantType = completion(world)?.plant.plant_type();
    if !PlantType::pool_for(weight).contains(&species) {
        return Err(eyre::eyre!("{species} is not in the {weight} pool"));
    }
    Ok(())
}

#[then("the existing plants have health {first:u8}, {second:u8} and {third:u8}")]
fn existing_plant_health(
    world: &GardenWorld,
    first: u8,
    second: u8,
    third: u8,
) -> Result<(), eyre::Report> {
    let garden = run_async(world.service.garden(world.owner)).wrap_err("load garden")?;
    let actual: Vec<Option<u8>> = world
        .seeded_plants
        .iter()
        .map(|id| {
            garden
                .plants
                .iter()
                .find(|plant| plant.id() == *id)
                .map(|plant| plant.health().value())
        })
        .collect();
    let expected = vec![Some(first), Some(second), Some(third)];
    if actual != expected {
        return Err(eyre::eyre!("expected plant health {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the last operation fails with an invalid transition")]
fn fails_with_invalid_transition(world: &GardenWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(LifecycleError::InvalidTransition { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected InvalidTransition error, got {other:?}")),
    }
}

#[then("the last operation fails with an evaluation error")]
fn fails_with_evaluation_error(world: &GardenWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(LifecycleError::EvaluationFailed(_)) => Ok(()),
        other => Err(eyre::eyre!("expected EvaluationFailed error, got {other:?}")),
    }
}
