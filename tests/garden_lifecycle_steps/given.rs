//! Given steps for garden lifecycle BDD scenarios.

use super::world::{GardenWorld, run_async};
use eyre::WrapErr;
use gardenkeep::garden::{
    domain::{GridPosition, GrowthStage, Health, NewPlant, Plant, PlantType},
    ports::GardenRepository,
};
use gardenkeep::ledger::domain::{
    EffortWeight, PlausibilityLevel, PlausibilityScore, PlausibilityVerdict,
};
use gardenkeep::lifecycle::{ports::CollaboratorError, services::CreateTaskRequest};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given("a gardener whose garden health is {health:u8}")]
fn gardener_with_health(world: &mut GardenWorld, health: u8) -> Result<(), eyre::Report> {
    let mut gardener = run_async(world.service.gardener(world.owner))
        .wrap_err("create gardener for scenario")?;
    gardener.set_garden_health(Health::saturating(health), &DefaultClock);
    run_async(world.store.update_gardener(&gardener)).wrap_err("set starting garden health")?;
    Ok(())
}

#[given("existing plants with health {first:u8}, {second:u8} and {third:u8}")]
fn existing_plants(
    world: &mut GardenWorld,
    first: u8,
    second: u8,
    third: u8,
) -> Result<(), eyre::Report> {
    for (health, position) in [first, second, third]
        .into_iter()
        .zip(GridPosition::scan_order())
    {
        let plant = Plant::new(
            NewPlant {
                owner: world.owner,
                task_id: None,
                plant_type: PlantType::Sunflower,
                growth_stage: GrowthStage::saturating(3),
                health: Health::saturating(health),
                position,
            },
            &DefaultClock,
        );
        world.seeded_plants.push(plant.id());
        world.store.seed_plant(plant).wrap_err("seed existing plant")?;
    }
    Ok(())
}

#[given(r#"a {effort} task "{title}" promising "{contract}""#)]
fn task_with_contract(
    world: &mut GardenWorld,
    effort: String,
    title: String,
    contract: String,
) -> Result<(), eyre::Report> {
    let weight = EffortWeight::try_from(effort.as_str())
        .map_err(|err| eyre::eyre!("invalid effort in scenario: {err}"))?;
    let request = CreateTaskRequest::new(world.owner, title, contract, weight)
        .with_subtask("Get it done", weight);
    let created = run_async(world.service.create_task(request)).wrap_err("create scenario task")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"the evaluator rates the next reflection "{level}" with score {score:u32}"#)]
fn evaluator_rates(world: &mut GardenWorld, level: String, score: u32) -> Result<(), eyre::Report> {
    let parsed = PlausibilityLevel::try_from(level.as_str())
        .map_err(|err| eyre::eyre!("invalid level in scenario: {err}"))?;
    let checked = PlausibilityScore::new(score).wrap_err("scenario score out of range")?;
    world
        .evaluator
        .push(Ok(PlausibilityVerdict::new(checked, parsed, "scenario verdict")));
    Ok(())
}

#[given("the evaluator is unavailable")]
fn evaluator_unavailable(world: &mut GardenWorld) {
    world.evaluator.push(Err(CollaboratorError::unavailable(
        std::io::Error::other("connection refused"),
    )));
}
