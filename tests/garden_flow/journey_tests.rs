//! A task from commitment through completion.

use crate::garden_flow::helpers::{Flow, flow, verdict};
use gardenkeep::garden::domain::PlantType;
use gardenkeep::ledger::domain::{EffortWeight, PlausibilityLevel, TaskStatus};
use gardenkeep::lifecycle::services::LifecycleError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_journey_grows_one_plant(flow: Flow) {
    flow.service
        .complete_onboarding(flow.owner)
        .await
        .expect("onboarding should succeed");
    let task = flow.commit_to("Fix the gutter", EffortWeight::Heavy).await;
    let step = task
        .subtasks()
        .first()
        .map(|subtask| subtask.id())
        .expect("task has a step");

    flow.service
        .start(flow.owner, task.id())
        .await
        .expect("start should succeed");
    let ticked = flow
        .service
        .toggle_subtask(flow.owner, step)
        .await
        .expect("toggle should succeed");
    flow.questions
        .push(Ok("Does water run off the roof now?".to_owned()));
    let question = flow
        .service
        .initiate_completion(flow.owner, task.id())
        .await
        .expect("initiation should succeed");
    flow.evaluator.push(Ok(verdict(PlausibilityLevel::High)));
    let summary = flow
        .service
        .complete(flow.owner, task.id(), "It rained and the downpipe carried it")
        .await
        .expect("completion should succeed");

    assert!(ticked.is_completed());
    assert_eq!(question, "Does water run off the roof now?");
    assert_eq!(summary.task.status(), TaskStatus::Completed);
    assert_eq!(
        summary.task.reflection_question(),
        Some("Does water run off the roof now?")
    );
    assert!(PlantType::pool_for(EffortWeight::Heavy).contains(&summary.plant.plant_type()));

    let gardener = flow
        .service
        .gardener(flow.owner)
        .await
        .expect("gardener should load");
    assert!(gardener.onboarding_completed());
    assert_eq!(gardener.total_tasks_completed(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_tasks_can_be_completed_directly(flow: Flow) {
    let task = flow.commit_to("Call the dentist", EffortWeight::Light).await;
    flow.evaluator.push(Ok(verdict(PlausibilityLevel::Medium)));

    let summary = flow
        .service
        .complete(flow.owner, task.id(), "Booked for Tuesday")
        .await
        .expect("completion should succeed");

    assert_eq!(summary.task.status(), TaskStatus::Completed);
    assert!(PlantType::pool_for(EffortWeight::Light).contains(&summary.plant.plant_type()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn another_users_garden_is_unaffected(flow: Flow) {
    let neighbour = gardenkeep::ledger::domain::UserId::new();
    flow.finish("Water the plants", PlausibilityLevel::Low).await;

    let garden = flow
        .service
        .garden(neighbour)
        .await
        .expect("garden should load");
    let task = flow.commit_to("Walk the dog", EffortWeight::Light).await;
    let foreign = flow.service.complete(neighbour, task.id(), "Walked").await;

    assert!(garden.plants.is_empty());
    assert_eq!(garden.gardener.garden_health().value(), 100);
    assert!(matches!(foreign, Err(LifecycleError::NotFound(_))));
}
