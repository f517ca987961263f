//! Orchestration tests for task events and their garden effects.

use std::sync::Arc;
use std::time::Duration;

use super::support::{Harness, ScriptedService, cell, task_request, verdict};
use crate::config::{DEFAULT_FALLBACK_QUESTION, LifecycleConfig};
use crate::garden::{
    adapters::ScriptedRandomSource,
    domain::{Health, PlantType},
    ports::GardenRepository,
};
use crate::ledger::domain::{
    EffortWeight, PlausibilityLevel, PlausibilityVerdict, TaskAction, TaskDomainError, TaskId,
    TaskStatus, UserId,
};
use crate::lifecycle::{
    adapters::memory::{InMemoryGardenStore, ScriptedQuestionGenerator},
    ports::{CollaboratorError, CollaboratorResult, EvaluationRequest, PlausibilityEvaluator},
    services::{GardenLifecycleService, LifecycleError, MissingEntity},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

mockall::mock! {
    pub Evaluator {}

    #[async_trait::async_trait]
    impl PlausibilityEvaluator for Evaluator {
        async fn evaluate(
            &self,
            request: &EvaluationRequest,
        ) -> CollaboratorResult<PlausibilityVerdict>;
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn mocked_service(
    store: Arc<InMemoryGardenStore>,
    evaluator: MockEvaluator,
) -> ScriptedService<InMemoryGardenStore, MockEvaluator> {
    GardenLifecycleService::new(
        store,
        Arc::new(evaluator),
        Arc::new(ScriptedQuestionGenerator::new()),
        Arc::new(ScriptedRandomSource::default()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_pending_with_ordered_steps(harness: Harness) {
    let created = harness.create_task(EffortWeight::Medium).await;
    let fetched = harness
        .service
        .get_task(harness.owner, created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, created);
    assert_eq!(fetched.status(), TaskStatus::Pending);
    assert_eq!(
        fetched.subtask_titles(),
        vec!["Collect merged changes", "Publish the page"]
    );
    let gardener = harness
        .service
        .gardener(harness.owner)
        .await
        .expect("gardener should exist after the first task");
    assert_eq!(gardener.garden_health(), Health::MAX);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_a_task_without_steps(harness: Harness) {
    let request = crate::lifecycle::services::CreateTaskRequest::new(
        harness.owner,
        "Plan the offsite",
        "A booked venue",
        EffortWeight::Heavy,
    );

    let result = harness.service.create_task(request).await;

    assert!(matches!(
        result,
        Err(LifecycleError::ValidationFailed(
            TaskDomainError::SubtaskCount { actual: 0, .. }
        ))
    ));
    let listed = harness
        .service
        .list_tasks(harness.owner)
        .await
        .expect("listing should succeed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_only_the_callers_tasks_newest_first(harness: Harness) {
    let first = harness.create_task(EffortWeight::Light).await;
    let second = harness.create_task(EffortWeight::Heavy).await;
    harness
        .service
        .create_task(task_request(UserId::new(), EffortWeight::Light))
        .await
        .expect("another user's task should be created");

    let listed = harness
        .service
        .list_tasks(harness.owner)
        .await
        .expect("listing should succeed");

    let ids: Vec<_> = listed.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_of_other_users_are_reported_missing(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    let stranger = UserId::new();
    let step = task.subtasks().first().map(|subtask| subtask.id()).expect("task has steps");

    let lookup = harness.service.get_task(stranger, task.id()).await;
    let toggle = harness.service.toggle_subtask(stranger, step).await;
    let abandon = harness.service.abandon(stranger, task.id()).await;

    assert!(matches!(lookup, Err(LifecycleError::NotFound(MissingEntity::Task(id))) if id == task.id()));
    assert!(matches!(toggle, Err(LifecycleError::NotFound(MissingEntity::Subtask(id))) if id == step));
    assert!(matches!(abandon, Err(LifecycleError::NotFound(MissingEntity::Task(_)))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_terminal_events_create_no_garden(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    let stranger = UserId::new();

    let completion = harness
        .service
        .complete(stranger, task.id(), "Notes are published")
        .await;
    let abandonment = harness.service.abandon(stranger, TaskId::new()).await;

    assert!(matches!(completion, Err(LifecycleError::NotFound(MissingEntity::Task(_)))));
    assert!(matches!(abandonment, Err(LifecycleError::NotFound(MissingEntity::Task(_)))));
    let stranger_garden = harness
        .store
        .find_gardener(stranger)
        .await
        .expect("lookup should succeed");
    assert!(stranger_garden.is_none());
    assert!(harness.evaluator.requests().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_is_only_permitted_once(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;

    let started = harness
        .service
        .start(harness.owner, task.id())
        .await
        .expect("first start should succeed");
    let again = harness.service.start(harness.owner, task.id()).await;

    assert_eq!(started.status(), TaskStatus::InProgress);
    assert!(matches!(
        again,
        Err(LifecycleError::InvalidTransition {
            from: TaskStatus::InProgress,
            action: TaskAction::Start,
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_a_step_is_persisted(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    let step = task.subtasks().first().map(|subtask| subtask.id()).expect("task has steps");

    let ticked = harness
        .service
        .toggle_subtask(harness.owner, step)
        .await
        .expect("toggle should succeed");
    let stored = harness
        .service
        .get_task(harness.owner, task.id())
        .await
        .expect("lookup should succeed");

    assert!(ticked.is_completed());
    assert!(stored.subtasks().first().is_some_and(|subtask| subtask.is_completed()));
    assert_eq!(stored.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_a_step_of_an_abandoned_task_is_rejected(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    let step = task.subtasks().first().map(|subtask| subtask.id()).expect("task has steps");
    harness
        .service
        .abandon(harness.owner, task.id())
        .await
        .expect("abandon should succeed");

    let result = harness.service.toggle_subtask(harness.owner, step).await;

    assert!(matches!(
        result,
        Err(LifecycleError::InvalidTransition {
            from: TaskStatus::Abandoned,
            action: TaskAction::ToggleSubtask,
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn onboarding_completes_once(harness: Harness) {
    let first = harness
        .service
        .complete_onboarding(harness.owner)
        .await
        .expect("onboarding should succeed");
    let second = harness
        .service
        .complete_onboarding(harness.owner)
        .await
        .expect("repeated onboarding should succeed");

    assert!(first.onboarding_completed());
    assert_eq!(second.version(), first.version());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reflection_question_is_generated_once_and_reused(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    harness
        .questions
        .push(Ok("  Where can I read the notes?  ".to_owned()));

    let first = harness
        .service
        .initiate_completion(harness.owner, task.id())
        .await
        .expect("initiation should succeed");
    let second = harness
        .service
        .initiate_completion(harness.owner, task.id())
        .await
        .expect("repeated initiation should succeed");

    assert_eq!(first, "Where can I read the notes?");
    assert_eq!(second, first);
    assert_eq!(harness.questions.requests().len(), 1);
    let stored = harness
        .service
        .get_task(harness.owner, task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.reflection_question(), Some(first.as_str()));
    assert_eq!(stored.status(), TaskStatus::Pending);
}

#[rstest]
#[case::failure(Err(CollaboratorError::InvalidResponse("empty body".to_owned())))]
#[case::blank(Ok("   ".to_owned()))]
#[tokio::test(flavor = "multi_thread")]
async fn question_generation_failures_fall_back(
    harness: Harness,
    #[case] answer: CollaboratorResult<String>,
) {
    let task = harness.create_task(EffortWeight::Light).await;
    harness.questions.push(answer);

    let question = harness
        .service
        .initiate_completion(harness.owner, task.id())
        .await
        .expect("initiation should fall back instead of failing");

    assert_eq!(question, DEFAULT_FALLBACK_QUESTION);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_question_survives_a_terminal_transition(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    let fresh = harness.create_task(EffortWeight::Light).await;
    harness.questions.push(Ok("What did you publish?".to_owned()));
    harness
        .service
        .initiate_completion(harness.owner, task.id())
        .await
        .expect("initiation should succeed");
    for abandoned in [task.id(), fresh.id()] {
        harness
            .service
            .abandon(harness.owner, abandoned)
            .await
            .expect("abandon should succeed");
    }

    let stored = harness
        .service
        .initiate_completion(harness.owner, task.id())
        .await
        .expect("stored question should be returned");
    let missing = harness
        .service
        .initiate_completion(harness.owner, fresh.id())
        .await;

    assert_eq!(stored, "What did you publish?");
    assert!(matches!(
        missing,
        Err(LifecycleError::InvalidTransition {
            action: TaskAction::InitiateCompletion,
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn high_completion_grows_a_flourishing_plant(harness: Harness) {
    harness.set_garden_health(80).await;
    let task = harness.create_task(EffortWeight::Light).await;
    harness
        .service
        .start(harness.owner, task.id())
        .await
        .expect("start should succeed");
    harness.random.push([1]);
    harness.evaluator.push(Ok(verdict(PlausibilityLevel::High, 88)));

    let summary = harness
        .service
        .complete(harness.owner, task.id(), "  Published at /notes/v2  ")
        .await
        .expect("completion should succeed");

    assert_eq!(summary.task.status(), TaskStatus::Completed);
    assert_eq!(summary.task.reflection_response(), Some("Published at /notes/v2"));
    assert_eq!(summary.plant.plant_type(), PlantType::Tulip);
    assert_eq!(summary.plant.growth_stage().value(), 5);
    assert_eq!(summary.plant.health(), Health::MAX);
    assert_eq!(summary.plant.position(), cell(0, 0));
    assert_eq!(summary.plant.task_id(), Some(task.id()));
    assert_eq!(summary.garden_health.value(), 85);
    assert!(summary.decayed_plants.is_empty());

    let garden = harness
        .service
        .garden(harness.owner)
        .await
        .expect("garden should load");
    assert_eq!(garden.gardener.garden_health().value(), 85);
    assert_eq!(garden.gardener.total_tasks_completed(), 1);
    assert_eq!(garden.plants, vec![summary.plant.clone()]);

    let requests = harness.evaluator.requests();
    let request = requests.first().expect("evaluator should be called");
    assert_eq!(request.reflection_response, "Published at /notes/v2");
    assert_eq!(request.effort_weight, EffortWeight::Light);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn low_completion_decays_two_existing_plants(harness: Harness) {
    harness.set_garden_health(50).await;
    let healthy = harness.seed_plant(100, cell(0, 0));
    let tired = harness.seed_plant(80, cell(1, 0));
    let withered = harness.seed_plant(15, cell(2, 0));
    let task = harness.create_task(EffortWeight::Heavy).await;
    harness.evaluator.push(Ok(verdict(PlausibilityLevel::Low, 22)));

    let summary = harness
        .service
        .complete(harness.owner, task.id(), "I thought about it")
        .await
        .expect("completion should succeed");

    assert_eq!(summary.garden_health.value(), 40);
    assert_eq!(summary.plant.growth_stage().value(), 1);
    assert_eq!(summary.plant.health().value(), 40);
    assert_eq!(summary.plant.position(), cell(3, 0));
    assert!(PlantType::pool_for(EffortWeight::Heavy).contains(&summary.plant.plant_type()));
    assert_eq!(summary.decayed_plants.len(), 2);

    let garden = harness
        .service
        .garden(harness.owner)
        .await
        .expect("garden should load");
    let health_of = |id| {
        garden
            .plants
            .iter()
            .find(|plant| plant.id() == id)
            .map(|plant| plant.health().value())
    };
    assert_eq!(health_of(healthy.id()), Some(85));
    assert_eq!(health_of(tired.id()), Some(65));
    assert_eq!(health_of(withered.id()), Some(15));
    assert_eq!(health_of(summary.plant.id()), Some(40));
    assert_eq!(garden.plants.len(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn medium_completion_leaves_garden_health_alone(harness: Harness) {
    harness.set_garden_health(50).await;
    harness.seed_plant(90, cell(0, 0));
    let task = harness.create_task(EffortWeight::Medium).await;
    harness.evaluator.push(Ok(verdict(PlausibilityLevel::Medium, 60)));

    let summary = harness
        .service
        .complete(harness.owner, task.id(), "Drafted most of it")
        .await
        .expect("completion should succeed");

    assert_eq!(summary.garden_health.value(), 50);
    assert_eq!(summary.plant.growth_stage().value(), 3);
    assert_eq!(summary.plant.health().value(), 70);
    assert!(summary.decayed_plants.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn abandonment_lowers_health_without_a_plant(harness: Harness) {
    harness.set_garden_health(30).await;
    let task = harness.create_task(EffortWeight::Light).await;

    let summary = harness
        .service
        .abandon(harness.owner, task.id())
        .await
        .expect("abandon should succeed");

    assert_eq!(summary.task.status(), TaskStatus::Abandoned);
    assert_eq!(summary.garden_health.value(), 20);
    assert!(summary.decayed_plants.is_empty());
    let garden = harness
        .service
        .garden(harness.owner)
        .await
        .expect("garden should load");
    assert!(garden.plants.is_empty());
    assert_eq!(garden.gardener.total_tasks_completed(), 0);
    assert!(harness.evaluator.requests().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn abandonment_decays_existing_plants(harness: Harness) {
    let planted = harness.seed_plant(60, cell(0, 0));
    let task = harness.create_task(EffortWeight::Light).await;

    let summary = harness
        .service
        .abandon(harness.owner, task.id())
        .await
        .expect("abandon should succeed");

    assert_eq!(summary.garden_health.value(), 90);
    let decayed = summary.decayed_plants.first().expect("one plant should decay");
    assert_eq!(decayed.plant_id, planted.id());
    assert_eq!(decayed.new_health.value(), 45);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_tasks_reject_further_events(harness: Harness) {
    let task = harness.create_task(EffortWeight::Light).await;
    harness.evaluator.push(Ok(verdict(PlausibilityLevel::High, 95)));
    harness
        .service
        .complete(harness.owner, task.id(), "Shipped")
        .await
        .expect("completion should succeed");

    let again = harness
        .service
        .complete(harness.owner, task.id(), "Shipped twice")
        .await;
    let abandon = harness.service.abandon(harness.owner, task.id()).await;

    assert!(matches!(
        again,
        Err(LifecycleError::InvalidTransition {
            from: TaskStatus::Completed,
            action: TaskAction::Complete,
            ..
        })
    ));
    assert!(matches!(
        abandon,
        Err(LifecycleError::InvalidTransition {
            action: TaskAction::Abandon,
            ..
        })
    ));
    assert_eq!(harness.evaluator.requests().len(), 1);
    let garden = harness
        .service
        .garden(harness.owner)
        .await
        .expect("garden should load");
    assert_eq!(garden.plants.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn evaluator_failure_writes_nothing(harness: Harness) {
    harness.set_garden_health(70).await;
    let task = harness.create_task(EffortWeight::Light).await;
    harness
        .service
        .start(harness.owner, task.id())
        .await
        .expect("start should succeed");
    harness.evaluator.push(Err(CollaboratorError::InvalidResponse(
        "score out of range".to_owned(),
    )));
    let before = harness
        .service
        .garden(harness.owner)
        .await
        .expect("garden should load");

    let result = harness
        .service
        .complete(harness.owner, task.id(), "Finished it")
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::EvaluationFailed(
            CollaboratorError::InvalidResponse(_)
        ))
    ));
    let stored = harness
        .service
        .get_task(harness.owner, task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.status(), TaskStatus::InProgress);
    assert_eq!(stored.completion(), None);
    let after = harness
        .service
        .garden(harness.owner)
        .await
        .expect("garden should load");
    assert_eq!(after, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_evaluator_times_out(harness: Harness) {
    let store = Arc::clone(&harness.store);
    let evaluator = harness
        .evaluator
        .clone()
        .with_delay(Duration::from_millis(500))
        .with_verdict(verdict(PlausibilityLevel::High, 90));
    let service = GardenLifecycleService::new(
        store,
        Arc::new(evaluator),
        Arc::new(ScriptedQuestionGenerator::new()),
        Arc::new(ScriptedRandomSource::default()),
        Arc::new(DefaultClock),
    )
    .with_config(LifecycleConfig::default().with_evaluation_timeout(Duration::from_millis(20)));
    let task = harness.create_task(EffortWeight::Light).await;

    let result = service.complete(harness.owner, task.id(), "Done").await;

    assert!(matches!(
        result,
        Err(LifecycleError::EvaluationFailed(CollaboratorError::TimedOut(limit)))
            if limit == Duration::from_millis(20)
    ));
    let stored = service
        .get_task(harness.owner, task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_reflection_never_reaches_the_evaluator(harness: Harness) {
    let mut evaluator = MockEvaluator::new();
    evaluator.expect_evaluate().times(0);
    let service = mocked_service(Arc::clone(&harness.store), evaluator);
    let task = harness.create_task(EffortWeight::Light).await;

    let result = service.complete(harness.owner, task.id(), " \n\t ").await;

    assert!(matches!(
        result,
        Err(LifecycleError::ValidationFailed(
            TaskDomainError::EmptyReflectionResponse
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn evaluator_receives_the_task_context_once(harness: Harness) {
    let mut evaluator = MockEvaluator::new();
    let answer = verdict(PlausibilityLevel::Medium, 55);
    evaluator
        .expect_evaluate()
        .withf(|request| {
            request.title == "Write the release notes"
                && request.subtask_titles == ["Collect merged changes", "Publish the page"]
                && request.completion_contract == "A published page listing every change"
                && request.reflection_response == "Notes are live"
        })
        .times(1)
        .returning(move |_| Ok(answer.clone()));
    let service = mocked_service(Arc::clone(&harness.store), evaluator);
    let task = harness.create_task(EffortWeight::Medium).await;

    let summary = service
        .complete(harness.owner, task.id(), "Notes are live")
        .await
        .expect("completion should succeed");

    assert_eq!(summary.verdict.level(), PlausibilityLevel::Medium);
    assert_eq!(
        summary.task.completion().map(|completion| completion.score.value()),
        Some(55)
    );
}
