//! Shared fixtures for garden flow integration tests.

use std::sync::Arc;

use gardenkeep::garden::{adapters::SeededRandomSource, ports::RandomSource};
use gardenkeep::ledger::domain::{
    EffortWeight, PlausibilityLevel, PlausibilityScore, PlausibilityVerdict, Task, UserId,
};
use gardenkeep::lifecycle::{
    adapters::memory::{InMemoryGardenStore, ScriptedPlausibilityEvaluator, ScriptedQuestionGenerator},
    services::{CreateTaskRequest, GardenLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the flow tests.
pub type FlowService<R = SeededRandomSource> = GardenLifecycleService<
    InMemoryGardenStore,
    ScriptedPlausibilityEvaluator,
    ScriptedQuestionGenerator,
    R,
    DefaultClock,
>;

/// One user's view of a freshly wired service.
pub struct Flow<R: RandomSource = SeededRandomSource> {
    pub owner: UserId,
    pub evaluator: ScriptedPlausibilityEvaluator,
    pub questions: ScriptedQuestionGenerator,
    pub service: FlowService<R>,
}

impl<R: RandomSource> Flow<R> {
    /// Wires a service around the given randomness source.
    pub fn with_random(random: R) -> Self {
        let evaluator = ScriptedPlausibilityEvaluator::new();
        let questions = ScriptedQuestionGenerator::new();
        let service = GardenLifecycleService::new(
            Arc::new(InMemoryGardenStore::new()),
            Arc::new(evaluator.clone()),
            Arc::new(questions.clone()),
            Arc::new(random),
            Arc::new(DefaultClock),
        );
        Self {
            owner: UserId::new(),
            evaluator,
            questions,
            service,
        }
    }

    /// Creates a task for the flow's owner.
    pub async fn commit_to(&self, title: &str, effort: EffortWeight) -> Task {
        self.service
            .create_task(
                CreateTaskRequest::new(self.owner, title, "Visible proof it happened", effort)
                    .with_subtask("Do the work", effort),
            )
            .await
            .expect("task creation should succeed")
    }

    /// Creates a task and completes it under the given verdict level.
    pub async fn finish(&self, title: &str, level: PlausibilityLevel) -> Task {
        let task = self.commit_to(title, EffortWeight::Medium).await;
        self.evaluator.push(Ok(verdict(level)));
        self.service
            .complete(self.owner, task.id(), "It is done")
            .await
            .expect("completion should succeed")
            .task
    }
}

/// Flow backed by a fixed seed.
#[fixture]
pub fn flow() -> Flow {
    Flow::with_random(SeededRandomSource::new(2026))
}

/// Builds a verdict whose score matches the level.
pub fn verdict(level: PlausibilityLevel) -> PlausibilityVerdict {
    let score = match level {
        PlausibilityLevel::High => 90,
        PlausibilityLevel::Medium => 55,
        PlausibilityLevel::Low => 15,
    };
    PlausibilityVerdict::new(
        PlausibilityScore::new(score).expect("score in range"),
        level,
        "scripted",
    )
}
