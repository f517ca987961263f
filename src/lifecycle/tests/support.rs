//! Shared fixtures for lifecycle unit tests.

use crate::garden::{
    adapters::ScriptedRandomSource,
    domain::{GridPosition, GrowthStage, Health, NewPlant, Plant, PlantType},
    ports::GardenRepository,
};
use crate::ledger::domain::{
    EffortWeight, PlausibilityLevel, PlausibilityScore, PlausibilityVerdict, Task, UserId,
};
use crate::lifecycle::{
    adapters::memory::{InMemoryGardenStore, ScriptedPlausibilityEvaluator, ScriptedQuestionGenerator},
    services::{CreateTaskRequest, GardenLifecycleService},
};
use mockable::DefaultClock;
use std::sync::Arc;

pub(super) type ScriptedService<S = InMemoryGardenStore, E = ScriptedPlausibilityEvaluator> =
    GardenLifecycleService<S, E, ScriptedQuestionGenerator, ScriptedRandomSource, DefaultClock>;

/// Service wired to in-memory adapters, with handles kept for inspection.
pub(super) struct Harness {
    pub(super) owner: UserId,
    pub(super) store: Arc<InMemoryGardenStore>,
    pub(super) evaluator: ScriptedPlausibilityEvaluator,
    pub(super) questions: ScriptedQuestionGenerator,
    pub(super) random: Arc<ScriptedRandomSource>,
    pub(super) service: ScriptedService,
}

impl Harness {
    pub(super) fn new() -> Self {
        let store = Arc::new(InMemoryGardenStore::new());
        let evaluator = ScriptedPlausibilityEvaluator::new();
        let questions = ScriptedQuestionGenerator::new();
        let random = Arc::new(ScriptedRandomSource::default());
        let service = GardenLifecycleService::new(
            Arc::clone(&store),
            Arc::new(evaluator.clone()),
            Arc::new(questions.clone()),
            Arc::clone(&random),
            Arc::new(DefaultClock),
        );
        Self {
            owner: UserId::new(),
            store,
            evaluator,
            questions,
            random,
            service,
        }
    }

    pub(super) async fn create_task(&self, effort: EffortWeight) -> Task {
        self.service
            .create_task(task_request(self.owner, effort))
            .await
            .expect("task creation should succeed")
    }

    pub(super) async fn set_garden_health(&self, value: u8) {
        let mut gardener = self
            .service
            .gardener(self.owner)
            .await
            .expect("gardener should load");
        gardener.set_garden_health(Health::saturating(value), &DefaultClock);
        self.store
            .update_gardener(&gardener)
            .await
            .expect("gardener update should succeed");
    }

    pub(super) fn seed_plant(&self, health: u8, position: GridPosition) -> Plant {
        let plant = plant_for(self.owner, health, position);
        self.store
            .seed_plant(plant.clone())
            .expect("seeding should succeed");
        plant
    }
}

pub(super) fn task_request(owner: UserId, effort: EffortWeight) -> CreateTaskRequest {
    CreateTaskRequest::new(
        owner,
        "Write the release notes",
        "A published page listing every change",
        effort,
    )
    .with_subtask("Collect merged changes", EffortWeight::Light)
    .with_subtask("Publish the page", effort)
}

pub(super) fn verdict(level: PlausibilityLevel, score: u32) -> PlausibilityVerdict {
    PlausibilityVerdict::new(
        PlausibilityScore::new(score).expect("score in range"),
        level,
        "matches the promised deliverable",
    )
}

pub(super) fn plant_for(owner: UserId, health: u8, position: GridPosition) -> Plant {
    Plant::new(
        NewPlant {
            owner,
            task_id: None,
            plant_type: PlantType::Lavender,
            growth_stage: GrowthStage::saturating(3),
            health: Health::saturating(health),
            position,
        },
        &DefaultClock,
    )
}

pub(super) fn cell(x: i64, y: i64) -> GridPosition {
    GridPosition::new(x, y).expect("cell should be on the grid")
}
