//! Shared world state for garden lifecycle BDD scenarios.

use std::sync::Arc;

use gardenkeep::garden::{adapters::ScriptedRandomSource, domain::PlantId};
use gardenkeep::ledger::domain::{Task, UserId};
use gardenkeep::lifecycle::{
    adapters::memory::{InMemoryGardenStore, ScriptedPlausibilityEvaluator, ScriptedQuestionGenerator},
    services::{CompletionSummary, GardenLifecycleService, LifecycleError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestGardenService = GardenLifecycleService<
    InMemoryGardenStore,
    ScriptedPlausibilityEvaluator,
    ScriptedQuestionGenerator,
    ScriptedRandomSource,
    DefaultClock,
>;

/// Scenario world for garden lifecycle behaviour tests.
pub struct GardenWorld {
    pub owner: UserId,
    pub store: Arc<InMemoryGardenStore>,
    pub evaluator: ScriptedPlausibilityEvaluator,
    pub service: TestGardenService,
    pub task: Option<Task>,
    pub seeded_plants: Vec<PlantId>,
    pub last_completion: Option<CompletionSummary>,
    pub last_error: Option<LifecycleError>,
}

impl GardenWorld {
    /// Creates a world for a single new user.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryGardenStore::new());
        let evaluator = ScriptedPlausibilityEvaluator::new();
        let service = GardenLifecycleService::new(
            Arc::clone(&store),
            Arc::new(evaluator.clone()),
            Arc::new(ScriptedQuestionGenerator::new()),
            Arc::new(ScriptedRandomSource::default()),
            Arc::new(DefaultClock),
        );

        Self {
            owner: UserId::new(),
            store,
            evaluator,
            service,
            task: None,
            seeded_plants: Vec::new(),
            last_completion: None,
            last_error: None,
        }
    }

    /// Returns the task under test.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records an operation outcome, keeping the error for later steps.
    pub fn record<T>(&mut self, result: Result<T, LifecycleError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }
}

impl Default for GardenWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> GardenWorld {
    GardenWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
