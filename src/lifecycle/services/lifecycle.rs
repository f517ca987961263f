//! Lifecycle orchestrator: task events in, garden changes out.

use super::{
    AbandonmentSummary, CompletionSummary, CreateTaskRequest, LifecycleError, LifecycleResult,
    MissingEntity,
};
use crate::config::LifecycleConfig;
use crate::garden::{
    domain::{Gardener, NewPlant, Plant},
    ports::{GardenRepository, GardenRepositoryError, GardenSnapshot, RandomSource},
    services::{PlantDecay, aggregate, decay, growth, placement},
};
use crate::ledger::{
    domain::{
        PlausibilityLevel, PlausibilityVerdict, Subtask, SubtaskId, Task, TaskAction,
        TaskDomainError, TaskId, UserId, validate_reflection_response,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::lifecycle::ports::{
    CollaboratorError, CommittedEvent, EvaluationRequest, PlantHealthUpdate,
    PlausibilityEvaluator, QuestionRequest, ReflectionQuestionGenerator, TaskEventCommit,
    TaskEventCommitter,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How an operation locates its task.
#[derive(Debug, Clone, Copy)]
enum TaskLookup {
    ById(TaskId),
    BySubtask(SubtaskId),
}

impl TaskLookup {
    const fn missing(self) -> MissingEntity {
        match self {
            Self::ById(id) => MissingEntity::Task(id),
            Self::BySubtask(id) => MissingEntity::Subtask(id),
        }
    }
}

/// Writes planned for one terminal event, plus the decay that produced the
/// plant updates.
struct PlannedEvent {
    work: TaskEventCommit,
    decays: Vec<PlantDecay>,
}

/// Task lifecycle orchestration service.
///
/// One store backs tasks, gardens, and the unit of work. Every completion
/// and abandonment is planned against a fresh read of the owner's garden
/// and committed in one step; a concurrent write to the same garden or task
/// makes the commit fail, and the event is re-planned against a new read.
/// Non-terminal task writes are version-checked the same way.
#[derive(Clone)]
pub struct GardenLifecycleService<S, E, Q, R, C>
where
    S: TaskRepository + GardenRepository + TaskEventCommitter,
    E: PlausibilityEvaluator,
    Q: ReflectionQuestionGenerator,
    R: RandomSource,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    evaluator: Arc<E>,
    questions: Arc<Q>,
    random: Arc<R>,
    clock: Arc<C>,
    config: LifecycleConfig,
}

impl<S, E, Q, R, C> GardenLifecycleService<S, E, Q, R, C>
where
    S: TaskRepository + GardenRepository + TaskEventCommitter,
    E: PlausibilityEvaluator,
    Q: ReflectionQuestionGenerator,
    R: RandomSource,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        evaluator: Arc<E>,
        questions: Arc<Q>,
        random: Arc<R>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            evaluator,
            questions,
            random,
            clock,
            config: LifecycleConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Commits the caller to a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ValidationFailed`] for a blank or overlong
    /// title, a blank contract, or a step list outside `1..=10`, and
    /// [`LifecycleError::Repository`] when storage fails.
    #[tracing::instrument(skip(self, request), fields(owner = %request.owner()))]
    pub async fn create_task(&self, request: CreateTaskRequest) -> LifecycleResult<Task> {
        let task = Task::new(request.into_new_task(), &*self.clock)?;
        self.gardener(task.owner()).await?;
        self.store.store(&task).await?;
        debug!(task = %task.id(), steps = task.subtasks().len(), "task created");
        Ok(task)
    }

    /// Returns one of the caller's tasks with its steps in order.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] when the task is missing or owned
    /// by someone else.
    pub async fn get_task(&self, owner: UserId, task_id: TaskId) -> LifecycleResult<Task> {
        self.load_task(owner, TaskLookup::ById(task_id)).await
    }

    /// Returns all of the caller's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when storage fails.
    pub async fn list_tasks(&self, owner: UserId) -> LifecycleResult<Vec<Task>> {
        Ok(self.store.list_for_owner(owner).await?)
    }

    /// Returns the caller's garden record, creating it on first reference.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when storage fails.
    pub async fn gardener(&self, owner: UserId) -> LifecycleResult<Gardener> {
        let candidate = Gardener::new(owner, &*self.clock);
        Ok(self.store.find_or_create_gardener(&candidate).await?)
    }

    /// Marks the caller's onboarding as done.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when storage fails or the
    /// record keeps changing underneath the update.
    #[tracing::instrument(skip(self))]
    pub async fn complete_onboarding(&self, owner: UserId) -> LifecycleResult<Gardener> {
        let mut attempt = 1;
        loop {
            let mut gardener = self.gardener(owner).await?;
            if gardener.onboarding_completed() {
                return Ok(gardener);
            }
            gardener.complete_onboarding(&*self.clock);
            match self.store.update_gardener(&gardener).await {
                Ok(stored) => return Ok(stored),
                Err(GardenRepositoryError::VersionConflict { .. })
                    if attempt < self.config.max_commit_attempts =>
                {
                    warn!(attempt, "gardener changed during onboarding, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Returns the caller's plants together with the aggregate health.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when storage fails.
    pub async fn garden(&self, owner: UserId) -> LifecycleResult<GardenSnapshot> {
        self.gardener(owner).await?;
        self.read_garden(owner).await
    }

    /// Moves a pending task to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] for a missing task and
    /// [`LifecycleError::InvalidTransition`] unless the task is pending.
    #[tracing::instrument(skip(self))]
    pub async fn start(&self, owner: UserId, task_id: TaskId) -> LifecycleResult<Task> {
        let (task, ()) = self
            .update_task(owner, TaskLookup::ById(task_id), Task::start)
            .await?;
        info!(status = %task.status(), "task started");
        Ok(task)
    }

    /// Flips one step's completion flag and returns the updated step.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] when the step or its task is not
    /// the caller's, and [`LifecycleError::InvalidTransition`] when the task
    /// is already completed or abandoned.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_subtask(
        &self,
        owner: UserId,
        subtask_id: SubtaskId,
    ) -> LifecycleResult<Subtask> {
        let (task, subtask) = self
            .update_task(owner, TaskLookup::BySubtask(subtask_id), |current| {
                current.toggle_subtask(subtask_id).map(Subtask::clone)
            })
            .await?;
        debug!(
            task = %task.id(),
            completed = subtask.is_completed(),
            all_steps_done = task.all_steps_done(),
            "subtask toggled"
        );
        Ok(subtask)
    }

    /// Returns the task's reflection question, generating and storing one on
    /// first use.
    ///
    /// A stored question is returned unchanged, even once the task is
    /// terminal. A generator failure or timeout falls back to the configured
    /// question instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] for a missing task and
    /// [`LifecycleError::InvalidTransition`] when a terminal task has no
    /// stored question.
    #[tracing::instrument(skip(self))]
    pub async fn initiate_completion(
        &self,
        owner: UserId,
        task_id: TaskId,
    ) -> LifecycleResult<String> {
        let lookup = TaskLookup::ById(task_id);
        let mut task = self.load_task(owner, lookup).await?;
        if let Some(stored) = task.reflection_question() {
            return Ok(stored.to_owned());
        }
        task.ensure_permits(TaskAction::InitiateCompletion)?;

        let question = self.generate_question(&task).await;
        let mut attempt = 1;
        loop {
            task.record_reflection_question(question.clone());
            match self.store.update(&task).await {
                Ok(_) => return Ok(question),
                Err(TaskRepositoryError::VersionConflict { .. })
                    if attempt < self.config.max_commit_attempts =>
                {
                    warn!(attempt, "task changed while storing its question, retrying");
                    attempt += 1;
                    task = self.load_task(owner, lookup).await?;
                    if let Some(stored) = task.reflection_question() {
                        return Ok(stored.to_owned());
                    }
                    task.ensure_permits(TaskAction::InitiateCompletion)?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Completes a task: evaluates the reflection, grows a plant, adjusts
    /// garden health, and decays existing plants on a low verdict.
    ///
    /// The evaluator runs once, before anything is written. All writes land
    /// together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ValidationFailed`] for a blank response,
    /// [`LifecycleError::NotFound`] for a missing task,
    /// [`LifecycleError::InvalidTransition`] for a terminal task,
    /// [`LifecycleError::EvaluationFailed`] when the evaluator fails or times
    /// out, and [`LifecycleError::Repository`] when the commit fails.
    #[tracing::instrument(skip(self, reflection_response))]
    pub async fn complete(
        &self,
        owner: UserId,
        task_id: TaskId,
        reflection_response: &str,
    ) -> LifecycleResult<CompletionSummary> {
        let response = validate_reflection_response(reflection_response)?;
        let task = self.load_task(owner, TaskLookup::ById(task_id)).await?;
        task.ensure_permits(TaskAction::Complete)?;
        self.gardener(owner).await?;

        let verdict = self
            .evaluate(&EvaluationRequest::for_task(&task, response))
            .await?;
        debug!(
            score = %verdict.score(),
            level = %verdict.level(),
            "plausibility evaluated"
        );

        let (decays, plant, CommittedEvent { task: completed, gardener }) = self
            .commit_task_event(owner, task, |mut current, snapshot| {
                current.complete(response, &verdict, &*self.clock)?;
                Ok(self.plan_completion(current, snapshot, &verdict))
            })
            .await?;

        info!(
            level = %verdict.level(),
            garden_health = %gardener.garden_health(),
            plant = %plant.plant_type(),
            position = %plant.position(),
            decayed = decays.len(),
            "task completed"
        );
        Ok(CompletionSummary {
            task: completed,
            verdict,
            plant,
            garden_health: gardener.garden_health(),
            decayed_plants: decays,
        })
    }

    /// Abandons a task, lowering garden health as a low verdict would and
    /// decaying existing plants. No plant is grown.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] for a missing task,
    /// [`LifecycleError::InvalidTransition`] for a terminal task, and
    /// [`LifecycleError::Repository`] when the commit fails.
    #[tracing::instrument(skip(self))]
    pub async fn abandon(
        &self,
        owner: UserId,
        task_id: TaskId,
    ) -> LifecycleResult<AbandonmentSummary> {
        let task = self.load_task(owner, TaskLookup::ById(task_id)).await?;
        task.ensure_permits(TaskAction::Abandon)?;
        self.gardener(owner).await?;

        let (decays, (), CommittedEvent { task: abandoned, gardener }) = self
            .commit_task_event(owner, task, |mut current, snapshot| {
                current.abandon()?;
                let planned =
                    self.plan_health_event(current, snapshot, PlausibilityLevel::Low, None);
                Ok((planned, ()))
            })
            .await?;

        info!(
            garden_health = %gardener.garden_health(),
            decayed = decays.len(),
            "task abandoned"
        );
        Ok(AbandonmentSummary {
            task: abandoned,
            garden_health: gardener.garden_health(),
            decayed_plants: decays,
        })
    }

    async fn load_task(&self, owner: UserId, lookup: TaskLookup) -> LifecycleResult<Task> {
        let found = match lookup {
            TaskLookup::ById(id) => self.store.find_by_id(owner, id).await?,
            TaskLookup::BySubtask(id) => self.store.find_by_subtask(owner, id).await?,
        };
        found.ok_or(LifecycleError::NotFound(lookup.missing()))
    }

    async fn read_garden(&self, owner: UserId) -> LifecycleResult<GardenSnapshot> {
        self.store
            .snapshot(owner)
            .await?
            .ok_or(LifecycleError::NotFound(MissingEntity::Gardener(owner)))
    }

    /// Applies a non-terminal change, re-reading and re-applying it when
    /// another write landed between read and write.
    async fn update_task<T, F>(
        &self,
        owner: UserId,
        lookup: TaskLookup,
        mut apply: F,
    ) -> LifecycleResult<(Task, T)>
    where
        F: FnMut(&mut Task) -> Result<T, TaskDomainError>,
    {
        let mut attempt = 1;
        loop {
            let mut task = self.load_task(owner, lookup).await?;
            let outcome = apply(&mut task)?;
            match self.store.update(&task).await {
                Ok(stored) => return Ok((stored, outcome)),
                Err(TaskRepositoryError::VersionConflict { .. })
                    if attempt < self.config.max_commit_attempts =>
                {
                    warn!(attempt, "task changed during update, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Plans and commits a terminal event, re-planning against fresh reads
    /// after each conflict.
    async fn commit_task_event<T, F>(
        &self,
        owner: UserId,
        first_read: Task,
        plan: F,
    ) -> LifecycleResult<(Vec<PlantDecay>, T, CommittedEvent)>
    where
        F: Fn(Task, GardenSnapshot) -> LifecycleResult<(PlannedEvent, T)>,
    {
        let task_id = first_read.id();
        let mut task = first_read;
        let mut attempt = 1;
        loop {
            let snapshot = self.read_garden(owner).await?;
            let (planned, extra) = plan(task, snapshot)?;
            match self.store.commit(&planned.work).await {
                Ok(committed) => return Ok((planned.decays, extra, committed)),
                Err(err) if err.is_conflict() && attempt < self.config.max_commit_attempts => {
                    warn!(attempt, error = %err, "task event conflicted, retrying");
                    attempt += 1;
                    task = self.load_task(owner, TaskLookup::ById(task_id)).await?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn plan_completion(
        &self,
        task: Task,
        snapshot: GardenSnapshot,
        verdict: &PlausibilityVerdict,
    ) -> (PlannedEvent, Plant) {
        let level = verdict.level();
        let outcome = growth::map(task.effort_weight(), level, &*self.random);
        let position = placement::allocate(
            snapshot.plants.iter().map(Plant::position),
            &*self.random,
        );
        debug!(%position, plant = %outcome.plant_type, "plant placed");
        let plant = Plant::new(
            NewPlant {
                owner: task.owner(),
                task_id: Some(task.id()),
                plant_type: outcome.plant_type,
                growth_stage: outcome.growth_stage,
                health: outcome.health,
                position,
            },
            &*self.clock,
        );
        let planned = self.plan_health_event(task, snapshot, level, Some(plant.clone()));
        (planned, plant)
    }

    /// Applies the aggregate health rule and, for a negative delta, decays
    /// plants that existed before this event.
    fn plan_health_event(
        &self,
        task: Task,
        snapshot: GardenSnapshot,
        level: PlausibilityLevel,
        new_plant: Option<Plant>,
    ) -> PlannedEvent {
        let GardenSnapshot {
            mut gardener,
            plants,
        } = snapshot;
        if new_plant.is_some() {
            gardener.record_completion(&*self.clock);
        }
        let health = aggregate::apply(gardener.garden_health(), level);
        gardener.set_garden_health(health, &*self.clock);

        let decays = if aggregate::triggers_decay(level) {
            decay::decay(&plants, &*self.random)
        } else {
            Vec::new()
        };
        let updated_at = self.clock.utc();
        let plant_updates = decays
            .iter()
            .map(|change| PlantHealthUpdate {
                plant_id: change.plant_id,
                health: change.new_health,
                updated_at,
            })
            .collect();
        debug!(decayed = decays.len(), %health, "garden health planned");

        PlannedEvent {
            work: TaskEventCommit {
                task,
                gardener,
                new_plant,
                plant_updates,
            },
            decays,
        }
    }

    async fn evaluate(&self, request: &EvaluationRequest) -> LifecycleResult<PlausibilityVerdict> {
        let timeout = self.config.evaluation_timeout;
        match tokio::time::timeout(timeout, self.evaluator.evaluate(request)).await {
            Ok(Ok(verdict)) => Ok(verdict),
            Ok(Err(err)) => Err(LifecycleError::EvaluationFailed(err)),
            Err(_) => Err(LifecycleError::EvaluationFailed(CollaboratorError::TimedOut(
                timeout,
            ))),
        }
    }

    async fn generate_question(&self, task: &Task) -> String {
        let request = QuestionRequest::for_task(task);
        let timeout = self.config.evaluation_timeout;
        let failure = match tokio::time::timeout(timeout, self.questions.generate(&request)).await
        {
            Ok(Ok(question)) if !question.trim().is_empty() => return question.trim().to_owned(),
            Ok(Ok(_)) => CollaboratorError::InvalidResponse("blank question".to_owned()),
            Ok(Err(err)) => err,
            Err(_) => CollaboratorError::TimedOut(timeout),
        };
        warn!(error = %failure, "question generation failed, using fallback");
        self.config.fallback_question.clone()
    }
}
