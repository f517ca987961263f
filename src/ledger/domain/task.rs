//! Task aggregate root and its lifecycle state machine.

use super::{
    EffortWeight, ParseTaskStatusError, PlausibilityLevel, PlausibilityScore,
    PlausibilityVerdict, Subtask, SubtaskId, TaskDomainError, TaskId, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been committed to but work has not started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed and evaluated.
    Completed,
    /// Task has been given up.
    Abandoned,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }

    /// Returns whether `action` is allowed from this status.
    ///
    /// Completion is accepted straight from `pending`; starting first is not
    /// required.
    #[must_use]
    pub const fn permits(self, action: TaskAction) -> bool {
        match (self, action) {
            (Self::Pending, TaskAction::Start)
            | (
                Self::Pending | Self::InProgress,
                TaskAction::ToggleSubtask
                | TaskAction::InitiateCompletion
                | TaskAction::Complete
                | TaskAction::Abandon,
            ) => true,
            (Self::InProgress, TaskAction::Start) | (Self::Completed | Self::Abandoned, _) => {
                false
            }
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Actions a caller may attempt on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// Begin work on a pending task.
    Start,
    /// Flip one step's completion flag.
    ToggleSubtask,
    /// Ask for the reflection question ahead of completion.
    InitiateCompletion,
    /// Finish the task with a reflection.
    Complete,
    /// Give up on the task.
    Abandon,
}

impl TaskAction {
    /// Returns a human-readable verb phrase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ToggleSubtask => "toggle a subtask of",
            Self::InitiateCompletion => "initiate completion of",
            Self::Complete => "complete",
            Self::Abandon => "abandon",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation outcome recorded when a task completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    /// Evaluator score.
    pub score: PlausibilityScore,
    /// Evaluator level.
    pub level: PlausibilityLevel,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
}

/// Step supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubtask {
    /// Step title.
    pub title: String,
    /// Step effort weight.
    pub effort_weight: EffortWeight,
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning user.
    pub owner: UserId,
    /// Task title.
    pub title: String,
    /// Promised deliverable.
    pub completion_contract: String,
    /// Overall effort weight.
    pub effort_weight: EffortWeight,
    /// Steps in display order.
    pub subtasks: Vec<NewSubtask>,
}

/// Task aggregate root.
///
/// `version` is bumped by the store on every accepted write. Writes made
/// from a stale read are rejected, so concurrent changes to different
/// steps of one task cannot overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: String,
    completion_contract: String,
    effort_weight: EffortWeight,
    status: TaskStatus,
    subtasks: Vec<Subtask>,
    reflection_question: Option<String>,
    reflection_response: Option<String>,
    completion: Option<TaskCompletion>,
    version: u64,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted completion contract.
    pub completion_contract: String,
    /// Persisted effort weight.
    pub effort_weight: EffortWeight,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted subtasks, in any order.
    pub subtasks: Vec<Subtask>,
    /// Persisted reflection question, if generated.
    pub reflection_question: Option<String>,
    /// Persisted reflection response, if completed.
    pub reflection_response: Option<String>,
    /// Persisted completion outcome, if completed.
    pub completion: Option<TaskCompletion>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Longest accepted title, in characters.
    pub const MAX_TITLE_CHARS: usize = 500;
    /// Fewest subtasks a task may be created with.
    pub const MIN_SUBTASKS: usize = 1;
    /// Most subtasks a task may be created with.
    pub const MAX_SUBTASKS: usize = 10;

    /// Creates a pending task with its subtasks numbered in input order.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] validation variant when the title,
    /// contract, or subtask list is malformed.
    pub fn new(input: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = input.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let title_chars = title.chars().count();
        if title_chars > Self::MAX_TITLE_CHARS {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::MAX_TITLE_CHARS,
                actual: title_chars,
            });
        }

        let completion_contract = input.completion_contract.trim().to_owned();
        if completion_contract.is_empty() {
            return Err(TaskDomainError::EmptyCompletionContract);
        }

        let count = input.subtasks.len();
        if !(Self::MIN_SUBTASKS..=Self::MAX_SUBTASKS).contains(&count) {
            return Err(TaskDomainError::SubtaskCount {
                min: Self::MIN_SUBTASKS,
                max: Self::MAX_SUBTASKS,
                actual: count,
            });
        }

        let subtasks = input
            .subtasks
            .into_iter()
            .zip(0_u32..)
            .enumerate()
            .map(|(index, (step, order_index))| {
                let step_title = step.title.trim();
                if step_title.is_empty() {
                    return Err(TaskDomainError::EmptySubtaskTitle { index });
                }
                Ok(Subtask::new(step_title, step.effort_weight, order_index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: TaskId::new(),
            owner: input.owner,
            title,
            completion_contract,
            effort_weight: input.effort_weight,
            status: TaskStatus::Pending,
            subtasks,
            reflection_question: None,
            reflection_response: None,
            completion: None,
            version: 0,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// Subtasks are re-sorted by `order_index`.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let mut subtasks = data.subtasks;
        subtasks.sort_by_key(Subtask::order_index);
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            completion_contract: data.completion_contract,
            effort_weight: data.effort_weight,
            status: data.status,
            subtasks,
            reflection_question: data.reflection_question,
            reflection_response: data.reflection_response,
            completion: data.completion,
            version: data.version,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the promised deliverable.
    #[must_use]
    pub fn completion_contract(&self) -> &str {
        &self.completion_contract
    }

    /// Returns the overall effort weight.
    #[must_use]
    pub const fn effort_weight(&self) -> EffortWeight {
        self.effort_weight
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the version this value was read at.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns a copy recording that the store accepted a write.
    #[must_use]
    pub fn into_next_version(self) -> Self {
        Self {
            version: self.version.saturating_add(1),
            ..self
        }
    }

    /// Returns the subtasks in `order_index` order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the subtask titles in `order_index` order.
    #[must_use]
    pub fn subtask_titles(&self) -> Vec<String> {
        self.subtasks
            .iter()
            .map(|subtask| subtask.title().to_owned())
            .collect()
    }

    /// Returns the stored reflection question, if any.
    #[must_use]
    pub fn reflection_question(&self) -> Option<&str> {
        self.reflection_question.as_deref()
    }

    /// Returns the reflection response recorded on completion.
    #[must_use]
    pub fn reflection_response(&self) -> Option<&str> {
        self.reflection_response.as_deref()
    }

    /// Returns the completion outcome; present only when completed.
    #[must_use]
    pub const fn completion(&self) -> Option<&TaskCompletion> {
        self.completion.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether every step is done; always `false` without steps.
    ///
    /// Informational only: completion is not gated on it.
    #[must_use]
    pub fn all_steps_done(&self) -> bool {
        !self.subtasks.is_empty() && self.subtasks.iter().all(Subtask::is_completed)
    }

    /// Checks that `action` is allowed in the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the state machine
    /// forbids the action.
    pub const fn ensure_permits(&self, action: TaskAction) -> Result<(), TaskDomainError> {
        if self.status.permits(action) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.status,
            action,
        })
    }

    /// Moves a pending task to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// pending.
    pub fn start(&mut self) -> Result<(), TaskDomainError> {
        self.ensure_permits(TaskAction::Start)?;
        self.status = TaskStatus::InProgress;
        Ok(())
    }

    /// Flips one step's completion flag and returns the updated step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] on a terminal task and
    /// [`TaskDomainError::SubtaskNotFound`] when the step is not part of
    /// this task.
    pub fn toggle_subtask(&mut self, subtask_id: SubtaskId) -> Result<&Subtask, TaskDomainError> {
        self.ensure_permits(TaskAction::ToggleSubtask)?;
        let task_id = self.id;
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.id() == subtask_id)
            .ok_or(TaskDomainError::SubtaskNotFound {
                task_id,
                subtask_id,
            })?;
        subtask.toggle();
        Ok(&*subtask)
    }

    /// Stores the reflection question generated for this task.
    pub fn record_reflection_question(&mut self, question: impl Into<String>) {
        self.reflection_question = Some(question.into());
    }

    /// Marks the task completed with the evaluator's verdict.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] on a terminal task and
    /// [`TaskDomainError::EmptyReflectionResponse`] for a blank response.
    pub fn complete(
        &mut self,
        reflection_response: &str,
        verdict: &PlausibilityVerdict,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_permits(TaskAction::Complete)?;
        let response = validate_reflection_response(reflection_response)?;
        self.status = TaskStatus::Completed;
        self.reflection_response = Some(response.to_owned());
        self.completion = Some(TaskCompletion {
            score: verdict.score(),
            level: verdict.level(),
            completed_at: clock.utc(),
        });
        Ok(())
    }

    /// Marks the task abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] on a terminal task.
    pub fn abandon(&mut self) -> Result<(), TaskDomainError> {
        self.ensure_permits(TaskAction::Abandon)?;
        self.status = TaskStatus::Abandoned;
        Ok(())
    }
}

/// Trims a reflection response and rejects blank input.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyReflectionResponse`] when nothing but
/// whitespace remains.
pub fn validate_reflection_response(response: &str) -> Result<&str, TaskDomainError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyReflectionResponse);
    }
    Ok(trimmed)
}
