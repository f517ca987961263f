//! Request and response payloads for lifecycle operations.

use crate::garden::{
    domain::{Health, Plant},
    services::PlantDecay,
};
use crate::ledger::domain::{EffortWeight, NewSubtask, NewTask, PlausibilityVerdict, Task, UserId};

/// Request payload for committing to a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner: UserId,
    title: String,
    completion_contract: String,
    effort_weight: EffortWeight,
    subtasks: Vec<NewSubtask>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields and no steps yet.
    #[must_use]
    pub fn new(
        owner: UserId,
        title: impl Into<String>,
        completion_contract: impl Into<String>,
        effort_weight: EffortWeight,
    ) -> Self {
        Self {
            owner,
            title: title.into(),
            completion_contract: completion_contract.into(),
            effort_weight,
            subtasks: Vec::new(),
        }
    }

    /// Appends one step.
    #[must_use]
    pub fn with_subtask(mut self, title: impl Into<String>, effort_weight: EffortWeight) -> Self {
        self.subtasks.push(NewSubtask {
            title: title.into(),
            effort_weight,
        });
        self
    }

    /// Appends several steps in order.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = NewSubtask>) -> Self {
        self.subtasks.extend(subtasks);
        self
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    pub(super) fn into_new_task(self) -> NewTask {
        NewTask {
            owner: self.owner,
            title: self.title,
            completion_contract: self.completion_contract,
            effort_weight: self.effort_weight,
            subtasks: self.subtasks,
        }
    }
}

/// Outcome of a committed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    /// The task in its completed state.
    pub task: Task,
    /// Evaluator verdict the garden changes were derived from.
    pub verdict: PlausibilityVerdict,
    /// Plant grown for the task.
    pub plant: Plant,
    /// Owner's garden health after the event.
    pub garden_health: Health,
    /// Existing plants that decayed.
    pub decayed_plants: Vec<PlantDecay>,
}

/// Outcome of a committed abandonment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbandonmentSummary {
    /// The task in its abandoned state.
    pub task: Task,
    /// Owner's garden health after the event.
    pub garden_health: Health,
    /// Existing plants that decayed.
    pub decayed_plants: Vec<PlantDecay>,
}
