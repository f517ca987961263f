//! Domain model for the task ledger.
//!
//! Tasks own their ordered subtasks and enforce the lifecycle state machine
//! (`pending → in_progress → completed`, with `abandoned` reachable from any
//! non-terminal status). Storage concerns stay outside this boundary.

mod effort;
mod error;
mod ids;
mod plausibility;
mod subtask;
mod task;

pub use effort::EffortWeight;
pub use error::{
    ParseEffortWeightError, ParsePlausibilityLevelError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::{SubtaskId, TaskId, UserId};
pub use plausibility::{PlausibilityLevel, PlausibilityScore, PlausibilityVerdict};
pub use subtask::{PersistedSubtaskData, Subtask};
pub use task::{
    NewSubtask, NewTask, PersistedTaskData, Task, TaskAction, TaskCompletion, TaskStatus,
    validate_reflection_response,
};
