//! Error types for task ledger validation, transitions, and parsing.

use super::{SubtaskId, TaskAction, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating ledger values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title is {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// Maximum allowed character count.
        max: usize,
        /// Character count of the rejected title.
        actual: usize,
    },

    /// The completion contract is empty after trimming.
    #[error("completion contract must not be empty")]
    EmptyCompletionContract,

    /// The subtask count is outside the accepted range.
    #[error("a task needs between {min} and {max} subtasks, got {actual}")]
    SubtaskCount {
        /// Minimum subtask count.
        min: usize,
        /// Maximum subtask count.
        max: usize,
        /// Number of subtasks supplied.
        actual: usize,
    },

    /// A subtask title is empty after trimming.
    #[error("subtask {index} title must not be empty")]
    EmptySubtaskTitle {
        /// Zero-based position of the subtask in the request.
        index: usize,
    },

    /// The reflection response is empty after trimming.
    #[error("reflection response must not be empty")]
    EmptyReflectionResponse,

    /// A plausibility score fell outside `0..=100`.
    #[error("plausibility score {0} is outside 0..=100")]
    InvalidPlausibilityScore(u32),

    /// The task state machine does not permit the action.
    #[error("cannot {action} task {task_id} while it is {from}")]
    InvalidTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Status at the time of the attempt.
        from: TaskStatus,
        /// Rejected action.
        action: TaskAction,
    },

    /// The subtask does not belong to the task.
    #[error("subtask {subtask_id} not found on task {task_id}")]
    SubtaskNotFound {
        /// Task identifier.
        task_id: TaskId,
        /// Missing subtask identifier.
        subtask_id: SubtaskId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing effort weights.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown effort weight: {0}")]
pub struct ParseEffortWeightError(pub String);

/// Error returned while parsing plausibility levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown plausibility level: {0}")]
pub struct ParsePlausibilityLevelError(pub String);
