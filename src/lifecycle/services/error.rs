//! Error kinds surfaced by the lifecycle orchestrator.

use crate::garden::ports::GardenRepositoryError;
use crate::ledger::{
    domain::{SubtaskId, TaskAction, TaskDomainError, TaskId, TaskStatus, UserId},
    ports::TaskRepositoryError,
};
use crate::lifecycle::ports::{CollaboratorError, CommitError};
use std::fmt;
use thiserror::Error;

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Record that is absent or not owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntity {
    /// A task.
    Task(TaskId),
    /// A subtask, or the task that should own it.
    Subtask(SubtaskId),
    /// A user's garden record.
    Gardener(UserId),
}

impl fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task {id}"),
            Self::Subtask(id) => write!(f, "subtask {id}"),
            Self::Gardener(id) => write!(f, "gardener {id}"),
        }
    }
}

/// Storage failure from one of the persistence ports.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Garden repository failure.
    #[error(transparent)]
    Garden(#[from] GardenRepositoryError),
    /// Unit-of-work failure, including exhausted conflict retries.
    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Failures returned by lifecycle operations.
///
/// No variant is returned after a partial write.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// The entity is missing or belongs to someone else.
    #[error("{0} not found")]
    NotFound(MissingEntity),

    /// The task state machine rejected the action.
    #[error("cannot {action} task {task_id} while it is {from}")]
    InvalidTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Status at the time of the attempt.
        from: TaskStatus,
        /// Rejected action.
        action: TaskAction,
    },

    /// The plausibility evaluator failed or timed out; nothing was written.
    #[error("plausibility evaluation failed: {0}")]
    EvaluationFailed(#[source] CollaboratorError),

    /// The input was malformed.
    #[error("validation failed: {0}")]
    ValidationFailed(#[source] TaskDomainError),

    /// Storage rejected or failed the operation.
    #[error("repository failure: {0}")]
    Repository(#[source] StorageError),
}

impl From<TaskDomainError> for LifecycleError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::InvalidTransition {
                task_id,
                from,
                action,
            } => Self::InvalidTransition {
                task_id,
                from,
                action,
            },
            TaskDomainError::SubtaskNotFound { subtask_id, .. } => {
                Self::NotFound(MissingEntity::Subtask(subtask_id))
            }
            other => Self::ValidationFailed(other),
        }
    }
}

impl From<TaskRepositoryError> for LifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        Self::Repository(StorageError::Tasks(err))
    }
}

impl From<GardenRepositoryError> for LifecycleError {
    fn from(err: GardenRepositoryError) -> Self {
        Self::Repository(StorageError::Garden(err))
    }
}

impl From<CommitError> for LifecycleError {
    fn from(err: CommitError) -> Self {
        Self::Repository(StorageError::Commit(err))
    }
}
