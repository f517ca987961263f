//! Repository port for task persistence and owner-scoped lookup.

use crate::ledger::domain::{SubtaskId, Task, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every lookup is scoped to an owning user: a task owned by someone else is
/// reported exactly as a missing one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists non-terminal changes to an existing task (status, subtask
    /// flags, reflection question), provided the stored version still equals
    /// `task.version()`. Returns the task as stored, one version later.
    ///
    /// Terminal transitions go through the lifecycle unit of work instead.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// for its owner and [`TaskRepositoryError::VersionConflict`] when any
    /// write landed since it was read.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier within the owner's tasks.
    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds the task that contains the given subtask within the owner's
    /// tasks.
    async fn find_by_subtask(
        &self,
        owner: UserId,
        subtask_id: SubtaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all of the owner's tasks, newest first.
    async fn list_for_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task changed since the caller read it.
    #[error("task {task_id} changed concurrently (expected version {expected})")]
    VersionConflict {
        /// Task identifier.
        task_id: TaskId,
        /// Version the caller read.
        expected: u64,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted task data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
