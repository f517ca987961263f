//! Unit-of-work port for terminal task events.
//!
//! A completion or abandonment touches the task, the owner's gardener
//! record, and plants. The committer applies all of it or none of it.

use crate::garden::domain::{Gardener, Health, Plant, PlantId};
use crate::ledger::domain::{Task, TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Health change for an existing plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantHealthUpdate {
    /// Affected plant.
    pub plant_id: PlantId,
    /// New health.
    pub health: Health,
    /// Time of the change.
    pub updated_at: DateTime<Utc>,
}

/// Every write produced by one completion or abandonment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEventCommit {
    /// Task in its new terminal state; its `version` is the one that was
    /// read.
    pub task: Task,
    /// Gardener with updated health and counter; its `version` is the one
    /// that was read.
    pub gardener: Gardener,
    /// Plant grown by a completion.
    pub new_plant: Option<Plant>,
    /// Decay applied to existing plants.
    pub plant_updates: Vec<PlantHealthUpdate>,
}

/// Task and gardener as stored by a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEvent {
    /// Terminal task at its new version.
    pub task: Task,
    /// Gardener at its new version.
    pub gardener: Gardener,
}

/// Applies task events atomically.
#[async_trait]
pub trait TaskEventCommitter: Send + Sync {
    /// Commits every write in `work` and returns the stored task and
    /// gardener with their new versions.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::TaskVersionConflict`] or
    /// [`CommitError::VersionConflict`] when the task or gardener changed
    /// since they were read; nothing is written in that case.
    async fn commit(&self, work: &TaskEventCommit) -> CommitResult<CommittedEvent>;
}

/// Result type for unit-of-work commits.
pub type CommitResult<T> = Result<T, CommitError>;

/// Errors returned by unit-of-work implementations.
#[derive(Debug, Clone, Error)]
pub enum CommitError {
    /// The task changed since it was read.
    #[error("task {task_id} changed concurrently (expected version {expected})")]
    TaskVersionConflict {
        /// Task identifier.
        task_id: TaskId,
        /// Version the caller read.
        expected: u64,
    },

    /// The gardener version moved on since it was read.
    #[error("gardener {user} changed concurrently (expected version {expected})")]
    VersionConflict {
        /// Owner of the garden.
        user: UserId,
        /// Version the caller read.
        expected: u64,
    },

    /// A record referenced by the commit does not exist.
    #[error("commit references a missing record: {0}")]
    MissingRecord(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommitError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns whether re-reading and retrying may succeed.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::TaskVersionConflict { .. } | Self::VersionConflict { .. }
        )
    }
}
