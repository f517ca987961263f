//! Repository port for mood check-ins.

use crate::ledger::domain::UserId;
use crate::mood::domain::{Mood, MoodId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for mood repository operations.
pub type MoodRepositoryResult<T> = Result<T, MoodRepositoryError>;

/// Mood persistence contract.
#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// Stores a new check-in.
    ///
    /// # Errors
    ///
    /// Returns [`MoodRepositoryError::DuplicateMood`] when the identifier is
    /// taken and [`MoodRepositoryError::UnknownOwner`] when the owner has no
    /// gardener record.
    async fn store_mood(&self, mood: &Mood) -> MoodRepositoryResult<()>;

    /// Returns up to `limit` of the owner's check-ins created at or after
    /// `since`, newest first.
    async fn recent_moods(
        &self,
        owner: UserId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> MoodRepositoryResult<Vec<Mood>>;
}

/// Errors returned by mood repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MoodRepositoryError {
    /// A check-in with the same identifier already exists.
    #[error("duplicate mood identifier: {0}")]
    DuplicateMood(MoodId),

    /// The owner has never been seen by the garden.
    #[error("no gardener record for {0}")]
    UnknownOwner(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted mood data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MoodRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
