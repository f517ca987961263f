//! Repository port for gardener records and plants.

use crate::garden::domain::{Gardener, Plant};
use crate::ledger::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for garden repository operations.
pub type GardenRepositoryResult<T> = Result<T, GardenRepositoryError>;

/// A consistent read of one user's garden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenSnapshot {
    /// The owner's record, including its current version.
    pub gardener: Gardener,
    /// Every plant in the owner's garden, oldest first.
    pub plants: Vec<Plant>,
}

/// Garden persistence contract.
#[async_trait]
pub trait GardenRepository: Send + Sync {
    /// Returns the stored record for `candidate.id()`, storing `candidate`
    /// first when the user has never been seen.
    async fn find_or_create_gardener(
        &self,
        candidate: &Gardener,
    ) -> GardenRepositoryResult<Gardener>;

    /// Finds a gardener record.
    async fn find_gardener(&self, user: UserId) -> GardenRepositoryResult<Option<Gardener>>;

    /// Persists a gardener whose `version` matches the stored one and
    /// returns it with the bumped version.
    ///
    /// # Errors
    ///
    /// Returns [`GardenRepositoryError::NotFound`] for an unknown user and
    /// [`GardenRepositoryError::VersionConflict`] when another write landed
    /// first.
    async fn update_gardener(&self, gardener: &Gardener) -> GardenRepositoryResult<Gardener>;

    /// Returns the owner's plants, oldest first.
    async fn list_plants(&self, owner: UserId) -> GardenRepositoryResult<Vec<Plant>>;

    /// Reads the gardener and plants together.
    ///
    /// Returns `None` when the user has never been seen.
    async fn snapshot(&self, owner: UserId) -> GardenRepositoryResult<Option<GardenSnapshot>>;
}

/// Errors returned by garden repository implementations.
#[derive(Debug, Clone, Error)]
pub enum GardenRepositoryError {
    /// No gardener exists for the user.
    #[error("gardener not found: {0}")]
    NotFound(UserId),

    /// The stored version moved on since the value was read.
    #[error("gardener {user} changed concurrently (expected version {expected})")]
    VersionConflict {
        /// User whose record changed.
        user: UserId,
        /// Version the caller read.
        expected: u64,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted garden data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GardenRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
