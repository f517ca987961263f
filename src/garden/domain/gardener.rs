//! Per-user garden record: aggregate health and completion counter.

use super::Health;
use crate::ledger::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// The user record that owns a garden.
///
/// `version` is bumped by the store on every successful write and guards
/// the read-modify-write of `garden_health` across concurrent task events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gardener {
    id: UserId,
    garden_health: Health,
    total_tasks_completed: u32,
    onboarding_completed: bool,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted gardener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGardenerData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted aggregate garden health.
    pub garden_health: Health,
    /// Persisted completion counter.
    pub total_tasks_completed: u32,
    /// Persisted onboarding flag.
    pub onboarding_completed: bool,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Gardener {
    /// Creates the record for a user seen for the first time.
    #[must_use]
    pub fn new(id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            garden_health: Health::MAX,
            total_tasks_completed: 0,
            onboarding_completed: false,
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a gardener from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedGardenerData) -> Self {
        Self {
            id: data.id,
            garden_health: data.garden_health,
            total_tasks_completed: data.total_tasks_completed,
            onboarding_completed: data.onboarding_completed,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the aggregate garden health.
    #[must_use]
    pub const fn garden_health(&self) -> Health {
        self.garden_health
    }

    /// Returns how many tasks the user has completed.
    #[must_use]
    pub const fn total_tasks_completed(&self) -> u32 {
        self.total_tasks_completed
    }

    /// Returns whether onboarding has been completed.
    #[must_use]
    pub const fn onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    /// Returns the version this value was read at.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Counts one more completed task.
    pub fn record_completion(&mut self, clock: &impl Clock) {
        self.total_tasks_completed = self.total_tasks_completed.saturating_add(1);
        self.updated_at = clock.utc();
    }

    /// Replaces the aggregate garden health.
    pub fn set_garden_health(&mut self, health: Health, clock: &impl Clock) {
        self.garden_health = health;
        self.updated_at = clock.utc();
    }

    /// Marks onboarding as done.
    pub fn complete_onboarding(&mut self, clock: &impl Clock) {
        self.onboarding_completed = true;
        self.updated_at = clock.utc();
    }

    /// Returns a copy recording that the store accepted a write.
    #[must_use]
    pub fn into_next_version(self) -> Self {
        Self {
            version: self.version.saturating_add(1),
            ..self
        }
    }
}
