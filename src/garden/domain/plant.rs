//! Plants grown from completed tasks.

use super::{GridPosition, GrowthStage, Health, PlantId, PlantType};
use crate::ledger::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for planting a new plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPlant {
    /// Garden owner.
    pub owner: UserId,
    /// Task the plant grew from.
    pub task_id: Option<TaskId>,
    /// Species.
    pub plant_type: PlantType,
    /// Initial growth stage.
    pub growth_stage: GrowthStage,
    /// Initial health.
    pub health: Health,
    /// Grid cell.
    pub position: GridPosition,
}

/// A plant in a user's garden.
///
/// Health is the only attribute that changes after planting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    id: PlantId,
    owner: UserId,
    task_id: Option<TaskId>,
    plant_type: PlantType,
    growth_stage: GrowthStage,
    health: Health,
    position: GridPosition,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPlantData {
    /// Persisted plant identifier.
    pub id: PlantId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted task back-reference.
    pub task_id: Option<TaskId>,
    /// Persisted species.
    pub plant_type: PlantType,
    /// Persisted growth stage.
    pub growth_stage: GrowthStage,
    /// Persisted health.
    pub health: Health,
    /// Persisted grid cell.
    pub position: GridPosition,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    /// Plants a new plant.
    #[must_use]
    pub fn new(input: NewPlant, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: PlantId::new(),
            owner: input.owner,
            task_id: input.task_id,
            plant_type: input.plant_type,
            growth_stage: input.growth_stage,
            health: input.health,
            position: input.position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a plant from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedPlantData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            task_id: data.task_id,
            plant_type: data.plant_type,
            growth_stage: data.growth_stage,
            health: data.health,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the plant identifier.
    #[must_use]
    pub const fn id(&self) -> PlantId {
        self.id
    }

    /// Returns the garden owner.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the task this plant grew from, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the species.
    #[must_use]
    pub const fn plant_type(&self) -> PlantType {
        self.plant_type
    }

    /// Returns the growth stage.
    #[must_use]
    pub const fn growth_stage(&self) -> GrowthStage {
        self.growth_stage
    }

    /// Returns the current health.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Returns the grid cell.
    #[must_use]
    pub const fn position(&self) -> GridPosition {
        self.position
    }

    /// Returns the planting timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest health-change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the plant's health.
    pub fn set_health(&mut self, health: Health, at: DateTime<Utc>) {
        self.health = health;
        self.updated_at = at;
    }
}
