//! Bounded health and growth scalars.

use super::GardenDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health value clamped to `0..=100`.
///
/// Used both for a single plant and for the aggregate garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Health(u8);

impl Health {
    /// Lowest health.
    pub const MIN: Self = Self(0);
    /// Highest health.
    pub const MAX: Self = Self(100);

    /// Creates a validated health value.
    ///
    /// # Errors
    ///
    /// Returns [`GardenDomainError::InvalidHealth`] outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, GardenDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|health| *health <= Self::MAX.0)
            .map(Self)
            .ok_or(GardenDomainError::InvalidHealth(value))
    }

    /// Creates a health value, capping it at the maximum.
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX.0 {
            return Self::MAX;
        }
        Self(value)
    }

    /// Creates a health value, clamping out-of-range input to the bounds.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        Self(u8::try_from(bounded).unwrap_or(Self::MAX.0))
    }

    /// Returns this health shifted by `delta`, clamped to the bounds.
    #[must_use]
    pub fn offset(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    /// Returns the health value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<i64> for Health {
    type Error = GardenDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Health> for i64 {
    fn from(health: Health) -> Self {
        Self::from(health.0)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual maturity of a plant, `0` (seed) to `5` (flourishing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct GrowthStage(u8);

impl GrowthStage {
    /// A freshly planted seed.
    pub const SEED: Self = Self(0);
    /// Fully grown.
    pub const FLOURISHING: Self = Self(5);

    /// Creates a validated growth stage.
    ///
    /// # Errors
    ///
    /// Returns [`GardenDomainError::InvalidGrowthStage`] outside `0..=5`.
    pub fn new(value: i64) -> Result<Self, GardenDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|stage| *stage <= Self::FLOURISHING.0)
            .map(Self)
            .ok_or(GardenDomainError::InvalidGrowthStage(value))
    }

    /// Creates a growth stage, capping it at [`GrowthStage::FLOURISHING`].
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > Self::FLOURISHING.0 {
            return Self::FLOURISHING;
        }
        Self(value)
    }

    /// Returns the stage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for GrowthStage {
    type Error = GardenDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GrowthStage> for i64 {
    fn from(stage: GrowthStage) -> Self {
        Self::from(stage.0)
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
