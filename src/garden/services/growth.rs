//! Growth mapper: turns effort and plausibility into a concrete plant.

use crate::garden::domain::{GrowthStage, Health, PlantType, SPECIES_PER_POOL};
use crate::garden::ports::RandomSource;
use crate::ledger::domain::{EffortWeight, PlausibilityLevel};

/// Fixed growth stage and starting health for one plausibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthProfile {
    /// Growth stage the plant starts at.
    pub growth_stage: GrowthStage,
    /// Health the plant starts with.
    pub health: Health,
}

/// Concrete plant attributes chosen for a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthOutcome {
    /// Species drawn from the effort pool.
    pub plant_type: PlantType,
    /// Growth stage from the level table.
    pub growth_stage: GrowthStage,
    /// Starting health from the level table.
    pub health: Health,
}

const HIGH_PROFILE: GrowthProfile = GrowthProfile {
    growth_stage: GrowthStage::FLOURISHING,
    health: Health::MAX,
};

const MEDIUM_PROFILE: GrowthProfile = GrowthProfile {
    growth_stage: GrowthStage::saturating(3),
    health: Health::saturating(70),
};

const LOW_PROFILE: GrowthProfile = GrowthProfile {
    growth_stage: GrowthStage::saturating(1),
    health: Health::saturating(40),
};

/// Returns the fixed growth profile for a plausibility level.
///
/// | level  | stage | health |
/// |--------|-------|--------|
/// | high   | 5     | 100    |
/// | medium | 3     | 70     |
/// | low    | 1     | 40     |
#[must_use]
pub const fn profile_for(level: PlausibilityLevel) -> GrowthProfile {
    match level {
        PlausibilityLevel::High => HIGH_PROFILE,
        PlausibilityLevel::Medium => MEDIUM_PROFILE,
        PlausibilityLevel::Low => LOW_PROFILE,
    }
}

/// Picks a species from the effort pool and applies the level's profile.
///
/// Effort only selects the pool; stage and health depend on the level alone.
pub fn map(
    effort: EffortWeight,
    level: PlausibilityLevel,
    random: &(impl RandomSource + ?Sized),
) -> GrowthOutcome {
    let pool = PlantType::pool_for(effort);
    let [first, ..] = *pool;
    let pick = random.index_below(SPECIES_PER_POOL);
    let plant_type = pool.get(pick).copied().unwrap_or(first);
    let profile = profile_for(level);
    GrowthOutcome {
        plant_type,
        growth_stage: profile.growth_stage,
        health: profile.health,
    }
}
