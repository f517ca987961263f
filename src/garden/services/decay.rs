//! Decay propagator: withers existing plants after a negative health event.

use crate::garden::domain::{Health, Plant, PlantId};
use crate::garden::ports::RandomSource;

/// Plants at or below this health are withered and never decay further.
pub const WITHER_THRESHOLD: u8 = 20;
/// Most plants affected by a single decay event.
pub const MAX_DECAYED_PLANTS: usize = 2;
/// Health removed from each affected plant.
pub const DECAY_AMOUNT: i64 = 15;

/// Health change chosen for one plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantDecay {
    /// Affected plant.
    pub plant_id: PlantId,
    /// Health before decay.
    pub previous_health: Health,
    /// Health after decay.
    pub new_health: Health,
}

/// Picks up to [`MAX_DECAYED_PLANTS`] plants above [`WITHER_THRESHOLD`] by
/// a uniform draw and lowers each by [`DECAY_AMOUNT`], floored at zero.
///
/// Returns an empty list when no plant is eligible.
pub fn decay(plants: &[Plant], random: &(impl RandomSource + ?Sized)) -> Vec<PlantDecay> {
    let eligible: Vec<&Plant> = plants
        .iter()
        .filter(|plant| plant.health().value() > WITHER_THRESHOLD)
        .collect();

    random
        .sample_indices(eligible.len(), MAX_DECAYED_PLANTS)
        .into_iter()
        .filter_map(|index| eligible.get(index))
        .map(|plant| PlantDecay {
            plant_id: plant.id(),
            previous_health: plant.health(),
            new_health: plant.health().offset(-DECAY_AMOUNT),
        })
        .collect()
}
