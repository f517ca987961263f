//! Domain model for the reward garden.
//!
//! A garden is a fixed grid of plants plus one aggregate health scalar held
//! on the owner's [`Gardener`] record.

mod error;
mod gardener;
mod ids;
mod plant;
mod position;
mod species;
mod vitals;

pub use error::{GardenDomainError, ParsePlantTypeError};
pub use gardener::{Gardener, PersistedGardenerData};
pub use ids::PlantId;
pub use plant::{NewPlant, PersistedPlantData, Plant};
pub use position::{GRID_SIZE, GridPosition};
pub use species::{PlantType, SPECIES_PER_POOL};
pub use vitals::{GrowthStage, Health};
