//! Port contracts for garden persistence and randomness.

mod random;
mod repository;

pub use random::RandomSource;
pub use repository::{
    GardenRepository, GardenRepositoryError, GardenRepositoryResult, GardenSnapshot,
};
