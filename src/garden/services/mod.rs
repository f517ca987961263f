//! Pure garden rules, applied by the lifecycle orchestrator in this order:
//! [`growth`] before [`placement`], and [`aggregate`] before [`decay`].

pub mod aggregate;
pub mod decay;
pub mod growth;
pub mod placement;

pub use decay::PlantDecay;
pub use growth::{GrowthOutcome, GrowthProfile};
