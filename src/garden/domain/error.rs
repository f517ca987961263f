//! Error types for garden domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing garden domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GardenDomainError {
    /// A health value fell outside `0..=100`.
    #[error("health {0} is outside 0..=100")]
    InvalidHealth(i64),

    /// A growth stage fell outside `0..=5`.
    #[error("growth stage {0} is outside 0..=5")]
    InvalidGrowthStage(i64),

    /// A grid coordinate fell outside the garden grid.
    #[error("position ({x}, {y}) is outside the {size}x{size} grid")]
    PositionOutOfGrid {
        /// Rejected column.
        x: i64,
        /// Rejected row.
        y: i64,
        /// Grid edge length.
        size: u8,
    },
}

/// Error returned while parsing plant species.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown plant type: {0}")]
pub struct ParsePlantTypeError(pub String);
