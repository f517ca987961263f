//! Cells of the fixed garden grid.

use super::GardenDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge length of the square garden grid.
pub const GRID_SIZE: u8 = 8;

/// A cell in the garden grid, `x` and `y` both in `0..GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    x: u8,
    y: u8,
}

impl GridPosition {
    /// The first cell in scan order.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a validated grid position.
    ///
    /// # Errors
    ///
    /// Returns [`GardenDomainError::PositionOutOfGrid`] when either
    /// coordinate falls outside the grid.
    pub fn new(x: i64, y: i64) -> Result<Self, GardenDomainError> {
        let in_grid = |value: i64| u8::try_from(value).ok().filter(|cell| *cell < GRID_SIZE);
        match (in_grid(x), in_grid(y)) {
            (Some(column), Some(row)) => Ok(Self { x: column, y: row }),
            _ => Err(GardenDomainError::PositionOutOfGrid {
                x,
                y,
                size: GRID_SIZE,
            }),
        }
    }

    /// Creates a position from raw indices, pinning each one to the last
    /// row or column when it lies past the grid edge.
    #[must_use]
    pub fn clamped(x: usize, y: usize) -> Self {
        let edge = GRID_SIZE - 1;
        let pin = |value: usize| u8::try_from(value).map_or(edge, |cell| cell.min(edge));
        Self {
            x: pin(x),
            y: pin(y),
        }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Iterates every cell in row-major order: `x` increases first, then `y`.
    pub fn scan_order() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Self { x, y }))
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn cell_count() -> usize {
        usize::from(GRID_SIZE) * usize::from(GRID_SIZE)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
