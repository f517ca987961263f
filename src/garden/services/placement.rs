//! Placement allocator: picks the grid cell for a new plant.

use crate::garden::domain::{GRID_SIZE, GridPosition};
use crate::garden::ports::RandomSource;
use std::collections::HashSet;

/// Returns the first free cell in row-major scan order.
///
/// When all cells are taken a uniformly random cell is returned and the new
/// plant shares it with an existing one. The result depends only on the
/// supplied occupancy, so callers must pass their current plant set on every
/// call.
pub fn allocate(
    occupied: impl IntoIterator<Item = GridPosition>,
    random: &(impl RandomSource + ?Sized),
) -> GridPosition {
    let taken: HashSet<GridPosition> = occupied.into_iter().collect();
    if let Some(free) = GridPosition::scan_order().find(|cell| !taken.contains(cell)) {
        return free;
    }
    overflow_position(random)
}

fn overflow_position(random: &(impl RandomSource + ?Sized)) -> GridPosition {
    let edge = usize::from(GRID_SIZE);
    let x = random.index_below(edge);
    let y = random.index_below(edge);
    GridPosition::clamped(x, y)
}
