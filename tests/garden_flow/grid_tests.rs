//! Placement as the garden fills up.

use std::collections::HashSet;

use crate::garden_flow::helpers::{Flow, flow};
use gardenkeep::garden::domain::GridPosition;
use gardenkeep::ledger::domain::PlausibilityLevel;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plants_fill_cells_in_scan_order(flow: Flow) {
    for round in 0..10 {
        flow.finish(&format!("Chore {round}"), PlausibilityLevel::High)
            .await;
    }

    let garden = flow
        .service
        .garden(flow.owner)
        .await
        .expect("garden should load");
    let placed: Vec<GridPosition> = garden.plants.iter().map(|plant| plant.position()).collect();
    let expected: Vec<GridPosition> = GridPosition::scan_order().take(10).collect();
    assert_eq!(placed, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_full_grid_still_accepts_plants(flow: Flow) {
    let cells = GridPosition::cell_count();
    for round in 0..=cells {
        flow.finish(&format!("Chore {round}"), PlausibilityLevel::Medium)
            .await;
    }

    let garden = flow
        .service
        .garden(flow.owner)
        .await
        .expect("garden should load");
    let occupied: HashSet<GridPosition> =
        garden.plants.iter().map(|plant| plant.position()).collect();
    assert_eq!(garden.plants.len(), cells + 1);
    assert_eq!(occupied.len(), cells);
    assert_eq!(garden.gardener.total_tasks_completed(), 65);
}
