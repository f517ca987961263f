//! Aggregate health and decay across mixed outcomes.

use crate::garden_flow::helpers::{Flow, flow};
use gardenkeep::ledger::domain::{EffortWeight, PlausibilityLevel};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_tracks_the_sequence_of_outcomes(flow: Flow) {
    for level in [
        PlausibilityLevel::Low,
        PlausibilityLevel::Low,
        PlausibilityLevel::High,
        PlausibilityLevel::Medium,
    ] {
        flow.finish("Practice scales", level).await;
    }
    let dropped = flow.commit_to("Learn a new piece", EffortWeight::Heavy).await;
    let summary = flow
        .service
        .abandon(flow.owner, dropped.id())
        .await
        .expect("abandon should succeed");

    assert_eq!(summary.garden_health.value(), 75);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn withered_plants_stop_decaying(flow: Flow) {
    flow.finish("Stretch", PlausibilityLevel::High).await;
    for round in 0..8 {
        let dropped = flow
            .commit_to(&format!("Run {round}"), EffortWeight::Light)
            .await;
        flow.service
            .abandon(flow.owner, dropped.id())
            .await
            .expect("abandon should succeed");
    }

    let garden = flow
        .service
        .garden(flow.owner)
        .await
        .expect("garden should load");
    let plant = garden.plants.first().expect("one plant should exist");
    assert_eq!(plant.health().value(), 10);
    assert_eq!(garden.gardener.garden_health().value(), 20);
}
