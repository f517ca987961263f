//! In-memory integration tests for the task-to-garden flow.
//!
//! Tests are organized into modules by functionality:
//! - `journey_tests`: A task from commitment to a grown plant
//! - `grid_tests`: Placement as the garden fills and overflows
//! - `health_tests`: Aggregate health across mixed outcomes

mod garden_flow {
    pub mod helpers;

    mod grid_tests;
    mod health_tests;
    mod journey_tests;
}
