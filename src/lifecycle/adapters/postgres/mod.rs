//! `PostgreSQL` adapters for tasks, gardens, mood check-ins, and the
//! task-event unit of work.

mod conversions;
mod models;
mod repository;
mod schema;

pub use repository::{GardenPgPool, PostgresGardenStore};
