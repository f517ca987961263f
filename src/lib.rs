//! Gardenkeep: task commitments that grow a garden.
//!
//! Users commit to tasks with a concrete completion contract. Completing a
//! task asks an external evaluator how plausible the user's reflection is,
//! and that verdict decides which plant grows, how healthy it is, and how
//! the user's aggregate garden health moves. Abandoning a task counts as
//! the worst verdict.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, randomness, and
//!   external collaborators
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`ledger`]: Tasks, their ordered steps, and the status state machine
//! - [`garden`]: Plants, placement, growth, aggregate health, and decay
//! - [`lifecycle`]: Orchestration of task events into garden changes
//! - [`mood`]: Daily mood check-ins and their replies
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber bootstrap

pub mod config;
pub mod garden;
pub mod ledger;
pub mod lifecycle;
pub mod mood;
pub mod telemetry;
