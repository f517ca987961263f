//! Task ledger: committed tasks, their ordered steps, and status transitions.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//!
//! Adapters live with the lifecycle orchestrator because a single store
//! backs tasks, gardens, and the unit of work that spans them.

pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
