//! Lifecycle orchestration: task events turned into garden changes.
//!
//! The orchestrator sequences the ledger state machine with the garden
//! services and hands every write of a completion or abandonment to a
//! single unit of work:
//!
//! - Collaborator and unit-of-work contracts in [`ports`]
//! - Store and collaborator implementations in [`adapters`]
//! - The orchestrator itself in [`services`]

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
