//! Daily mood check-ins with a short supportive reply.
//!
//! - Check-in records and mood values in [`domain`]
//! - Storage and responder contracts in [`ports`]
//! - The check-in journal in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
