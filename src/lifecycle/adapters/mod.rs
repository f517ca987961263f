//! Adapter implementations for lifecycle ports.

pub mod memory;
pub mod postgres;
