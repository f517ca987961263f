//! Adapter implementations for garden ports.

mod random;

pub use random::{ScriptedRandomSource, SeededRandomSource, ThreadRandomSource};
