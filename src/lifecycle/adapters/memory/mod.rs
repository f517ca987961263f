//! In-memory store and scripted collaborators for tests and local runs.

mod collaborators;
mod store;

pub use collaborators::{
    ScriptedMoodResponder, ScriptedPlausibilityEvaluator, ScriptedQuestionGenerator,
};
pub use store::InMemoryGardenStore;
