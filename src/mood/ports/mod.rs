//! Port contracts for mood check-ins.

mod repository;
mod responder;

pub use repository::{MoodRepository, MoodRepositoryError, MoodRepositoryResult};
pub use responder::{MoodRequest, MoodResponder};
