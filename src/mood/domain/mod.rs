//! Domain model for mood check-ins.

mod error;
mod ids;
mod kind;
mod mood;

pub use error::ParseMoodKindError;
pub use ids::MoodId;
pub use kind::MoodKind;
pub use mood::{Mood, NewMood, PersistedMoodData};
