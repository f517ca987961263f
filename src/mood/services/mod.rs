//! Application services for mood check-ins.

mod error;
mod journal;

pub use error::{MoodError, MoodResult};
pub use journal::MoodJournalService;
