//! Error kinds surfaced by the mood journal.

use crate::garden::ports::GardenRepositoryError;
use crate::mood::ports::MoodRepositoryError;
use thiserror::Error;

/// Result type for mood journal operations.
pub type MoodResult<T> = Result<T, MoodError>;

/// Failures returned by mood journal operations.
///
/// A failing responder is not an error; the check-in keeps the fallback
/// reply instead.
#[derive(Debug, Clone, Error)]
pub enum MoodError {
    /// Check-in storage failed.
    #[error("mood repository failure: {0}")]
    Moods(#[from] MoodRepositoryError),

    /// The owner's garden record could not be ensured.
    #[error("garden repository failure: {0}")]
    Garden(#[from] GardenRepositoryError),
}
