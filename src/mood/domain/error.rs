//! Error types for mood parsing.

use thiserror::Error;

/// Error returned while parsing a mood value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown mood: {0}")]
pub struct ParseMoodKindError(pub String);
