//! The five moods a user can check in with.

use super::ParseMoodKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user says they feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodKind {
    /// Feeling great.
    Great,
    /// Feeling good.
    Good,
    /// Feeling okay.
    Okay,
    /// Not feeling great.
    NotGreat,
    /// Struggling.
    Struggling,
}

impl MoodKind {
    /// Every mood, from best to worst.
    pub const ALL: [Self; 5] = [
        Self::Great,
        Self::Good,
        Self::Okay,
        Self::NotGreat,
        Self::Struggling,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::NotGreat => "not_great",
            Self::Struggling => "struggling",
        }
    }

    /// Returns the phrase used when describing the user to the responder.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Great => "feeling great",
            Self::Good => "feeling good",
            Self::Okay => "feeling okay",
            Self::NotGreat => "not feeling great",
            Self::Struggling => "struggling",
        }
    }
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MoodKind {
    type Error = ParseMoodKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseMoodKindError(value.to_owned()))
    }
}
