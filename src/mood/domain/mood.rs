//! A single mood check-in.

use super::{MoodId, MoodKind};
use crate::ledger::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for recording a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMood {
    /// User checking in.
    pub owner: UserId,
    /// Reported mood.
    pub mood: MoodKind,
    /// Optional elaboration; blank notes are dropped.
    pub note: Option<String>,
    /// Reply shown back to the user.
    pub ai_response: String,
}

/// A recorded mood check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    id: MoodId,
    owner: UserId,
    mood: MoodKind,
    note: Option<String>,
    ai_response: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMoodData {
    /// Persisted identifier.
    pub id: MoodId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted mood.
    pub mood: MoodKind,
    /// Persisted note.
    pub note: Option<String>,
    /// Persisted reply.
    pub ai_response: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Mood {
    /// Creates a check-in stamped with the current time.
    #[must_use]
    pub fn new(input: NewMood, clock: &impl Clock) -> Self {
        Self {
            id: MoodId::new(),
            owner: input.owner,
            mood: input.mood,
            note: normalize_note(input.note.as_deref()),
            ai_response: input.ai_response,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a check-in from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMoodData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            mood: data.mood,
            note: data.note,
            ai_response: data.ai_response,
            created_at: data.created_at,
        }
    }

    /// Returns the check-in identifier.
    #[must_use]
    pub const fn id(&self) -> MoodId {
        self.id
    }

    /// Returns the user who checked in.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the reported mood.
    #[must_use]
    pub const fn mood(&self) -> MoodKind {
        self.mood
    }

    /// Returns the note, if one was given.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the reply shown back to the user.
    #[must_use]
    pub fn ai_response(&self) -> &str {
        &self.ai_response
    }

    /// Returns the check-in time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trims a note, treating a blank one as absent.
fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
