//! Port for the collaborator that answers a check-in.

use crate::lifecycle::ports::CollaboratorResult;
use crate::mood::domain::MoodKind;
use async_trait::async_trait;

/// What the responder is told about a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodRequest {
    /// Reported mood.
    pub mood: MoodKind,
    /// Trimmed note, if the user wrote one.
    pub note: Option<String>,
}

impl MoodRequest {
    /// Builds a request from a reported mood and optional note.
    #[must_use]
    pub const fn new(mood: MoodKind, note: Option<String>) -> Self {
        Self { mood, note }
    }

    /// Describes the check-in in one or two sentences.
    ///
    /// ```
    /// use gardenkeep::mood::domain::MoodKind;
    /// use gardenkeep::mood::ports::MoodRequest;
    ///
    /// let request = MoodRequest::new(MoodKind::NotGreat, Some("long day".to_owned()));
    /// assert_eq!(
    ///     request.context(),
    ///     "The user is not feeling great. They shared: \"long day\""
    /// );
    /// ```
    #[must_use]
    pub fn context(&self) -> String {
        let feeling = format!("The user is {}.", self.mood.description());
        match &self.note {
            Some(note) => format!("{feeling} They shared: \"{note}\""),
            None => feeling,
        }
    }
}

/// Writes a short supportive reply to a check-in.
#[async_trait]
pub trait MoodResponder: Send + Sync {
    /// Generates the reply.
    ///
    /// # Errors
    ///
    /// Returns [`crate::lifecycle::ports::CollaboratorError`] when the
    /// responder is unavailable.
    async fn respond(&self, request: &MoodRequest) -> CollaboratorResult<String>;
}
