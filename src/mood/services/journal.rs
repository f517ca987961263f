//! Mood journal: record a check-in, reply to it, list recent ones.

use super::MoodResult;
use crate::config::LifecycleConfig;
use crate::garden::{domain::Gardener, ports::GardenRepository};
use crate::ledger::domain::UserId;
use crate::lifecycle::ports::CollaboratorError;
use crate::mood::{
    domain::{Mood, MoodKind, NewMood},
    ports::{MoodRepository, MoodRequest, MoodResponder},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Mood check-in service.
///
/// Every check-in gets a reply. When the responder fails, times out, or
/// answers with nothing, the configured fallback reply is stored instead.
#[derive(Clone)]
pub struct MoodJournalService<S, M, C>
where
    S: MoodRepository + GardenRepository,
    M: MoodResponder,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    responder: Arc<M>,
    clock: Arc<C>,
    config: LifecycleConfig,
}

impl<S, M, C> MoodJournalService<S, M, C>
where
    S: MoodRepository + GardenRepository,
    M: MoodResponder,
    C: Clock + Send + Sync,
{
    /// How far back [`Self::recent_moods`] looks, in days.
    pub const RECENT_WINDOW_DAYS: i64 = 30;

    /// Most check-ins [`Self::recent_moods`] returns.
    pub const RECENT_LIMIT: usize = 30;

    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, responder: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            store,
            responder,
            clock,
            config: LifecycleConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Records a check-in and the reply to it.
    ///
    /// The note is trimmed and a blank one is dropped. The owner's garden
    /// record is created on first reference.
    ///
    /// # Errors
    ///
    /// Returns [`super::MoodError`] when storage fails. Responder failures
    /// never surface.
    #[tracing::instrument(skip(self, note))]
    pub async fn record_mood(
        &self,
        owner: UserId,
        mood: MoodKind,
        note: Option<&str>,
    ) -> MoodResult<Mood> {
        self.store
            .find_or_create_gardener(&Gardener::new(owner, &*self.clock))
            .await?;
        let note = note.map(str::trim).filter(|text| !text.is_empty());
        let request = MoodRequest::new(mood, note.map(str::to_owned));
        let ai_response = self.respond(&request).await;
        let entry = Mood::new(
            NewMood {
                owner,
                mood,
                note: request.note,
                ai_response,
            },
            &*self.clock,
        );
        self.store.store_mood(&entry).await?;
        debug!(mood_id = %entry.id(), "mood recorded");
        Ok(entry)
    }

    /// Returns the owner's check-ins from the last
    /// [`Self::RECENT_WINDOW_DAYS`] days, newest first, at most
    /// [`Self::RECENT_LIMIT`] of them.
    ///
    /// # Errors
    ///
    /// Returns [`super::MoodError::Moods`] when storage fails.
    pub async fn recent_moods(&self, owner: UserId) -> MoodResult<Vec<Mood>> {
        let since = self.window_start();
        Ok(self
            .store
            .recent_moods(owner, since, Self::RECENT_LIMIT)
            .await?)
    }

    fn window_start(&self) -> DateTime<Utc> {
        let now = self.clock.utc();
        TimeDelta::try_days(Self::RECENT_WINDOW_DAYS)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    async fn respond(&self, request: &MoodRequest) -> String {
        let timeout = self.config.evaluation_timeout;
        let failure = match tokio::time::timeout(timeout, self.responder.respond(request)).await {
            Ok(Ok(reply)) if !reply.trim().is_empty() => return reply.trim().to_owned(),
            Ok(Ok(_)) => CollaboratorError::InvalidResponse("blank reply".to_owned()),
            Ok(Err(err)) => err,
            Err(_) => CollaboratorError::TimedOut(timeout),
        };
        warn!(error = %failure, "mood response failed, using fallback");
        self.config.fallback_mood_response.clone()
    }
}
