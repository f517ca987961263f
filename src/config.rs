//! Runtime configuration for the lifecycle orchestrator.
//!
//! Values can be set via environment variables:
//! - `GARDENKEEP_EVALUATION_TIMEOUT_SECS` - Optional. Seconds to wait for the
//!   plausibility evaluator and question generator. Defaults to `30`.
//! - `GARDENKEEP_FALLBACK_QUESTION` - Optional. Reflection question used when
//!   generation fails.
//! - `GARDENKEEP_MAX_COMMIT_ATTEMPTS` - Optional. How many times a task event
//!   is re-read and re-committed after a concurrent write. Defaults to `3`.
//! - `GARDENKEEP_FALLBACK_MOOD_RESPONSE` - Optional. Reply stored with a mood
//!   check-in when the responder fails.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the collaborator timeout in seconds.
pub const EVALUATION_TIMEOUT_VAR: &str = "GARDENKEEP_EVALUATION_TIMEOUT_SECS";
/// Environment variable holding the fallback reflection question.
pub const FALLBACK_QUESTION_VAR: &str = "GARDENKEEP_FALLBACK_QUESTION";
/// Environment variable holding the commit attempt budget.
pub const MAX_COMMIT_ATTEMPTS_VAR: &str = "GARDENKEEP_MAX_COMMIT_ATTEMPTS";
/// Environment variable holding the fallback mood reply.
pub const FALLBACK_MOOD_RESPONSE_VAR: &str = "GARDENKEEP_FALLBACK_MOOD_RESPONSE";

/// Question asked when the generator cannot produce one.
pub const DEFAULT_FALLBACK_QUESTION: &str =
    "What did you actually create, and where can someone see it?";

/// Reply stored with a mood check-in when the responder cannot produce one.
pub const DEFAULT_FALLBACK_MOOD_RESPONSE: &str =
    "Thank you for sharing. Your garden appreciates you showing up today.";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Orchestrator tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Upper bound on each collaborator call.
    pub evaluation_timeout: Duration,
    /// Question returned when generation fails.
    pub fallback_question: String,
    /// Commit attempts per task event, at least one.
    pub max_commit_attempts: u32,
    /// Reply stored when the mood responder fails.
    pub fallback_mood_response: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            evaluation_timeout: Duration::from_secs(30),
            fallback_question: DEFAULT_FALLBACK_QUESTION.to_owned(),
            max_commit_attempts: 3,
            fallback_mood_response: DEFAULT_FALLBACK_MOOD_RESPONSE.to_owned(),
        }
    }
}

impl LifecycleConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be used.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let evaluation_timeout = read(EVALUATION_TIMEOUT_VAR)
            .map(|raw| parse_positive(EVALUATION_TIMEOUT_VAR, &raw).map(Duration::from_secs))
            .transpose()?
            .unwrap_or(defaults.evaluation_timeout);
        let fallback_question =
            read(FALLBACK_QUESTION_VAR).unwrap_or(defaults.fallback_question);
        let max_commit_attempts = read(MAX_COMMIT_ATTEMPTS_VAR)
            .map(|raw| {
                parse_positive(MAX_COMMIT_ATTEMPTS_VAR, &raw).and_then(|attempts| {
                    u32::try_from(attempts).map_err(|_| ConfigError::InvalidValue {
                        name: MAX_COMMIT_ATTEMPTS_VAR,
                        value: raw.clone(),
                    })
                })
            })
            .transpose()?
            .unwrap_or(defaults.max_commit_attempts);
        let fallback_mood_response =
            read(FALLBACK_MOOD_RESPONSE_VAR).unwrap_or(defaults.fallback_mood_response);

        Ok(Self {
            evaluation_timeout,
            fallback_question,
            max_commit_attempts,
            fallback_mood_response,
        })
    }

    /// Sets the collaborator timeout.
    #[must_use]
    pub const fn with_evaluation_timeout(mut self, timeout: Duration) -> Self {
        self.evaluation_timeout = timeout;
        self
    }

    /// Sets the fallback reflection question.
    #[must_use]
    pub fn with_fallback_question(mut self, question: impl Into<String>) -> Self {
        self.fallback_question = question.into();
        self
    }

    /// Sets the fallback mood reply.
    #[must_use]
    pub fn with_fallback_mood_response(mut self, response: impl Into<String>) -> Self {
        self.fallback_mood_response = response.into();
        self
    }

    /// Sets the commit attempt budget; zero is raised to one.
    #[must_use]
    pub fn with_max_commit_attempts(mut self, attempts: u32) -> Self {
        self.max_commit_attempts = attempts.max(1);
        self
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            name,
            value: raw.to_owned(),
        })
}
