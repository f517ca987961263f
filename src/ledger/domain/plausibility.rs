//! Plausibility verdicts produced by the external evaluator.

use super::{ParsePlausibilityLevelError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical judgment of whether a reflection reflects genuine work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlausibilityLevel {
    /// The reflection is consistent with the promised deliverable.
    High,
    /// The reflection is partially convincing.
    Medium,
    /// The reflection does not support the claimed completion.
    Low,
}

impl PlausibilityLevel {
    /// Every plausibility level, best first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for PlausibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PlausibilityLevel {
    type Error = ParsePlausibilityLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePlausibilityLevelError(value.to_owned())),
        }
    }
}

/// Numeric plausibility score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PlausibilityScore(u8);

impl PlausibilityScore {
    /// Highest representable score.
    pub const MAX: u8 = 100;

    /// Creates a validated score.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPlausibilityScore`] when the value
    /// exceeds 100.
    pub fn new(value: u32) -> Result<Self, TaskDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|score| *score <= Self::MAX)
            .map(Self)
            .ok_or(TaskDomainError::InvalidPlausibilityScore(value))
    }

    /// Returns the score value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for PlausibilityScore {
    type Error = TaskDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlausibilityScore> for u32 {
    fn from(score: PlausibilityScore) -> Self {
        Self::from(score.0)
    }
}

impl fmt::Display for PlausibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full evaluator output for a completion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlausibilityVerdict {
    score: PlausibilityScore,
    level: PlausibilityLevel,
    reasoning: String,
}

impl PlausibilityVerdict {
    /// Creates a verdict.
    #[must_use]
    pub fn new(
        score: PlausibilityScore,
        level: PlausibilityLevel,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            score,
            level,
            reasoning: reasoning.into(),
        }
    }

    /// Returns the numeric score.
    #[must_use]
    pub const fn score(&self) -> PlausibilityScore {
        self.score
    }

    /// Returns the categorical level.
    #[must_use]
    pub const fn level(&self) -> PlausibilityLevel {
        self.level
    }

    /// Returns the evaluator's internal reasoning.
    #[must_use]
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }
}
