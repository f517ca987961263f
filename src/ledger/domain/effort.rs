//! Coarse effort classification shared by tasks and subtasks.

use super::ParseEffortWeightError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size classification of a task or subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortWeight {
    /// Small, quick piece of work.
    Light,
    /// Moderate piece of work.
    Medium,
    /// Large piece of work.
    Heavy,
}

impl EffortWeight {
    /// Every effort weight, in ascending order of size.
    pub const ALL: [Self; 3] = [Self::Light, Self::Medium, Self::Heavy];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }
}

impl fmt::Display for EffortWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EffortWeight {
    type Error = ParseEffortWeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            _ => Err(ParseEffortWeightError(value.to_owned())),
        }
    }
}
