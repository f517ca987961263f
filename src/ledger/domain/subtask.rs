//! Ordered steps belonging to a task.

use super::{EffortWeight, SubtaskId};
use serde::{Deserialize, Serialize};

/// A single ordered step of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    effort_weight: EffortWeight,
    is_completed: bool,
    order_index: u32,
}

impl Subtask {
    /// Creates a new, incomplete subtask at the given position.
    #[must_use]
    pub fn new(title: impl Into<String>, effort_weight: EffortWeight, order_index: u32) -> Self {
        Self {
            id: SubtaskId::new(),
            title: title.into(),
            effort_weight,
            is_completed: false,
            order_index,
        }
    }

    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubtaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            effort_weight: data.effort_weight,
            is_completed: data.is_completed,
            order_index: data.order_index,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the subtask effort weight.
    #[must_use]
    pub const fn effort_weight(&self) -> EffortWeight {
        self.effort_weight
    }

    /// Returns whether the step has been ticked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the position of this step within its task.
    #[must_use]
    pub const fn order_index(&self) -> u32 {
        self.order_index
    }

    pub(super) const fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}

/// Parameter object for reconstructing a persisted subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubtaskData {
    /// Persisted subtask identifier.
    pub id: SubtaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted effort weight.
    pub effort_weight: EffortWeight,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted order index.
    pub order_index: u32,
}
