//! Ports for the external language-model collaborators.

use crate::ledger::domain::{EffortWeight, PlausibilityVerdict, Task};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Context sent to the plausibility evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// Task title.
    pub title: String,
    /// Subtask titles in order.
    pub subtask_titles: Vec<String>,
    /// Task effort weight.
    pub effort_weight: EffortWeight,
    /// Promised deliverable.
    pub completion_contract: String,
    /// The user's reflection on what they did.
    pub reflection_response: String,
}

impl EvaluationRequest {
    /// Builds the evaluator context for a task and its reflection.
    #[must_use]
    pub fn for_task(task: &Task, reflection_response: impl Into<String>) -> Self {
        Self {
            title: task.title().to_owned(),
            subtask_titles: task.subtask_titles(),
            effort_weight: task.effort_weight(),
            completion_contract: task.completion_contract().to_owned(),
            reflection_response: reflection_response.into(),
        }
    }
}

/// Context sent to the reflection question generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    /// Task title.
    pub title: String,
    /// Subtask titles in order.
    pub subtask_titles: Vec<String>,
    /// Promised deliverable.
    pub completion_contract: String,
}

impl QuestionRequest {
    /// Contract text used when a task has none.
    pub const FALLBACK_CONTRACT: &'static str = "Something meaningful";

    /// Builds the generator context for a task.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        let contract = task.completion_contract().trim();
        let completion_contract = if contract.is_empty() {
            Self::FALLBACK_CONTRACT.to_owned()
        } else {
            contract.to_owned()
        };
        Self {
            title: task.title().to_owned(),
            subtask_titles: task.subtask_titles(),
            completion_contract,
        }
    }
}

/// Scores how plausible a completion claim is.
#[async_trait]
pub trait PlausibilityEvaluator: Send + Sync {
    /// Evaluates a completion claim.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when the evaluator is unavailable or
    /// returns an unusable verdict.
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> CollaboratorResult<PlausibilityVerdict>;
}

/// Writes the question a user answers when finishing a task.
#[async_trait]
pub trait ReflectionQuestionGenerator: Send + Sync {
    /// Generates one reflection question.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when generation fails.
    async fn generate(&self, request: &QuestionRequest) -> CollaboratorResult<String>;
}

/// Result type for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Errors returned by external collaborators.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// The call did not finish in time.
    #[error("collaborator call timed out after {0:?}")]
    TimedOut(Duration),

    /// The collaborator answered with something unusable.
    #[error("collaborator returned an invalid response: {0}")]
    InvalidResponse(String),

    /// The collaborator could not be reached or failed.
    #[error("collaborator unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CollaboratorError {
    /// Wraps a transport or provider failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
