//! Scripted collaborator adapters that replay queued answers.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::ledger::domain::PlausibilityVerdict;
use crate::lifecycle::ports::{
    CollaboratorError, CollaboratorResult, EvaluationRequest, PlausibilityEvaluator,
    QuestionRequest, ReflectionQuestionGenerator,
};
use crate::mood::ports::{MoodRequest, MoodResponder};

#[derive(Debug)]
struct Script<Request, Answer> {
    answers: VecDeque<CollaboratorResult<Answer>>,
    requests: Vec<Request>,
    delay: Option<Duration>,
}

impl<Request, Answer> Default for Script<Request, Answer> {
    fn default() -> Self {
        Self {
            answers: VecDeque::new(),
            requests: Vec::new(),
            delay: None,
        }
    }
}

impl<Request: Clone, Answer> Script<Request, Answer> {
    fn record(&mut self, request: &Request) -> (Option<Duration>, CollaboratorResult<Answer>) {
        self.requests.push(request.clone());
        let answer = self.answers.pop_front().unwrap_or_else(|| {
            Err(CollaboratorError::InvalidResponse(
                "no scripted answer left".to_owned(),
            ))
        });
        (self.delay, answer)
    }
}

async fn replay<Request: Clone, Answer>(
    script: &Mutex<Script<Request, Answer>>,
    request: &Request,
) -> CollaboratorResult<Answer> {
    let (delay, answer) = script
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .record(request);
    if let Some(pause) = delay {
        tokio::time::sleep(pause).await;
    }
    answer
}

/// Plausibility evaluator that answers from a queue of verdicts.
///
/// An exhausted queue answers with [`CollaboratorError::InvalidResponse`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlausibilityEvaluator {
    script: Arc<Mutex<Script<EvaluationRequest, PlausibilityVerdict>>>,
}

impl ScriptedPlausibilityEvaluator {
    /// Creates an evaluator with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a verdict.
    #[must_use]
    pub fn with_verdict(self, verdict: PlausibilityVerdict) -> Self {
        self.push(Ok(verdict));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_failure(self, error: CollaboratorError) -> Self {
        self.push(Err(error));
        self
    }

    /// Delays every answer, for exercising timeouts.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .delay = Some(delay);
        self
    }

    /// Queues an answer on a shared handle.
    pub fn push(&self, answer: CollaboratorResult<PlausibilityVerdict>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .answers
            .push_back(answer);
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<EvaluationRequest> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }
}

#[async_trait]
impl PlausibilityEvaluator for ScriptedPlausibilityEvaluator {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> CollaboratorResult<PlausibilityVerdict> {
        replay(&self.script, request).await
    }
}

/// Reflection question generator that answers from a queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptedQuestionGenerator {
    script: Arc<Mutex<Script<QuestionRequest, String>>>,
}

impl ScriptedQuestionGenerator {
    /// Creates a generator with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a question.
    #[must_use]
    pub fn with_question(self, question: impl Into<String>) -> Self {
        self.push(Ok(question.into()));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_failure(self, error: CollaboratorError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queues an answer on a shared handle.
    pub fn push(&self, answer: CollaboratorResult<String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .answers
            .push_back(answer);
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<QuestionRequest> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }
}

#[async_trait]
impl ReflectionQuestionGenerator for ScriptedQuestionGenerator {
    async fn generate(&self, request: &QuestionRequest) -> CollaboratorResult<String> {
        replay(&self.script, request).await
    }
}

/// Mood responder that answers from a queue of replies.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoodResponder {
    script: Arc<Mutex<Script<MoodRequest, String>>>,
}

impl ScriptedMoodResponder {
    /// Creates a responder with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    #[must_use]
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_failure(self, error: CollaboratorError) -> Self {
        self.push(Err(error));
        self
    }

    /// Delays every answer, for exercising timeouts.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .delay = Some(delay);
        self
    }

    /// Queues an answer on a shared handle.
    pub fn push(&self, answer: CollaboratorResult<String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .answers
            .push_back(answer);
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<MoodRequest> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }
}

#[async_trait]
impl MoodResponder for ScriptedMoodResponder {
    async fn respond(&self, request: &MoodRequest) -> CollaboratorResult<String> {
        replay(&self.script, request).await
    }
}
