//! Port contracts for lifecycle orchestration.

mod collaborators;
mod unit_of_work;

pub use collaborators::{
    CollaboratorError, CollaboratorResult, EvaluationRequest, PlausibilityEvaluator,
    QuestionRequest, ReflectionQuestionGenerator,
};
pub use unit_of_work::{
    CommitError, CommitResult, CommittedEvent, PlantHealthUpdate, TaskEventCommit,
    TaskEventCommitter,
};
