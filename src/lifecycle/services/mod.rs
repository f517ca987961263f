//! Application services for the task-to-garden lifecycle.

mod error;
mod lifecycle;
mod requests;

pub use error::{LifecycleError, LifecycleResult, MissingEntity, StorageError};
pub use lifecycle::GardenLifecycleService;
pub use requests::{AbandonmentSummary, CompletionSummary, CreateTaskRequest};
