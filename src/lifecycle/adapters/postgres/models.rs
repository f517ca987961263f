//! Diesel row models for garden persistence.

use super::schema::{gardeners, moods, plants, subtasks, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for gardener records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = gardeners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GardenerRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Aggregate garden health.
    pub garden_health: i32,
    /// Completed-task counter.
    pub total_tasks_completed: i32,
    /// Onboarding flag.
    pub onboarding_completed: bool,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable gardener columns; `version` is bumped by the update query.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = gardeners)]
pub struct GardenerChanges {
    /// Aggregate garden health.
    pub garden_health: i32,
    /// Completed-task counter.
    pub total_tasks_completed: i32,
    /// Onboarding flag.
    pub onboarding_completed: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Promised deliverable.
    pub completion_contract: String,
    /// Effort weight.
    pub effort_weight: String,
    /// Lifecycle status.
    pub status: String,
    /// Stored reflection question.
    pub reflection_question: Option<String>,
    /// Reflection given on completion.
    pub reflection_response: Option<String>,
    /// Evaluator score.
    pub plausibility_score: Option<i32>,
    /// Evaluator level.
    pub plausibility_level: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}

/// Mutable task columns. `None` clears the column; `version` is bumped by
/// the update query.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChanges {
    /// Lifecycle status.
    pub status: String,
    /// Stored reflection question.
    pub reflection_question: Option<String>,
    /// Reflection given on completion.
    pub reflection_response: Option<String>,
    /// Evaluator score.
    pub plausibility_score: Option<i32>,
    /// Evaluator level.
    pub plausibility_level: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Query result row for subtask records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = subtasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubtaskRow {
    /// Subtask identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Step title.
    pub title: String,
    /// Step effort weight.
    pub effort_weight: String,
    /// Completion flag.
    pub is_completed: bool,
    /// Position within the task.
    pub order_index: i32,
}

/// Query result row for plant records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = plants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlantRow {
    /// Plant identifier.
    pub id: uuid::Uuid,
    /// Garden owner.
    pub owner_id: uuid::Uuid,
    /// Task the plant grew from.
    pub task_id: Option<uuid::Uuid>,
    /// Species.
    pub plant_type: String,
    /// Growth stage.
    pub growth_stage: i32,
    /// Health.
    pub health: i32,
    /// Grid column.
    pub position_x: i32,
    /// Grid row.
    pub position_y: i32,
    /// Planting timestamp.
    pub created_at: DateTime<Utc>,
    /// Last health change.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for mood check-ins.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = moods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MoodRow {
    /// Check-in identifier.
    pub id: uuid::Uuid,
    /// User who checked in.
    pub owner_id: uuid::Uuid,
    /// Reported mood.
    pub mood: String,
    /// Optional note.
    pub note: Option<String>,
    /// Reply shown to the user.
    pub ai_response: String,
    /// Check-in timestamp.
    pub created_at: DateTime<Utc>,
}
