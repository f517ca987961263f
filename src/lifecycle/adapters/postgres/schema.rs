//! Diesel schema for garden persistence.

diesel::table! {
    /// One record per user: aggregate health and counters.
    gardeners (id) {
        /// User identifier.
        id -> Uuid,
        /// Aggregate garden health in `0..=100`.
        garden_health -> Int4,
        /// Completed-task counter.
        total_tasks_completed -> Int4,
        /// Onboarding flag.
        onboarding_completed -> Bool,
        /// Optimistic-concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Committed tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Promised deliverable.
        completion_contract -> Text,
        /// Effort weight.
        #[max_length = 20]
        effort_weight -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Stored reflection question.
        reflection_question -> Nullable<Text>,
        /// Reflection given on completion.
        reflection_response -> Nullable<Text>,
        /// Evaluator score, set only when completed.
        plausibility_score -> Nullable<Int4>,
        /// Evaluator level, set only when completed.
        #[max_length = 20]
        plausibility_level -> Nullable<Varchar>,
        /// Completion timestamp, set only when completed.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Optimistic-concurrency version.
        version -> Int8,
    }
}

diesel::table! {
    /// Ordered task steps.
    subtasks (id) {
        /// Subtask identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Step title.
        title -> Text,
        /// Step effort weight.
        #[max_length = 20]
        effort_weight -> Varchar,
        /// Completion flag.
        is_completed -> Bool,
        /// Position within the task.
        order_index -> Int4,
    }
}

diesel::table! {
    /// Plants grown from completed tasks.
    plants (id) {
        /// Plant identifier.
        id -> Uuid,
        /// Garden owner.
        owner_id -> Uuid,
        /// Task the plant grew from.
        task_id -> Nullable<Uuid>,
        /// Species.
        #[max_length = 30]
        plant_type -> Varchar,
        /// Growth stage in `0..=5`.
        growth_stage -> Int4,
        /// Health in `0..=100`.
        health -> Int4,
        /// Grid column.
        position_x -> Int4,
        /// Grid row.
        position_y -> Int4,
        /// Planting timestamp.
        created_at -> Timestamptz,
        /// Last health change.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Daily mood check-ins.
    moods (id) {
        /// Check-in identifier.
        id -> Uuid,
        /// User who checked in.
        owner_id -> Uuid,
        /// Reported mood.
        #[max_length = 20]
        mood -> Varchar,
        /// Optional note.
        note -> Nullable<Text>,
        /// Reply shown to the user.
        ai_response -> Text,
        /// Check-in timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> gardeners (owner_id));
diesel::joinable!(subtasks -> tasks (task_id));
diesel::joinable!(plants -> gardeners (owner_id));
diesel::joinable!(moods -> gardeners (owner_id));

diesel::allow_tables_to_appear_in_same_query!(gardeners, tasks, subtasks, plants, moods);
