//! Mapping between domain values and Diesel rows.

use super::models::{
    GardenerChanges, GardenerRow, MoodRow, PlantRow, SubtaskRow, TaskChanges, TaskRow,
};
use crate::garden::domain::{
    GardenDomainError, Gardener, GridPosition, GrowthStage, Health, ParsePlantTypeError,
    PersistedGardenerData, PersistedPlantData, Plant, PlantId, PlantType,
};
use crate::ledger::domain::{
    EffortWeight, ParseEffortWeightError, ParsePlausibilityLevelError, ParseTaskStatusError,
    PersistedSubtaskData, PersistedTaskData, PlausibilityLevel, PlausibilityScore, Subtask,
    SubtaskId, Task, TaskCompletion, TaskDomainError, TaskId, TaskStatus, UserId,
};
use crate::mood::domain::{Mood, MoodId, MoodKind, ParseMoodKindError, PersistedMoodData};
use thiserror::Error;

/// Failure while converting between rows and domain values.
#[derive(Debug, Error)]
pub(super) enum ConversionError {
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    #[error(transparent)]
    Effort(#[from] ParseEffortWeightError),
    #[error(transparent)]
    Level(#[from] ParsePlausibilityLevelError),
    #[error(transparent)]
    Species(#[from] ParsePlantTypeError),
    #[error(transparent)]
    Mood(#[from] ParseMoodKindError),
    #[error(transparent)]
    Ledger(#[from] TaskDomainError),
    #[error(transparent)]
    Garden(#[from] GardenDomainError),
    #[error("{column} value {value} does not fit its column")]
    OutOfRange { column: &'static str, value: i128 },
    #[error("completion columns of task {0} are only partially set")]
    PartialCompletion(uuid::Uuid),
}

fn fit<T, U>(column: &'static str, value: T) -> Result<U, ConversionError>
where
    T: Copy + Into<i128>,
    U: TryFrom<T>,
{
    U::try_from(value).map_err(|_| ConversionError::OutOfRange {
        column,
        value: value.into(),
    })
}

pub(super) fn task_row(task: &Task) -> Result<TaskRow, ConversionError> {
    let changes = task_changes(task);
    Ok(TaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner().into_inner(),
        title: task.title().to_owned(),
        completion_contract: task.completion_contract().to_owned(),
        effort_weight: task.effort_weight().as_str().to_owned(),
        status: changes.status,
        reflection_question: changes.reflection_question,
        reflection_response: changes.reflection_response,
        plausibility_score: changes.plausibility_score,
        plausibility_level: changes.plausibility_level,
        completed_at: changes.completed_at,
        created_at: task.created_at(),
        version: fit("version", task.version())?,
    })
}

pub(super) fn task_changes(task: &Task) -> TaskChanges {
    let completion = task.completion();
    TaskChanges {
        status: task.status().as_str().to_owned(),
        reflection_question: task.reflection_question().map(str::to_owned),
        reflection_response: task.reflection_response().map(str::to_owned),
        plausibility_score: completion.map(|done| i32::from(done.score.value())),
        plausibility_level: completion.map(|done| done.level.as_str().to_owned()),
        completed_at: completion.map(|done| done.completed_at),
    }
}

pub(super) fn subtask_rows(task: &Task) -> Result<Vec<SubtaskRow>, ConversionError> {
    task.subtasks()
        .iter()
        .map(|subtask| {
            Ok(SubtaskRow {
                id: subtask.id().into_inner(),
                task_id: task.id().into_inner(),
                title: subtask.title().to_owned(),
                effort_weight: subtask.effort_weight().as_str().to_owned(),
                is_completed: subtask.is_completed(),
                order_index: fit("order_index", subtask.order_index())?,
            })
        })
        .collect()
}

pub(super) fn row_to_task(row: TaskRow, subtasks: Vec<SubtaskRow>) -> Result<Task, ConversionError> {
    let completion = match (row.plausibility_score, row.plausibility_level, row.completed_at) {
        (Some(score), Some(level), Some(completed_at)) => Some(TaskCompletion {
            score: PlausibilityScore::new(fit("plausibility_score", score)?)?,
            level: PlausibilityLevel::try_from(level.as_str())?,
            completed_at,
        }),
        (None, None, None) => None,
        _ => return Err(ConversionError::PartialCompletion(row.id)),
    };

    let steps = subtasks
        .into_iter()
        .map(row_to_subtask)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        title: row.title,
        completion_contract: row.completion_contract,
        effort_weight: EffortWeight::try_from(row.effort_weight.as_str())?,
        status: TaskStatus::try_from(row.status.as_str())?,
        subtasks: steps,
        reflection_question: row.reflection_question,
        reflection_response: row.reflection_response,
        completion,
        version: fit("version", row.version)?,
        created_at: row.created_at,
    }))
}

fn row_to_subtask(row: SubtaskRow) -> Result<Subtask, ConversionError> {
    Ok(Subtask::from_persisted(PersistedSubtaskData {
        id: SubtaskId::from_uuid(row.id),
        title: row.title,
        effort_weight: EffortWeight::try_from(row.effort_weight.as_str())?,
        is_completed: row.is_completed,
        order_index: fit("order_index", row.order_index)?,
    }))
}

pub(super) fn gardener_row(gardener: &Gardener) -> Result<GardenerRow, ConversionError> {
    let changes = gardener_changes(gardener)?;
    Ok(GardenerRow {
        id: gardener.id().into_inner(),
        garden_health: changes.garden_health,
        total_tasks_completed: changes.total_tasks_completed,
        onboarding_completed: changes.onboarding_completed,
        version: fit("version", gardener.version())?,
        created_at: gardener.created_at(),
        updated_at: changes.updated_at,
    })
}

pub(super) fn gardener_changes(gardener: &Gardener) -> Result<GardenerChanges, ConversionError> {
    Ok(GardenerChanges {
        garden_health: i32::from(gardener.garden_health().value()),
        total_tasks_completed: fit("total_tasks_completed", gardener.total_tasks_completed())?,
        onboarding_completed: gardener.onboarding_completed(),
        updated_at: gardener.updated_at(),
    })
}

pub(super) fn row_to_gardener(row: GardenerRow) -> Result<Gardener, ConversionError> {
    Ok(Gardener::from_persisted(PersistedGardenerData {
        id: UserId::from_uuid(row.id),
        garden_health: Health::new(i64::from(row.garden_health))?,
        total_tasks_completed: fit("total_tasks_completed", row.total_tasks_completed)?,
        onboarding_completed: row.onboarding_completed,
        version: fit("version", row.version)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn plant_row(plant: &Plant) -> PlantRow {
    PlantRow {
        id: plant.id().into_inner(),
        owner_id: plant.owner().into_inner(),
        task_id: plant.task_id().map(TaskId::into_inner),
        plant_type: plant.plant_type().as_str().to_owned(),
        growth_stage: i32::from(plant.growth_stage().value()),
        health: i32::from(plant.health().value()),
        position_x: i32::from(plant.position().x()),
        position_y: i32::from(plant.position().y()),
        created_at: plant.created_at(),
        updated_at: plant.updated_at(),
    }
}

pub(super) fn row_to_plant(row: PlantRow) -> Result<Plant, ConversionError> {
    Ok(Plant::from_persisted(PersistedPlantData {
        id: PlantId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        task_id: row.task_id.map(TaskId::from_uuid),
        plant_type: PlantType::try_from(row.plant_type.as_str())?,
        growth_stage: GrowthStage::new(i64::from(row.growth_stage))?,
        health: Health::new(i64::from(row.health))?,
        position: GridPosition::new(i64::from(row.position_x), i64::from(row.position_y))?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn mood_row(mood: &Mood) -> MoodRow {
    MoodRow {
        id: mood.id().into_inner(),
        owner_id: mood.owner().into_inner(),
        mood: mood.mood().as_str().to_owned(),
        note: mood.note().map(str::to_owned),
        ai_response: mood.ai_response().to_owned(),
        created_at: mood.created_at(),
    }
}

pub(super) fn row_to_mood(row: MoodRow) -> Result<Mood, ConversionError> {
    Ok(Mood::from_persisted(PersistedMoodData {
        id: MoodId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        mood: MoodKind::try_from(row.mood.as_str())?,
        note: row.note,
        ai_response: row.ai_response,
        created_at: row.created_at,
    }))
}
