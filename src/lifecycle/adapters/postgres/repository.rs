//! `PostgreSQL` store implementing every garden persistence port.

use super::{
    conversions::{
        gardener_changes, gardener_row, mood_row, plant_row, row_to_gardener, row_to_mood,
        row_to_plant, row_to_task, subtask_rows, task_changes, task_row,
    },
    models::{GardenerRow, MoodRow, PlantRow, SubtaskRow, TaskChanges, TaskRow},
    schema::{gardeners, moods, plants, subtasks, tasks},
};
use crate::garden::{
    domain::{Gardener, Plant},
    ports::{GardenRepository, GardenRepositoryError, GardenRepositoryResult, GardenSnapshot},
};
use crate::ledger::{
    domain::{SubtaskId, Task, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::lifecycle::ports::{
    CommitError, CommitResult, CommittedEvent, TaskEventCommit, TaskEventCommitter,
};
use crate::mood::{
    domain::Mood,
    ports::{MoodRepository, MoodRepositoryError, MoodRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by the garden store.
pub type GardenPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed store for tasks, gardens, task events, and mood
/// check-ins.
///
/// A commit runs in one transaction. The task and gardener rows are each
/// updated only while their `version` still matches the one read.
#[derive(Debug, Clone)]
pub struct PostgresGardenStore {
    pool: GardenPgPool,
}

/// Port errors that can wrap an infrastructure failure.
trait PersistenceFailure: Sized {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for TaskRepositoryError {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for GardenRepositoryError {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for CommitError {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for MoodRepositoryError {
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for GardenRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for CommitError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for MoodRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresGardenStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: GardenPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::wrap)?;
            f(&mut connection)
        })
        .await
        .map_err(E::wrap)?
    }
}

fn load_subtasks(
    connection: &mut PgConnection,
    task_ids: &[uuid::Uuid],
) -> TaskRepositoryResult<HashMap<uuid::Uuid, Vec<SubtaskRow>>> {
    let rows = subtasks::table
        .filter(subtasks::task_id.eq_any(task_ids))
        .order((subtasks::task_id.asc(), subtasks::order_index.asc()))
        .select(SubtaskRow::as_select())
        .load::<SubtaskRow>(connection)?;
    let mut grouped: HashMap<uuid::Uuid, Vec<SubtaskRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.task_id).or_default().push(row);
    }
    Ok(grouped)
}

fn assemble_tasks(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let mut steps = load_subtasks(connection, &ids)?;
    rows.into_iter()
        .map(|row| {
            let owned_steps = steps.remove(&row.id).unwrap_or_default();
            row_to_task(row, owned_steps).map_err(TaskRepositoryError::invalid_persisted_data)
        })
        .collect()
}

fn find_owned_task(
    connection: &mut PgConnection,
    owner: UserId,
    id: uuid::Uuid,
) -> TaskRepositoryResult<Option<Task>> {
    let row = tasks::table
        .filter(tasks::id.eq(id))
        .filter(tasks::owner_id.eq(owner.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()?;
    let Some(found) = row else {
        return Ok(None);
    };
    Ok(assemble_tasks(connection, vec![found])?.pop())
}

fn task_exists(
    connection: &mut PgConnection,
    owner: UserId,
    id: TaskId,
) -> Result<bool, DieselError> {
    diesel::select(diesel::dsl::exists(
        tasks::table
            .filter(tasks::id.eq(id.into_inner()))
            .filter(tasks::owner_id.eq(owner.into_inner())),
    ))
    .get_result::<bool>(connection)
}

/// Applies `changes` to the task row while it is still at `expected`.
///
/// Returns the number of rows updated.
fn update_task_row(
    connection: &mut PgConnection,
    task: &Task,
    changes: &TaskChanges,
    expected: i64,
) -> Result<usize, DieselError> {
    diesel::update(
        tasks::table
            .filter(tasks::id.eq(task.id().into_inner()))
            .filter(tasks::owner_id.eq(task.owner().into_inner()))
            .filter(tasks::version.eq(expected)),
    )
    .set((changes, tasks::version.eq(tasks::version + 1)))
    .execute(connection)
}

fn read_gardener(
    connection: &mut PgConnection,
    user: UserId,
) -> GardenRepositoryResult<Option<Gardener>> {
    gardeners::table
        .filter(gardeners::id.eq(user.into_inner()))
        .select(GardenerRow::as_select())
        .first::<GardenerRow>(connection)
        .optional()?
        .map(|row| row_to_gardener(row).map_err(GardenRepositoryError::invalid_persisted_data))
        .transpose()
}

fn read_plants(connection: &mut PgConnection, owner: UserId) -> GardenRepositoryResult<Vec<Plant>> {
    plants::table
        .filter(plants::owner_id.eq(owner.into_inner()))
        .order((plants::created_at.asc(), plants::id.asc()))
        .select(PlantRow::as_select())
        .load::<PlantRow>(connection)?
        .into_iter()
        .map(|row| row_to_plant(row).map_err(GardenRepositoryError::invalid_persisted_data))
        .collect()
}

#[async_trait]
impl TaskRepository for PostgresGardenStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_row(task).map_err(TaskRepositoryError::persistence)?;
        let step_rows = subtask_rows(task).map_err(TaskRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                diesel::insert_into(subtasks::table)
                    .values(&step_rows)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let owner = task.owner();
        let expected = task.version();
        let expected_column = i64::try_from(expected).map_err(TaskRepositoryError::persistence)?;
        let changes = task_changes(task);
        let flags: Vec<(uuid::Uuid, bool)> = task
            .subtasks()
            .iter()
            .map(|subtask| (subtask.id().into_inner(), subtask.is_completed()))
            .collect();
        let read = task.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = update_task_row(tx, &read, &changes, expected_column)?;
                if updated == 0 {
                    return Err(if task_exists(tx, owner, task_id)? {
                        TaskRepositoryError::VersionConflict { task_id, expected }
                    } else {
                        TaskRepositoryError::NotFound(task_id)
                    });
                }
                for (subtask_id, is_completed) in &flags {
                    diesel::update(
                        subtasks::table
                            .filter(subtasks::id.eq(*subtask_id))
                            .filter(subtasks::task_id.eq(task_id.into_inner())),
                    )
                    .set(subtasks::is_completed.eq(*is_completed))
                    .execute(tx)?;
                }
                Ok(read.into_next_version())
            })
        })
        .await
    }

    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| find_owned_task(connection, owner, id.into_inner()))
            .await
    }

    async fn find_by_subtask(
        &self,
        owner: UserId,
        subtask_id: SubtaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let parent = subtasks::table
                .filter(subtasks::id.eq(subtask_id.into_inner()))
                .select(subtasks::task_id)
                .first::<uuid::Uuid>(connection)
                .optional()?;
            let Some(task_id) = parent else {
                return Ok(None);
            };
            find_owned_task(connection, owner, task_id)
        })
        .await
    }

    async fn list_for_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            assemble_tasks(connection, rows)
        })
        .await
    }
}

#[async_trait]
impl GardenRepository for PostgresGardenStore {
    async fn find_or_create_gardener(
        &self,
        candidate: &Gardener,
    ) -> GardenRepositoryResult<Gardener> {
        let user = candidate.id();
        let new_row = gardener_row(candidate).map_err(GardenRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(gardeners::table)
                .values(&new_row)
                .on_conflict_do_nothing()
                .execute(connection)?;
            read_gardener(connection, user)?.ok_or(GardenRepositoryError::NotFound(user))
        })
        .await
    }

    async fn find_gardener(&self, user: UserId) -> GardenRepositoryResult<Option<Gardener>> {
        self.run_blocking(move |connection| read_gardener(connection, user))
            .await
    }

    async fn update_gardener(&self, gardener: &Gardener) -> GardenRepositoryResult<Gardener> {
        let user = gardener.id();
        let expected = gardener.version();
        let expected_column = i64::try_from(expected).map_err(GardenRepositoryError::persistence)?;
        let changes = gardener_changes(gardener).map_err(GardenRepositoryError::persistence)?;
        let next = gardener.clone().into_next_version();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                gardeners::table
                    .filter(gardeners::id.eq(user.into_inner()))
                    .filter(gardeners::version.eq(expected_column)),
            )
            .set((&changes, gardeners::version.eq(gardeners::version + 1)))
            .execute(connection)?;
            if updated > 0 {
                return Ok(next);
            }
            let exists = read_gardener(connection, user)?.is_some();
            Err(if exists {
                GardenRepositoryError::VersionConflict { user, expected }
            } else {
                GardenRepositoryError::NotFound(user)
            })
        })
        .await
    }

    async fn list_plants(&self, owner: UserId) -> GardenRepositoryResult<Vec<Plant>> {
        self.run_blocking(move |connection| read_plants(connection, owner))
            .await
    }

    async fn snapshot(&self, owner: UserId) -> GardenRepositoryResult<Option<GardenSnapshot>> {
        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .repeatable_read()
                .read_only()
                .run::<_, GardenRepositoryError, _>(|tx| {
                    let Some(gardener) = read_gardener(tx, owner)? else {
                        return Ok(None);
                    };
                    let garden = read_plants(tx, owner)?;
                    Ok(Some(GardenSnapshot {
                        gardener,
                        plants: garden,
                    }))
                })
        })
        .await
    }
}

#[async_trait]
impl TaskEventCommitter for PostgresGardenStore {
    async fn commit(&self, work: &TaskEventCommit) -> CommitResult<CommittedEvent> {
        let owner = work.gardener.id();
        let task_id = work.task.id();
        let expected_task_version = work.task.version();
        let task_version_column =
            i64::try_from(expected_task_version).map_err(CommitError::persistence)?;
        let expected_version = work.gardener.version();
        let version_column = i64::try_from(expected_version).map_err(CommitError::persistence)?;
        let task_update = task_changes(&work.task);
        let gardener_update =
            gardener_changes(&work.gardener).map_err(CommitError::persistence)?;
        let new_plant = work.new_plant.as_ref().map(plant_row);
        let health_updates: Vec<(uuid::Uuid, i32, chrono::DateTime<chrono::Utc>)> = work
            .plant_updates
            .iter()
            .map(|update| {
                (
                    update.plant_id.into_inner(),
                    i32::from(update.health.value()),
                    update.updated_at,
                )
            })
            .collect();
        let task = work.task.clone();
        let gardener = work.gardener.clone().into_next_version();

        self.run_blocking(move |connection| {
            connection.transaction::<_, CommitError, _>(|tx| {
                let task_rows = update_task_row(tx, &task, &task_update, task_version_column)?;
                if task_rows == 0 {
                    return Err(if task_exists(tx, owner, task_id)? {
                        CommitError::TaskVersionConflict {
                            task_id,
                            expected: expected_task_version,
                        }
                    } else {
                        CommitError::MissingRecord(format!("task {task_id}"))
                    });
                }

                let gardener_rows = diesel::update(
                    gardeners::table
                        .filter(gardeners::id.eq(owner.into_inner()))
                        .filter(gardeners::version.eq(version_column)),
                )
                .set((&gardener_update, gardeners::version.eq(gardeners::version + 1)))
                .execute(tx)?;
                if gardener_rows == 0 {
                    return Err(CommitError::VersionConflict {
                        user: owner,
                        expected: expected_version,
                    });
                }

                if let Some(row) = &new_plant {
                    diesel::insert_into(plants::table)
                        .values(row)
                        .execute(tx)?;
                }

                for (plant_id, health, updated_at) in &health_updates {
                    let plant_rows = diesel::update(
                        plants::table
                            .filter(plants::id.eq(*plant_id))
                            .filter(plants::owner_id.eq(owner.into_inner())),
                    )
                    .set((plants::health.eq(*health), plants::updated_at.eq(*updated_at)))
                    .execute(tx)?;
                    if plant_rows == 0 {
                        return Err(CommitError::MissingRecord(format!("plant {plant_id}")));
                    }
                }
                Ok(CommittedEvent {
                    task: task.into_next_version(),
                    gardener,
                })
            })
        })
        .await
    }
}

#[async_trait]
impl MoodRepository for PostgresGardenStore {
    async fn store_mood(&self, mood: &Mood) -> MoodRepositoryResult<()> {
        let mood_id = mood.id();
        let owner = mood.owner();
        let new_row = mood_row(mood);
        self.run_blocking(move |connection| {
            diesel::insert_into(moods::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MoodRepositoryError::DuplicateMood(mood_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        MoodRepositoryError::UnknownOwner(owner)
                    }
                    _ => MoodRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn recent_moods(
        &self,
        owner: UserId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> MoodRepositoryResult<Vec<Mood>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            moods::table
                .filter(moods::owner_id.eq(owner.into_inner()))
                .filter(moods::created_at.ge(since))
                .order((moods::created_at.desc(), moods::id.desc()))
                .limit(row_limit)
                .select(MoodRow::as_select())
                .load::<MoodRow>(connection)?
                .into_iter()
                .map(|row| row_to_mood(row).map_err(MoodRepositoryError::invalid_persisted_data))
                .collect()
        })
        .await
    }
}
