//! Thread-safe in-memory implementation of every storage port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

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
use chrono::{DateTime, Utc};

/// In-memory store for tasks, gardeners, plants, and mood check-ins.
///
/// All state sits behind one lock, so a commit is applied atomically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGardenStore {
    state: Arc<RwLock<InMemoryGardenState>>,
}

#[derive(Debug, Default)]
struct InMemoryGardenState {
    tasks: HashMap<TaskId, StoredTask>,
    subtask_index: HashMap<SubtaskId, TaskId>,
    gardeners: HashMap<UserId, Gardener>,
    plants: HashMap<UserId, Vec<Plant>>,
    moods: HashMap<UserId, Vec<Mood>>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    sequence: u64,
}

impl InMemoryGardenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a plant directly, bypassing the unit of work.
    ///
    /// Used to seed gardens in tests and imports.
    ///
    /// # Errors
    ///
    /// Returns [`GardenRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn seed_plant(&self, plant: Plant) -> GardenRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            GardenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.plants.entry(plant.owner()).or_default().push(plant);
        Ok(())
    }
}

fn owned_task(state: &InMemoryGardenState, owner: UserId, id: TaskId) -> Option<Task> {
    state
        .tasks
        .get(&id)
        .filter(|stored| stored.task.owner() == owner)
        .map(|stored| stored.task.clone())
}

#[async_trait]
impl TaskRepository for InMemoryGardenStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        for subtask in task.subtasks() {
            state.subtask_index.insert(subtask.id(), task.id());
        }
        let sequence = state.next_sequence;
        state.next_sequence = sequence.saturating_add(1);
        state.tasks.insert(
            task.id(),
            StoredTask {
                task: task.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .filter(|stored| stored.task.owner() == task.owner())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.task.version() != task.version() {
            return Err(TaskRepositoryError::VersionConflict {
                task_id: task.id(),
                expected: task.version(),
            });
        }
        let next = task.clone().into_next_version();
        stored.task = next.clone();
        Ok(next)
    }

    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(owned_task(&state, owner, id))
    }

    async fn find_by_subtask(
        &self,
        owner: UserId,
        subtask_id: SubtaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .subtask_index
            .get(&subtask_id)
            .and_then(|task_id| owned_task(&state, owner, *task_id)))
    }

    async fn list_for_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut owned: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| stored.task.owner() == owner)
            .collect();
        owned.sort_by(|left, right| {
            right
                .task
                .created_at()
                .cmp(&left.task.created_at())
                .then(right.sequence.cmp(&left.sequence))
        });
        Ok(owned.into_iter().map(|stored| stored.task.clone()).collect())
    }
}

#[async_trait]
impl GardenRepository for InMemoryGardenStore {
    async fn find_or_create_gardener(
        &self,
        candidate: &Gardener,
    ) -> GardenRepositoryResult<Gardener> {
        let mut state = self.state.write().map_err(|err| {
            GardenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .gardeners
            .entry(candidate.id())
            .or_insert_with(|| candidate.clone());
        Ok(stored.clone())
    }

    async fn find_gardener(&self, user: UserId) -> GardenRepositoryResult<Option<Gardener>> {
        let state = self.state.read().map_err(|err| {
            GardenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.gardeners.get(&user).cloned())
    }

    async fn update_gardener(&self, gardener: &Gardener) -> GardenRepositoryResult<Gardener> {
        let mut state = self.state.write().map_err(|err| {
            GardenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .gardeners
            .get_mut(&gardener.id())
            .ok_or(GardenRepositoryError::NotFound(gardener.id()))?;
        if stored.version() != gardener.version() {
            return Err(GardenRepositoryError::VersionConflict {
                user: gardener.id(),
                expected: gardener.version(),
            });
        }
        let next = gardener.clone().into_next_version();
        *stored = next.clone();
        Ok(next)
    }

    async fn list_plants(&self, owner: UserId) -> GardenRepositoryResult<Vec<Plant>> {
        let state = self.state.read().map_err(|err| {
            GardenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.plants.get(&owner).cloned().unwrap_or_default())
    }

    async fn snapshot(&self, owner: UserId) -> GardenRepositoryResult<Option<GardenSnapshot>> {
        let state = self.state.read().map_err(|err| {
            GardenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.gardeners.get(&owner).map(|gardener| GardenSnapshot {
            gardener: gardener.clone(),
            plants: state.plants.get(&owner).cloned().unwrap_or_default(),
        }))
    }
}

#[async_trait]
impl TaskEventCommitter for InMemoryGardenStore {
    async fn commit(&self, work: &TaskEventCommit) -> CommitResult<CommittedEvent> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CommitError::persistence(std::io::Error::other(err.to_string())))?;
        let owner = work.gardener.id();
        let task_id = work.task.id();

        // Every guard is checked before the first mutation.
        let stored_task_version = owned_task(&state, owner, task_id)
            .map(|task| task.version())
            .ok_or_else(|| CommitError::MissingRecord(format!("task {task_id}")))?;
        if stored_task_version != work.task.version() {
            return Err(CommitError::TaskVersionConflict {
                task_id,
                expected: work.task.version(),
            });
        }
        let stored_version = state
            .gardeners
            .get(&owner)
            .map(Gardener::version)
            .ok_or_else(|| CommitError::MissingRecord(format!("gardener {owner}")))?;
        if stored_version != work.gardener.version() {
            return Err(CommitError::VersionConflict {
                user: owner,
                expected: work.gardener.version(),
            });
        }
        let plants = state.plants.get(&owner).map(Vec::as_slice).unwrap_or_default();
        if let Some(missing) = work
            .plant_updates
            .iter()
            .find(|update| !plants.iter().any(|plant| plant.id() == update.plant_id))
        {
            return Err(CommitError::MissingRecord(format!("plant {}", missing.plant_id)));
        }

        let task = work.task.clone().into_next_version();
        if let Some(stored) = state.tasks.get_mut(&task_id) {
            stored.task = task.clone();
        }
        let gardener = work.gardener.clone().into_next_version();
        state.gardeners.insert(owner, gardener.clone());
        let garden = state.plants.entry(owner).or_default();
        for update in &work.plant_updates {
            if let Some(plant) = garden.iter_mut().find(|plant| plant.id() == update.plant_id) {
                plant.set_health(update.health, update.updated_at);
            }
        }
        if let Some(plant) = &work.new_plant {
            garden.push(plant.clone());
        }
        Ok(CommittedEvent { task, gardener })
    }
}

#[async_trait]
impl MoodRepository for InMemoryGardenStore {
    async fn store_mood(&self, mood: &Mood) -> MoodRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            MoodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.gardeners.contains_key(&mood.owner()) {
            return Err(MoodRepositoryError::UnknownOwner(mood.owner()));
        }
        if state
            .moods
            .values()
            .flatten()
            .any(|existing| existing.id() == mood.id())
        {
            return Err(MoodRepositoryError::DuplicateMood(mood.id()));
        }
        state
            .moods
            .entry(mood.owner())
            .or_default()
            .push(mood.clone());
        Ok(())
    }

    async fn recent_moods(
        &self,
        owner: UserId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> MoodRepositoryResult<Vec<Mood>> {
        let state = self.state.read().map_err(|err| {
            MoodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut moods: Vec<Mood> = state
            .moods
            .get(&owner)
            .into_iter()
            .flatten()
            .rev()
            .filter(|mood| mood.created_at() >= since)
            .cloned()
            .collect();
        moods.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        moods.truncate(limit);
        Ok(moods)
    }
}
