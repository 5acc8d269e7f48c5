use chrono::Utc;

use crate::model::{generate_id, NewTask, Task, TaskPatch, TaskStatus};
use crate::persistence::{KeyValueStore, Persistence};

/// Authoritative, newest-first task list with write-through persistence.
///
/// Every operation addressed by id treats an unknown id as a no-op: the caller may be
/// acting on a row rendered before the task was removed.
#[derive(Debug)]
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn load(persistence: Persistence<S>) -> Self {
        let tasks = persistence.load();
        tracing::debug!(count = tasks.len(), "loaded tasks");
        Self { tasks, persistence }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub(crate) fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    pub fn add(&mut self, input: NewTask) -> Task {
        let task = input.into_task(self.fresh_id(), Utc::now());
        self.tasks.insert(0, task.clone());
        self.persist();
        task
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Option<Task> {
        let Some(existing) = self.tasks.iter_mut().find(|task| task.id == id) else {
            tracing::debug!(task_id = id, "update skipped for unknown task");
            return None;
        };
        *existing = existing.patched(&patch);
        let updated = existing.clone();
        self.persist();
        Some(updated)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            tracing::debug!(task_id = id, "remove skipped for unknown task");
            return false;
        }
        self.persist();
        true
    }

    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Option<Task> {
        self.update(id, TaskPatch::status(status))
    }

    /// Flips between `Completed` and `Pending`; any non-completed status completes.
    pub fn toggle_complete(&mut self, id: &str) -> Option<Task> {
        let next = match self.get(id)?.status {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        };
        self.set_status(id, next)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        self.persistence.save(&self.tasks);
    }
}
