//! Interaction controller translating list-screen actions into task store mutations.
//!
//! The controller owns the whole screen state. Hosts render from [`Controller::read_model`]
//! and call the action methods; nothing here blocks or fails.

mod form;
mod state;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};

pub use self::form::TaskForm;
pub use self::state::{ExpandedSections, SectionView};

use crate::capture::{CaptureError, TaskFields};
use crate::config::AppConfig;
use crate::database::SqliteStore;
use crate::model::{FilterStatus, Task, TaskStatus, ViewMode};
use crate::persistence::{KeyValueStore, Persistence};
use crate::projection::{project, Projection};
use crate::services::TaskStore;
use crate::telemetry::{Event as TelemetryEvent, Handle as TelemetryHandle};
use crate::transitions::{TaskAction, TransitionPolicy};

/// Everything the presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadModel<'a> {
    pub sections: Vec<SectionView<'a>>,
    pub view_mode: ViewMode,
    pub editing_task: Option<&'a Task>,
    pub form: Option<&'a TaskForm>,
    pub search_query: &'a str,
    pub status_filter: FilterStatus,
    pub expanded_sections: ExpandedSections,
    pub delete_pending: bool,
}

pub struct Controller<S> {
    store: TaskStore<S>,
    policy: TransitionPolicy,
    view_mode: ViewMode,
    editing_task: Option<Task>,
    form: Option<TaskForm>,
    search_query: String,
    status_filter: FilterStatus,
    expanded: ExpandedSections,
    delete_id: Option<String>,
    telemetry: TelemetryHandle,
}

impl Controller<SqliteStore> {
    /// Open the SQLite store under the configured data directory and restore saved state.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = SqliteStore::open(config.db_path()).with_context(|| {
            format!(
                "Failed to open task database at {}",
                config.db_path().display()
            )
        })?;
        let controller =
            Controller::new(Persistence::new(store)).with_policy(config.transition_policy());
        tracing::info!(
            data_dir = %config.data_dir().display(),
            tasks = controller.store.len(),
            policy = controller.policy.as_str(),
            "task controller ready"
        );
        Ok(controller)
    }
}

impl<S: KeyValueStore> Controller<S> {
    pub fn new(persistence: Persistence<S>) -> Self {
        let status_filter = persistence.load_filter_preference();
        let store = TaskStore::load(persistence);
        let telemetry = TelemetryHandle::new();
        telemetry.record(TelemetryEvent::SessionStarted { tasks: store.len() });

        Self {
            store,
            policy: TransitionPolicy::default(),
            view_mode: ViewMode::List,
            editing_task: None,
            form: None,
            search_query: String::new(),
            status_filter,
            expanded: ExpandedSections::default(),
            delete_id: None,
            telemetry,
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn editing_task(&self) -> Option<&Task> {
        self.editing_task.as_ref()
    }

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.form.as_mut()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn status_filter(&self) -> FilterStatus {
        self.status_filter
    }

    pub fn delete_id(&self) -> Option<&str> {
        self.delete_id.as_deref()
    }

    pub fn is_delete_pending(&self) -> bool {
        self.delete_id.is_some()
    }

    pub fn is_expanded(&self, status: TaskStatus) -> bool {
        self.expanded.is_expanded(status)
    }

    pub fn telemetry(&self) -> &TelemetryHandle {
        &self.telemetry
    }

    /// Row actions to render for a task under the active policy.
    pub fn actions_for(&self, id: &str) -> Vec<TaskAction> {
        self.store
            .get(id)
            .map(|task| self.policy.actions(task.status))
            .unwrap_or_default()
    }

    pub fn projection(&self) -> Projection<'_> {
        project(self.store.tasks(), &self.search_query, self.status_filter)
    }

    pub fn read_model(&self) -> ReadModel<'_> {
        let sections = self
            .projection()
            .buckets
            .into_iter()
            .map(|bucket| SectionView {
                expanded: self.expanded.is_expanded(bucket.status),
                bucket,
            })
            .collect();

        ReadModel {
            sections,
            view_mode: self.view_mode,
            editing_task: self.editing_task.as_ref(),
            form: self.form.as_ref(),
            search_query: &self.search_query,
            status_filter: self.status_filter,
            expanded_sections: self.expanded,
            delete_pending: self.is_delete_pending(),
        }
    }

    pub fn start_add(&mut self) -> bool {
        if self.view_mode != ViewMode::List {
            return false;
        }
        self.view_mode = ViewMode::Add;
        self.form = Some(TaskForm::blank());
        true
    }

    pub fn start_edit(&mut self, id: &str) -> bool {
        if self.view_mode != ViewMode::List {
            return false;
        }
        let Some(task) = self.store.get(id) else {
            self.stale("edit", id);
            return false;
        };
        if !self.policy.allows(task.status, TaskAction::Edit) {
            tracing::debug!(task_id = id, status = task.status.as_str(), "edit not offered");
            return false;
        }

        self.form = Some(TaskForm::for_task(task));
        self.editing_task = Some(task.clone());
        self.view_mode = ViewMode::Edit;
        true
    }

    /// Submit the open form. Returns `false` when the submission is rejected, in which case
    /// the form stays open with its input intact.
    pub fn save_form(&mut self, fields: TaskFields) -> bool {
        match self.view_mode {
            ViewMode::List => false,
            ViewMode::Add => match fields.into_new_task() {
                Ok(input) => {
                    let task = self.store.add(input);
                    self.telemetry.record(TelemetryEvent::TaskAdded(task.id));
                    self.close_form();
                    true
                }
                Err(err) => self.reject(err),
            },
            ViewMode::Edit => {
                let Some(id) = self.editing_task.as_ref().map(|task| task.id.clone()) else {
                    self.close_form();
                    return false;
                };
                match fields.into_patch() {
                    Ok(patch) => {
                        if self.store.update(&id, patch).is_some() {
                            self.telemetry.record(TelemetryEvent::TaskEdited(id));
                        } else {
                            self.stale("edit", &id);
                        }
                        self.close_form();
                        true
                    }
                    Err(err) => self.reject(err),
                }
            }
        }
    }

    pub fn submit_form(&mut self) -> bool {
        let Some(fields) = self.form.as_ref().map(TaskForm::fields) else {
            return false;
        };
        self.save_form(fields)
    }

    pub fn cancel_form(&mut self) {
        self.close_form();
    }

    pub fn request_delete(&mut self, id: &str) {
        self.delete_id = Some(id.to_string());
    }

    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.delete_id.take() else {
            return false;
        };
        let removed = self.store.remove(&id);
        if removed {
            self.telemetry.record(TelemetryEvent::TaskDeleted(id));
        } else {
            self.stale("delete", &id);
        }
        removed
    }

    pub fn cancel_delete(&mut self) {
        self.delete_id = None;
    }

    pub fn toggle_complete(&mut self, id: &str) -> Option<Task> {
        self.apply(id, TaskAction::ToggleComplete)
    }

    /// Apply a status transition if the active policy offers it for the task's status.
    pub fn apply(&mut self, id: &str, action: TaskAction) -> Option<Task> {
        let Some(current) = self.store.get(id).map(|task| task.status) else {
            self.stale(action.label(), id);
            return None;
        };
        let Some(next) = self.policy.next_status(current, action) else {
            tracing::debug!(
                task_id = id,
                action = action.label(),
                policy = self.policy.as_str(),
                "transition not offered"
            );
            return None;
        };

        let updated = match action {
            TaskAction::ToggleComplete => self.store.toggle_complete(id),
            _ => self.store.set_status(id, next),
        }?;
        self.telemetry.record(TelemetryEvent::StatusChanged {
            id: updated.id.clone(),
            status: updated.status,
        });
        Some(updated)
    }

    pub fn toggle_section(&mut self, status: TaskStatus) {
        self.expanded.toggle(status);
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    pub fn set_status_filter(&mut self, filter: FilterStatus) {
        self.status_filter = filter;
        self.store.persistence_mut().save_filter_preference(filter);
        self.telemetry.record(TelemetryEvent::FilterChanged(filter));
    }

    fn close_form(&mut self) {
        self.view_mode = ViewMode::List;
        self.editing_task = None;
        self.form = None;
    }

    fn reject(&self, err: CaptureError) -> bool {
        tracing::debug!(error = %err, view = ?self.view_mode, "form submission rejected");
        self.telemetry
            .record(TelemetryEvent::SubmissionRejected(err.to_string()));
        false
    }

    fn stale(&self, action: &'static str, id: &str) {
        tracing::debug!(task_id = id, action, "ignoring stale task reference");
        self.telemetry.record(TelemetryEvent::StaleReference {
            action,
            id: id.to_string(),
        });
    }
}
