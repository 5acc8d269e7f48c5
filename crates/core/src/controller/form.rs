//! Draft state for the add/edit form, including its status picker dropdown.

use crate::capture::TaskFields;
use crate::model::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    status: TaskStatus,
    editing: bool,
    picker_open: bool,
}

impl TaskForm {
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            editing: false,
            picker_open: false,
        }
    }

    pub fn for_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            editing: true,
            picker_open: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn heading(&self) -> &'static str {
        if self.editing {
            "Edit Task"
        } else {
            "Add Task"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing {
            "UPDATE"
        } else {
            "ADD"
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    /// The status picker is only offered while editing; new tasks start pending.
    pub fn shows_status_picker(&self) -> bool {
        self.editing
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn toggle_picker(&mut self) {
        if self.shows_status_picker() {
            self.picker_open = !self.picker_open;
        }
    }

    pub fn select_status(&mut self, status: TaskStatus) {
        if self.shows_status_picker() {
            self.status = status;
        }
        self.picker_open = false;
    }

    /// Any press outside the picker's bounds closes it.
    pub fn pointer_down(&mut self, inside_picker: bool) {
        if !inside_picker {
            self.picker_open = false;
        }
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: Some(self.status),
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::blank()
    }
}
