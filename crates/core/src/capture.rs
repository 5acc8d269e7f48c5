use thiserror::Error;

use crate::model::{NewTask, TaskPatch, TaskStatus};

/// Raw values submitted by the add and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub status: Option<TaskStatus>,
}

impl TaskFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the trimmed title, rejecting blank input.
    pub fn require_title(&self) -> Result<&str, CaptureError> {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            return Err(CaptureError::EmptyTitle);
        }
        Ok(trimmed)
    }

    pub fn into_new_task(self) -> Result<NewTask, CaptureError> {
        let title = self.require_title()?.to_string();
        Ok(NewTask {
            title,
            description: self.description,
            status: self.status,
        })
    }

    pub fn into_patch(self) -> Result<TaskPatch, CaptureError> {
        let title = self.require_title()?.to_string();
        Ok(TaskPatch {
            title: Some(title),
            description: Some(self.description),
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
}
