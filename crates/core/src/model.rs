use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Section order used when tasks are grouped for display.
    pub const DISPLAY_ORDER: [TaskStatus; 3] = [
        TaskStatus::InProgress,
        TaskStatus::Pending,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in progress" | "in_progress" | "in-progress" | "inprogress" => {
                Ok(TaskStatus::InProgress)
            }
            "completed" | "complete" => Ok(TaskStatus::Completed),
            other => Err(anyhow!(
                "Unknown status '{}': expected pending|in progress|completed",
                other
            )),
        }
    }
}

/// Which slice of the status lifecycle the list screen shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterStatus {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl FilterStatus {
    pub const ALL: [FilterStatus; 3] = [
        FilterStatus::All,
        FilterStatus::Incomplete,
        FilterStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterStatus::All => "ALL",
            FilterStatus::Completed => "COMPLETED",
            FilterStatus::Incomplete => "INCOMPLETE",
        }
    }

    /// Statuses whose sections are shown under this filter, in display order.
    pub fn visible_statuses(&self) -> &'static [TaskStatus] {
        match self {
            FilterStatus::All => &TaskStatus::DISPLAY_ORDER,
            FilterStatus::Completed => &[TaskStatus::Completed],
            FilterStatus::Incomplete => &[TaskStatus::InProgress, TaskStatus::Pending],
        }
    }

    pub fn shows(&self, status: TaskStatus) -> bool {
        self.visible_statuses().contains(&status)
    }
}

impl fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(FilterStatus::All),
            "COMPLETED" => Ok(FilterStatus::Completed),
            "INCOMPLETE" => Ok(FilterStatus::Incomplete),
            other => Err(anyhow!(
                "Unknown filter '{}': expected ALL|COMPLETED|INCOMPLETE",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creation date as shown under a task, e.g. `Sun, Jan 5, 2025`.
    pub fn created_label(&self) -> String {
        self.created_at.format("%a, %b %-d, %Y").to_string()
    }

    /// Uppercased first character of the title, used as the row avatar.
    pub fn initial(&self) -> Option<char> {
        self.title
            .trim_start()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }

    fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    pub(crate) fn patched(&self, patch: &TaskPatch) -> Task {
        let mut updated = self.clone();
        updated.apply(patch);
        updated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: Option<TaskStatus>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn into_task(self, id: String, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            created_at,
        }
    }
}

/// Field-wise update merged into an existing task; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

pub(crate) fn generate_id() -> String {
    Ulid::new().to_string()
}
