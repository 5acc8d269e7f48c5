//! Status transition policies offered to the list screen.
//!
//! Two row-action schemes exist and they disagree, so the active one is configuration:
//! `Toggle` exposes a single complete/uncomplete switch, `Cycle` walks
//! Pending → In Progress → Completed with explicit moves back.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::model::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Toggle,
    Cycle,
}

/// A per-row action the presentation layer may render as a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    ToggleComplete,
    Start,
    Complete,
    MoveToPending,
    Reopen,
    Edit,
    Delete,
}

impl TaskAction {
    pub fn label(&self) -> &'static str {
        match self {
            TaskAction::ToggleComplete => "Toggle completed",
            TaskAction::Start => "Move to in progress",
            TaskAction::Complete => "Mark as completed",
            TaskAction::MoveToPending => "Move to pending",
            TaskAction::Reopen => "Reopen as in progress",
            TaskAction::Edit => "Edit task",
            TaskAction::Delete => "Delete task",
        }
    }
}

impl TransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Toggle => "toggle",
            TransitionPolicy::Cycle => "cycle",
        }
    }

    /// Actions offered for a task in `status`, in button order.
    pub fn actions(&self, status: TaskStatus) -> Vec<TaskAction> {
        match (self, status) {
            (TransitionPolicy::Toggle, _) => vec![
                TaskAction::ToggleComplete,
                TaskAction::Edit,
                TaskAction::Delete,
            ],
            (TransitionPolicy::Cycle, TaskStatus::Pending) => {
                vec![TaskAction::Start, TaskAction::Edit, TaskAction::Delete]
            }
            (TransitionPolicy::Cycle, TaskStatus::InProgress) => vec![
                TaskAction::Complete,
                TaskAction::MoveToPending,
                TaskAction::Edit,
                TaskAction::Delete,
            ],
            (TransitionPolicy::Cycle, TaskStatus::Completed) => vec![
                TaskAction::Reopen,
                TaskAction::MoveToPending,
                TaskAction::Delete,
            ],
        }
    }

    pub fn allows(&self, status: TaskStatus, action: TaskAction) -> bool {
        self.actions(status).contains(&action)
    }

    /// Status a task ends up in after `action`, or `None` when the action is not a
    /// status transition or is not offered from `status`.
    pub fn next_status(&self, status: TaskStatus, action: TaskAction) -> Option<TaskStatus> {
        if !self.allows(status, action) {
            return None;
        }
        match action {
            TaskAction::ToggleComplete => Some(match status {
                TaskStatus::Completed => TaskStatus::Pending,
                TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
            }),
            TaskAction::Start | TaskAction::Reopen => Some(TaskStatus::InProgress),
            TaskAction::Complete => Some(TaskStatus::Completed),
            TaskAction::MoveToPending => Some(TaskStatus::Pending),
            TaskAction::Edit | TaskAction::Delete => None,
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toggle" => Ok(TransitionPolicy::Toggle),
            "cycle" => Ok(TransitionPolicy::Cycle),
            other => Err(anyhow!(
                "Unknown transition policy '{}': expected toggle|cycle",
                other
            )),
        }
    }
}
