//! In-process journal of controller events, mirrored to `tracing` for local diagnostics.

#[cfg(feature = "telemetry")]
use std::collections::VecDeque;

#[cfg(feature = "telemetry")]
use parking_lot::Mutex;

use crate::model::{FilterStatus, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SessionStarted { tasks: usize },
    TaskAdded(String),
    TaskEdited(String),
    TaskDeleted(String),
    StatusChanged { id: String, status: TaskStatus },
    FilterChanged(FilterStatus),
    SubmissionRejected(String),
    StaleReference { action: &'static str, id: String },
}

/// Oldest events are dropped once the journal holds this many.
pub const JOURNAL_CAPACITY: usize = 256;

#[derive(Debug, Default)]
pub struct Handle {
    #[cfg(feature = "telemetry")]
    events: Mutex<VecDeque<Event>>,
}

impl Handle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        #[cfg(feature = "telemetry")]
        {
            match &event {
                Event::SessionStarted { tasks } => {
                    tracing::debug!(tasks, "telemetry session started")
                }
                Event::TaskAdded(id) => tracing::debug!(task_id = id.as_str(), "telemetry task added"),
                Event::TaskEdited(id) => {
                    tracing::debug!(task_id = id.as_str(), "telemetry task edited")
                }
                Event::TaskDeleted(id) => {
                    tracing::debug!(task_id = id.as_str(), "telemetry task deleted")
                }
                Event::StatusChanged { id, status } => tracing::debug!(
                    task_id = id.as_str(),
                    status = status.as_str(),
                    "telemetry status changed"
                ),
                Event::FilterChanged(filter) => {
                    tracing::debug!(filter = filter.as_str(), "telemetry filter changed")
                }
                Event::SubmissionRejected(reason) => {
                    tracing::debug!(reason = reason.as_str(), "telemetry submission rejected")
                }
                Event::StaleReference { action, id } => tracing::debug!(
                    action = *action,
                    task_id = id.as_str(),
                    "telemetry stale task reference"
                ),
            }
            let mut events = self.events.lock();
            if events.len() == JOURNAL_CAPACITY {
                events.pop_front();
            }
            events.push_back(event);
        }
        #[cfg(not(feature = "telemetry"))]
        {
            let _ = event;
        }
    }

    pub fn is_enabled(&self) -> bool {
        cfg!(feature = "telemetry")
    }

    /// The most recent events, oldest first. Always empty without the `telemetry` feature.
    pub fn events(&self) -> Vec<Event> {
        #[cfg(feature = "telemetry")]
        {
            self.events.lock().iter().cloned().collect()
        }
        #[cfg(not(feature = "telemetry"))]
        {
            Vec::new()
        }
    }
}
