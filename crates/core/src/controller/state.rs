//! Presentation-only state kept next to the task list.

use crate::model::TaskStatus;
use crate::projection::Bucket;

/// Collapse state of each status section; every section starts expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedSections {
    in_progress: bool,
    pending: bool,
    completed: bool,
}

impl Default for ExpandedSections {
    fn default() -> Self {
        Self {
            in_progress: true,
            pending: true,
            completed: true,
        }
    }
}

impl ExpandedSections {
    pub fn is_expanded(&self, status: TaskStatus) -> bool {
        match status {
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Pending => self.pending,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn toggle(&mut self, status: TaskStatus) {
        let slot = match status {
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::Completed => &mut self.completed,
        };
        *slot = !*slot;
    }
}

/// A projected section together with its collapse flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView<'a> {
    pub bucket: Bucket<'a>,
    pub expanded: bool,
}

impl<'a> SectionView<'a> {
    pub fn status(&self) -> TaskStatus {
        self.bucket.status
    }

    pub fn count(&self) -> usize {
        self.bucket.count()
    }
}
