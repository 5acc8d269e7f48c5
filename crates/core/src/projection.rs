use crate::model::{FilterStatus, Task, TaskStatus};

pub const EMPTY_BUCKET_LABEL: &str = "No tasks found";

/// One status section of the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

impl<'a> Bucket<'a> {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Text rendered in place of rows when the section has none.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_BUCKET_LABEL)
    }

    /// Section heading, e.g. `In Progress (2)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.status, self.count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub buckets: Vec<Bucket<'a>>,
}

impl<'a> Projection<'a> {
    pub fn bucket(&self, status: TaskStatus) -> Option<&Bucket<'a>> {
        self.buckets.iter().find(|bucket| bucket.status == status)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Bucket::count).sum()
    }
}

pub fn matches_query(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
}

/// Groups the search-filtered tasks into the sections visible under `filter`.
///
/// Sections follow [`TaskStatus::DISPLAY_ORDER`]; rows keep the order of `tasks`.
pub fn project<'a>(tasks: &'a [Task], query: &str, filter: FilterStatus) -> Projection<'a> {
    let needle = query.to_lowercase();
    let matching: Vec<&Task> = tasks
        .iter()
        .filter(|task| matches_query(task, &needle))
        .collect();

    let buckets = filter
        .visible_statuses()
        .iter()
        .map(|status| Bucket {
            status: *status,
            tasks: matching
                .iter()
                .copied()
                .filter(|task| task.status == *status)
                .collect(),
        })
        .collect();

    Projection { buckets }
}
