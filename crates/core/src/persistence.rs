//! Write-through mirror of the task list and filter preference onto a key-value blob store.
//!
//! Storage is never authoritative: reads happen once at startup and every failure degrades
//! to an empty list or the default filter instead of reaching the caller.

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{FilterStatus, Task};

pub const TASKS_KEY: &str = "todotasks";
pub const FILTER_KEY: &str = "tasks_filter";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable string blobs addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn load(&self) -> Vec<Task> {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key = TASKS_KEY, error = %err, "failed to read stored tasks");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(key = TASKS_KEY, error = %err, "discarding unreadable task blob");
                Vec::new()
            }
        }
    }

    pub fn save(&mut self, tasks: &[Task]) {
        let serialized = match serde_json::to_string(tasks) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize tasks");
                return;
            }
        };
        if let Err(err) = self.store.set(TASKS_KEY, &serialized) {
            tracing::warn!(key = TASKS_KEY, error = %err, "failed to write tasks");
        }
    }

    pub fn load_filter_preference(&self) -> FilterStatus {
        match self.store.get(FILTER_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                tracing::debug!(error = %err, "ignoring stored filter preference");
                FilterStatus::All
            }),
            Ok(None) => FilterStatus::All,
            Err(err) => {
                tracing::warn!(key = FILTER_KEY, error = %err, "failed to read filter preference");
                FilterStatus::All
            }
        }
    }

    pub fn save_filter_preference(&mut self, filter: FilterStatus) {
        if let Err(err) = self.store.set(FILTER_KEY, filter.as_str()) {
            tracing::warn!(key = FILTER_KEY, error = %err, "failed to write filter preference");
        }
    }
}
