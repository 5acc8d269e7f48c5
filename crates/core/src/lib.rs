//! Task state, persistence, and list-screen projection for the todo tracker.

pub mod capture;
pub mod config;
pub mod controller;
pub mod database;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod projection;
pub mod services;
pub mod telemetry;
pub mod transitions;

pub use capture::{CaptureError, TaskFields};
pub use config::AppConfig;
pub use controller::{Controller, ReadModel, TaskForm};
pub use database::SqliteStore;
pub use model::*;
pub use persistence::{KeyValueStore, MemoryStore, Persistence, StorageError};
pub use projection::{project, Bucket, Projection};
pub use services::TaskStore;
pub use transitions::{TaskAction, TransitionPolicy};
