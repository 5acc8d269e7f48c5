pub use todo_core as core;
pub use todo_core::capture;
pub use todo_core::config;
pub use todo_core::controller;
pub use todo_core::database as db;
pub use todo_core::logging;
pub use todo_core::model;
pub use todo_core::persistence;
pub use todo_core::projection;
pub use todo_core::transitions;

pub use todo_core::{AppConfig, Controller};
