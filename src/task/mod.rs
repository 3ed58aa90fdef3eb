//! Task management module
//!
//! This module provides the task set the ranking and listing code works on:
//! - Task model with a closed status enum
//! - Dense 1..N IDs, renumbered after deletion
//! - JSON snapshot decoding with validation at the load boundary

pub mod error;
pub mod list;
pub mod model;

pub use error::TaskError;
pub use list::TaskList;
pub use model::{parse_timestamp, Task, TaskId, TaskStatus, TIMESTAMP_FORMAT};
