//! Agape library - ranking and presentation core for a personal task tracker
//!
//! The caller owns the clock, the task file and the command line. Everything
//! here works on an in-memory snapshot and an injected `now`.

pub mod config;
pub mod format;
pub mod listing;
pub mod rank;
pub mod task;

pub use config::Config;
pub use format::{format_due_label, format_relative_age};
pub use listing::{ListOptions, Listing};
pub use rank::{score, smart_sort, UrgencyScorer};
pub use task::{Task, TaskError, TaskId, TaskList, TaskStatus};
