use thiserror::Error;

use super::model::TaskId;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task description cannot be empty")]
    EmptyDescription,

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error(
        "Unknown status: {0}\n\
         Expected one of: todo, in-progress, done"
    )]
    UnknownStatus(String),

    #[error("Invalid task snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
