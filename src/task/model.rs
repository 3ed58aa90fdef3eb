//! Task data model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{Result, TaskError};

/// Text form of every timestamp stored in a task snapshot.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a snapshot timestamp (`YYYY-MM-DD HH:MM:SS`).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| TaskError::InvalidInput(format!("bad timestamp {:?}: {}", s, e)))
}

/// Dense, 1-based task ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl TaskId {
    /// ID for the task at a zero-based position in the active set
    pub fn from_index(index: usize) -> Result<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|n| n.checked_add(1))
            .map(Self)
            .ok_or_else(|| TaskError::InvalidInput(format!("task position {} has no valid id", index)))
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Completed
    Done,
}

impl TaskStatus {
    /// Get the icon shown in listings
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Todo => "☐",
            Self::InProgress => "◐",
            Self::Done => "✓",
        }
    }

    /// Get the text label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(TaskError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Position-derived ID, reassigned on deletion
    pub id: TaskId,

    pub description: String,

    #[serde(default)]
    pub status: TaskStatus,

    /// Set once at creation
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,

    /// Deadline (if any)
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub due_at: Option<NaiveDateTime>,

    /// Last description or status change
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    /// Create a new todo task
    pub fn new(id: TaskId, description: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            description: description.into(),
            status: TaskStatus::Todo,
            created_at,
            due_at: None,
            updated_at: None,
        }
    }

    /// Builder-style deadline
    pub fn with_due(mut self, due_at: NaiveDateTime) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Builder-style status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Check if the deadline has passed on an unfinished task
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        match self.due_at {
            Some(due) => due < now && !self.is_done(),
            None => false,
        }
    }

    /// Record a modification
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = Some(now);
    }
}

impl AsRef<Task> for Task {
    fn as_ref(&self) -> &Task {
        self
    }
}

/// Serde adapters for [`TIMESTAMP_FORMAT`] strings
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_timestamp, TIMESTAMP_FORMAT};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::{parse_timestamp, TIMESTAMP_FORMAT};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.collect_str(&v.format(TIMESTAMP_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_timestamp(&raw).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
