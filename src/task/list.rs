//! In-memory task set and its JSON snapshot codec

use chrono::NaiveDateTime;
use tracing::debug;

use super::error::{Result, TaskError};
use super::model::{Task, TaskId, TaskStatus};

/// The active task set, in insertion order.
///
/// IDs always run 1..=N in list order; deleting a task renumbers every
/// survivor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-built tasks, checking ID density and descriptions
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self> {
        validate(&tasks)?;
        Ok(Self { tasks })
    }

    /// Decode a JSON snapshot. Blank input is an empty list.
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(content)?;
        Self::from_tasks(tasks)
    }

    /// Encode as a pretty-printed JSON snapshot
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tasks)?)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Get a task by ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get tasks by status
    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Append a new todo task
    pub fn add(
        &mut self,
        description: &str,
        due_at: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<&Task> {
        let description = clean_description(description)?;
        let id = TaskId::from_index(self.tasks.len())?;

        let mut task = Task::new(id, description, now);
        task.due_at = due_at;
        self.tasks.push(task);

        debug!("Added task {}", id);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replace a task's description
    pub fn update_description(
        &mut self,
        id: TaskId,
        description: &str,
        now: NaiveDateTime,
    ) -> Result<&Task> {
        let description = clean_description(description)?;
        let task = self.get_mut(id)?;
        task.description = description;
        task.touch(now);
        Ok(&*task)
    }

    /// Move a task to any status
    pub fn mark(&mut self, id: TaskId, status: TaskStatus, now: NaiveDateTime) -> Result<&Task> {
        let task = self.get_mut(id)?;
        task.status = status;
        task.touch(now);
        Ok(&*task)
    }

    /// Set or clear a deadline
    pub fn set_due(
        &mut self,
        id: TaskId,
        due_at: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<&Task> {
        let task = self.get_mut(id)?;
        task.due_at = due_at;
        task.touch(now);
        Ok(&*task)
    }

    /// Remove a task and renumber the rest
    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;

        let removed = self.tasks.remove(pos);
        self.reindex();
        Ok(removed)
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    /// Survivors of a deletion number fewer than the IDs already in use,
    /// so counting up from 1 always fits.
    fn reindex(&mut self) {
        for (task, number) in self.tasks.iter_mut().zip(1u32..) {
            task.id = TaskId(number);
        }
        debug!("Reindexed {} tasks", self.tasks.len());
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

fn clean_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

fn validate(tasks: &[Task]) -> Result<()> {
    for (index, task) in tasks.iter().enumerate() {
        let expected = TaskId::from_index(index)?;
        if task.id != expected {
            return Err(TaskError::InvalidInput(format!(
                "task ids must run 1..{} in order, found id {} where {} was expected",
                tasks.len(),
                task.id,
                expected
            )));
        }
        if task.description.trim().is_empty() {
            return Err(TaskError::InvalidInput(format!(
                "task {} has an empty description",
                task.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::parse_timestamp;

    const SAMPLE_TASKS: &str = r#"[
  {"id": 1, "description": "Buy milk", "status": "todo", "createdAt": "2025-03-01 09:00:00"},
  {"id": 2, "description": "Ship release", "status": "in-progress", "createdAt": "2025-03-02 10:00:00", "dueAt": "2025-03-05 18:00:00"},
  {"id": 3, "description": "File taxes", "status": "done", "createdAt": "2025-03-03 11:00:00", "updatedAt": "2025-03-04 12:00:00"}
]"#;

    fn at(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_snapshot() -> Result<()> {
        let list = TaskList::from_json(SAMPLE_TASKS)?;

        assert_eq!(list.len(), 3);
        let task2 = list.get(TaskId(2)).unwrap();
        assert_eq!(task2.description, "Ship release");
        assert_eq!(task2.status, TaskStatus::InProgress);
        assert_eq!(task2.due_at, Some(at("2025-03-05 18:00:00")));
        assert_eq!(list.by_status(TaskStatus::Done).len(), 1);
        Ok(())
    }

    #[test]
    fn test_blank_snapshot_is_empty() -> Result<()> {
        assert!(TaskList::from_json("")?.is_empty());
        assert!(TaskList::from_json("  \n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_snapshot_rejects_unknown_status() {
        let bad = r#"[{"id": 1, "description": "x", "status": "blocked", "createdAt": "2025-03-01 09:00:00"}]"#;
        assert!(matches!(TaskList::from_json(bad), Err(TaskError::Snapshot(_))));
    }

    #[test]
    fn test_snapshot_rejects_bad_timestamp() {
        let bad = r#"[{"id": 1, "description": "x", "status": "todo", "createdAt": "03/01/2025"}]"#;
        assert!(matches!(TaskList::from_json(bad), Err(TaskError::Snapshot(_))));
    }

    #[test]
    fn test_snapshot_rejects_sparse_ids() {
        let bad = r#"[
          {"id": 1, "description": "a", "status": "todo", "createdAt": "2025-03-01 09:00:00"},
          {"id": 3, "description": "b", "status": "todo", "createdAt": "2025-03-01 09:00:00"}
        ]"#;
        assert!(matches!(TaskList::from_json(bad), Err(TaskError::InvalidInput(_))));
    }

    #[test]
    fn test_snapshot_survives_reencoding() -> Result<()> {
        let list = TaskList::from_json(SAMPLE_TASKS)?;
        let again = TaskList::from_json(&list.to_json()?)?;
        assert_eq!(again, list);
        Ok(())
    }

    #[test]
    fn test_add_assigns_next_id() -> Result<()> {
        let now = at("2025-04-01 08:00:00");
        let mut list = TaskList::new();
        list.add("first", None, now)?;
        let second = list.add("  second  ", Some(at("2025-04-02 08:00:00")), now)?;

        assert_eq!(second.id, TaskId(2));
        assert_eq!(second.description, "second");
        assert_eq!(second.status, TaskStatus::Todo);
        assert_eq!(second.created_at, now);
        assert_eq!(second.updated_at, None);
        Ok(())
    }

    #[test]
    fn test_add_rejects_empty_description() {
        let mut list = TaskList::new();
        let result = list.add("   ", None, at("2025-04-01 08:00:00"));
        assert!(matches!(result, Err(TaskError::EmptyDescription)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_mark_any_transition_stamps_updated_at() -> Result<()> {
        let mut list = TaskList::from_json(SAMPLE_TASKS)?;
        let now = at("2025-03-10 15:00:00");

        let task = list.mark(TaskId(3), TaskStatus::Todo, now)?;
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.updated_at, Some(now));
        assert_eq!(task.created_at, at("2025-03-03 11:00:00"));

        let task = list.mark(TaskId(1), TaskStatus::Done, now)?;
        assert_eq!(task.status, TaskStatus::Done);
        Ok(())
    }

    #[test]
    fn test_update_description() -> Result<()> {
        let mut list = TaskList::from_json(SAMPLE_TASKS)?;
        let now = at("2025-03-10 15:00:00");

        let task = list.update_description(TaskId(1), "Buy oat milk", now)?;
        assert_eq!(task.description, "Buy oat milk");
        assert_eq!(task.updated_at, Some(now));

        assert!(matches!(
            list.update_description(TaskId(9), "nope", now),
            Err(TaskError::NotFound(TaskId(9)))
        ));
        Ok(())
    }

    #[test]
    fn test_set_due_clears_deadline() -> Result<()> {
        let mut list = TaskList::from_json(SAMPLE_TASKS)?;
        let task = list.set_due(TaskId(2), None, at("2025-03-10 15:00:00"))?;
        assert_eq!(task.due_at, None);
        Ok(())
    }

    #[test]
    fn test_delete_reindexes_survivors() -> Result<()> {
        let mut list = TaskList::from_json(SAMPLE_TASKS)?;

        let removed = list.delete(TaskId(1))?;
        assert_eq!(removed.description, "Buy milk");

        let ids: Vec<u32> = list.iter().map(|t| t.id.number()).collect();
        assert_eq!(ids, vec![1, 2]);
        let descriptions: Vec<&str> = list.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Ship release", "File taxes"]);

        assert!(matches!(list.delete(TaskId(3)), Err(TaskError::NotFound(_))));
        Ok(())
    }
}
