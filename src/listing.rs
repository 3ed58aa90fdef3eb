//! Task listing: filter, optional smart ordering, plain-text rendering

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::format::{format_due_label, format_relative_age};
use crate::rank::UrgencyScorer;
use crate::task::{Task, TaskId, TaskStatus};

const COL_ID: usize = 4;
const COL_STATUS: usize = 4;
const RULE: &str = "─";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only show tasks in this status
    pub status: Option<TaskStatus>,

    /// Order by urgency instead of insertion order
    pub smart: bool,
}

/// One rendered task line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub id: TaskId,
    pub status: TaskStatus,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_label: String,
    pub age: String,
}

impl ListingRow {
    fn new(task: &Task, now: NaiveDateTime) -> Self {
        // Deadlines stop mattering once a task is done
        let due_label = if task.is_done() {
            String::new()
        } else {
            format_due_label(task.due_at, now)
        };

        Self {
            id: task.id,
            status: task.status,
            description: task.description.clone(),
            due_label,
            age: format_relative_age(task.created_at, now),
        }
    }

    fn plain_line(&self) -> String {
        let mut line = format!(
            "{:<3} {}  {}",
            self.id.to_string(),
            self.status.icon(),
            self.description
        );
        if !self.due_label.is_empty() {
            line.push_str(&format!(" ({})", self.due_label));
        }
        line.push_str(&format!("  · {}", self.age));
        line
    }
}

/// Footer counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub done: usize,
    pub active: usize,
    pub overdue: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("{} total", self.total)];
        if self.done > 0 {
            parts.push(format!("{} done", self.done));
        }
        if self.active > 0 {
            parts.push(format!("{} active", self.active));
        }
        if self.overdue > 0 {
            parts.push(format!("{} overdue", self.overdue));
        }
        f.write_str(&parts.join(" · "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub title: String,
    pub smart: bool,
    pub rows: Vec<ListingRow>,
    pub summary: Summary,
    #[serde(skip)]
    rule_width: usize,
}

impl Listing {
    pub fn build<'a, I>(
        tasks: I,
        options: &ListOptions,
        scorer: &UrgencyScorer,
        display: &DisplayConfig,
        now: NaiveDateTime,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut selected: Vec<&Task> = tasks
            .into_iter()
            .filter(|t| options.status.is_none_or(|s| t.status == s))
            .collect();

        if options.smart {
            scorer.sort(&mut selected, now);
        }

        let mut summary = Summary {
            total: selected.len(),
            ..Summary::default()
        };
        for task in &selected {
            match task.status {
                TaskStatus::Done => summary.done += 1,
                TaskStatus::InProgress => summary.active += 1,
                TaskStatus::Todo => {}
            }
            if task.is_overdue(now) {
                summary.overdue += 1;
            }
        }

        let rows: Vec<ListingRow> = selected.iter().map(|t| ListingRow::new(t, now)).collect();
        let widest = rows
            .iter()
            .map(|r| r.plain_line().width())
            .max()
            .unwrap_or(0);

        Self {
            title: format!(
                "{} - {}",
                display.title,
                if options.smart { "SMART" } else { "ALL" }
            ),
            smart: options.smart,
            rows,
            summary,
            rule_width: widest.max(display.min_rule_width),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rule_width(&self) -> usize {
        self.rule_width
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Nothing to show. Relax and enjoy.");
        }

        let rule = RULE.repeat(self.rule_width);

        writeln!(f, "{}", self.title)?;
        writeln!(f, "{} tasks", self.summary.total)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<width_id$}{:<width_status$}TASK",
            "ID",
            "S",
            width_id = COL_ID,
            width_status = COL_STATUS
        )?;
        writeln!(f, "{}", rule)?;
        for row in &self.rows {
            writeln!(f, "{}", row.plain_line())?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", self.summary)
    }
}
