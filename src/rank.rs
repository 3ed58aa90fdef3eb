//! Urgency scoring for the smart list

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::{ConfigError, RankingConfig};
use crate::task::{Task, TaskStatus};

/// Score of every done task; below anything a pending task can reach.
pub const DONE_SCORE: f64 = -1000.0;

pub const IN_PROGRESS_BONUS: f64 = 500.0;
pub const OVERDUE_BONUS: f64 = 2000.0;
pub const DUE_SOON_BONUS: f64 = 1000.0;
pub const UPCOMING_BONUS: f64 = 500.0;
pub const RECENCY_DIVISOR: f64 = 100_000.0;
/// Exclusive upper bound on the recency tie-breaker, kept under the smallest band.
pub const RECENCY_CAP: f64 = 400.0;

/// Reference instant for the recency bonus (2025-01-01 00:00:00).
pub fn recency_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Ranks tasks for the smart list. Higher is more urgent.
#[derive(Debug, Clone, PartialEq)]
pub struct UrgencyScorer {
    in_progress_bonus: f64,
    overdue_bonus: f64,
    due_soon_bonus: f64,
    upcoming_bonus: f64,
    recency_divisor: f64,
    recency_cap: f64,
    epoch: NaiveDateTime,
}

impl Default for UrgencyScorer {
    fn default() -> Self {
        Self::from_weights(&RankingConfig::default())
    }
}

impl UrgencyScorer {
    /// Build a scorer from weights, rejecting any that would break the ranking
    pub fn new(config: &RankingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_weights(config))
    }

    fn from_weights(config: &RankingConfig) -> Self {
        Self {
            in_progress_bonus: config.in_progress_bonus,
            overdue_bonus: config.overdue_bonus,
            due_soon_bonus: config.due_soon_bonus,
            upcoming_bonus: config.upcoming_bonus,
            recency_divisor: config.recency_divisor,
            recency_cap: config.recency_cap,
            epoch: recency_epoch(),
        }
    }

    pub fn score(&self, task: &Task, now: NaiveDateTime) -> f64 {
        if task.status == TaskStatus::Done {
            return DONE_SCORE;
        }

        let mut score = 0.0;
        if task.status == TaskStatus::InProgress {
            score += self.in_progress_bonus;
        }

        if let Some(due) = task.due_at {
            score += self.deadline_bonus(due - now);
        }

        score + self.recency_bonus(task.created_at)
    }

    fn deadline_bonus(&self, time_diff: Duration) -> f64 {
        if time_diff < Duration::zero() {
            self.overdue_bonus
        } else if time_diff < Duration::hours(24) {
            self.due_soon_bonus
        } else if time_diff < Duration::days(3) {
            self.upcoming_bonus
        } else {
            0.0
        }
    }

    /// Squashes `(created_at - epoch) / divisor` into `(0, recency_cap)`.
    ///
    /// Strictly increasing in `created_at`, centred on `recency_cap / 2` at the
    /// epoch with slope 1 there, so nearby tasks keep the raw spacing.
    fn recency_bonus(&self, created_at: NaiveDateTime) -> f64 {
        let x = (created_at - self.epoch).num_seconds() as f64 / self.recency_divisor;
        let half = self.recency_cap / 2.0;
        half + half * x / (x.abs() + half)
    }

    /// Stable sort, most urgent first. Equal scores keep their input order.
    pub fn sort<T: AsRef<Task>>(&self, tasks: &mut [T], now: NaiveDateTime) {
        tasks.sort_by(|a, b| {
            self.score(b.as_ref(), now)
                .total_cmp(&self.score(a.as_ref(), now))
        });
        debug!("Smart-sorted {} tasks", tasks.len());
    }
}

/// Score with the default weights
pub fn score(task: &Task, now: NaiveDateTime) -> f64 {
    UrgencyScorer::default().score(task, now)
}

/// Smart-sort with the default weights
pub fn smart_sort<T: AsRef<Task>>(tasks: &mut [T], now: NaiveDateTime) {
    UrgencyScorer::default().sort(tasks, now)
}
