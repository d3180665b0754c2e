//! Urgency score and display order.
//!
//! # Invariants
//! - `score = priority_weight * 2 + time_weight`.
//! - Ordering is descending by score and stable for ties.
//! - `done` never affects score or position.

use crate::model::task::{Deadline, Task};
use chrono::{Duration, NaiveDateTime};

/// Whole days until `deadline`, floored; negative once the deadline passed.
///
/// Flooring uses the full-precision delta, so a deadline missed by any
/// amount (even under a millisecond) yields `-1`.
pub fn days_until(deadline: &Deadline, now: NaiveDateTime) -> i64 {
    let delta = deadline.at().signed_duration_since(now);
    // num_days truncates toward zero.
    let whole = delta.num_days();
    if delta < Duration::days(whole) {
        whole - 1
    } else {
        whole
    }
}

/// Deadline-proximity component of the score.
pub fn time_weight(days: i64) -> u32 {
    match days {
        d if d < 0 => 10,
        0 => 8,
        1 => 6,
        2..=3 => 4,
        4..=7 => 2,
        _ => 0,
    }
}

/// Strictly before `now`. Used for visual flagging only.
pub fn is_overdue(deadline: &Deadline, now: NaiveDateTime) -> bool {
    deadline.at() < now
}

pub fn urgency_score(task: &Task, now: NaiveDateTime) -> u32 {
    task.priority.weight() * 2 + time_weight(days_until(&task.deadline, now))
}

/// Human-facing due bucket derived from [`days_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    InDays(i64),
}

impl DueBucket {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Overdue,
            0 => Self::Today,
            1 => Self::Tomorrow,
            d => Self::InDays(d),
        }
    }
}

/// One ranked task together with the values that placed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTask {
    pub task: Task,
    pub score: u32,
    pub days_until: i64,
    pub overdue: bool,
    pub due: DueBucket,
}

impl RankedTask {
    pub fn evaluate(task: Task, now: NaiveDateTime) -> Self {
        let days = days_until(&task.deadline, now);
        Self {
            score: task.priority.weight() * 2 + time_weight(days),
            overdue: is_overdue(&task.deadline, now),
            due: DueBucket::from_days(days),
            days_until: days,
            task,
        }
    }
}

/// Scores and orders tasks, most urgent first.
pub fn rank_entries(tasks: impl IntoIterator<Item = Task>, now: NaiveDateTime) -> Vec<RankedTask> {
    let mut entries: Vec<RankedTask> = tasks
        .into_iter()
        .map(|task| RankedTask::evaluate(task, now))
        .collect();
    // `sort_by` is stable; ties keep store order.
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Orders tasks by descending urgency, keeping input order for ties.
pub fn rank_by_urgency(tasks: impl IntoIterator<Item = Task>, now: NaiveDateTime) -> Vec<Task> {
    rank_entries(tasks, now)
        .into_iter()
        .map(|entry| entry.task)
        .collect()
}
