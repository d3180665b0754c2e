//! Search and week-membership predicates.
//!
//! # Invariants
//! - An empty (after trim) query matches every task.
//! - Week membership is inclusive on both window bounds.
//! - Filtering preserves input order.

use crate::model::task::Task;
use crate::schedule::week::WeekWindow;
use chrono::NaiveDateTime;

/// Filter options coming from the search box and the week toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub only_this_week: bool,
}

impl TaskFilter {
    pub fn new(query: impl Into<String>, only_this_week: bool) -> Self {
        Self {
            query: query.into(),
            only_this_week,
        }
    }

    /// Returns the tasks passing both predicates, in input order.
    pub fn apply(&self, tasks: &[Task], now: NaiveDateTime) -> Vec<Task> {
        let needle = normalize_query(&self.query);
        let window = WeekWindow::containing(now);
        tasks
            .iter()
            .filter(|task| {
                matches_text(task, &needle) && (!self.only_this_week || within_week(task, &window))
            })
            .cloned()
            .collect()
    }
}

/// Trims and lowercases a raw search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring match on title or description.
///
/// `needle` must already be normalized with [`normalize_query`].
pub fn matches_text(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
}

pub fn within_week(task: &Task, window: &WeekWindow) -> bool {
    window.contains(task.deadline.at())
}

#[cfg(test)]
mod tests {
    use super::{matches_text, normalize_query, TaskFilter};
    use crate::model::task::{Deadline, Priority, Task, TaskDraft};
    use crate::schedule::week::end_of_week;
    use chrono::Duration;

    fn task(id: &str, title: &str, description: &str, deadline: &str) -> Task {
        let draft = TaskDraft::new(title, Deadline::parse(deadline).unwrap(), Priority::Low)
            .with_description(description);
        Task::with_id(id, draft, 0)
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let report = task("a", "Quarterly REPORT", "", "2024-01-02T10:00");
        let call = task("b", "Call", "discuss the Report draft", "2024-01-02T10:00");
        let other = task("c", "Groceries", "milk", "2024-01-02T10:00");

        let needle = normalize_query("  report ");
        assert!(matches_text(&report, &needle));
        assert!(matches_text(&call, &needle));
        assert!(!matches_text(&other, &needle));
    }

    #[test]
    fn search_lowercases_unicode() {
        let task = task("a", "Revisão ÁGIL", "", "2024-01-02T10:00");
        assert!(matches_text(&task, &normalize_query("ágil")));
        assert!(matches_text(&task, &normalize_query("REVISÃO")));
    }

    #[test]
    fn blank_query_matches_everything() {
        let tasks = vec![
            task("a", "one", "", "2024-01-02T10:00"),
            task("b", "two", "", "2030-01-02T10:00"),
        ];
        let now = Deadline::parse("2024-01-03T09:00").unwrap().at();
        assert_eq!(TaskFilter::new("   ", false).apply(&tasks, now), tasks);
    }

    #[test]
    fn week_filter_is_inclusive_at_end_of_week() {
        let now = Deadline::parse("2024-01-03T09:00").unwrap().at();
        let end = end_of_week(now);
        let at_end = Task::with_id(
            "edge",
            TaskDraft::new("edge", end.into(), Priority::Low),
            0,
        );
        let after_end = Task::with_id(
            "after",
            TaskDraft::new("after", (end + Duration::microseconds(1)).into(), Priority::Low),
            0,
        );
        let monday = task("monday", "monday", "", "2024-01-01T00:00");
        let last_sunday = task("prev", "prev", "", "2023-12-31T23:59");

        let filtered = TaskFilter::new("", true).apply(
            &[at_end, after_end, monday, last_sunday],
            now,
        );
        let ids: Vec<&str> = filtered.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["edge", "monday"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let now = Deadline::parse("2024-01-03T09:00").unwrap().at();
        let tasks = vec![
            task("a", "report", "", "2024-01-04T10:00"),
            task("b", "report", "", "2024-01-20T10:00"),
            task("c", "groceries", "", "2024-01-04T10:00"),
        ];
        let filtered = TaskFilter::new("Report", true).apply(&tasks, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }
}
