//! ISO week window.
//!
//! # Invariants
//! - Weeks start Monday 00:00:00.000 and end Sunday 23:59:59.999.
//! - Sunday belongs to the week that started the previous Monday.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

/// Returns midnight of the Monday on or before `reference`'s date.
pub fn start_of_week(reference: NaiveDateTime) -> NaiveDateTime {
    let date = reference.date();
    let back = i64::from(date.weekday().num_days_from_monday());
    (date - Duration::days(back)).and_time(NaiveTime::MIN)
}

/// Returns 23:59:59.999 of the Sunday closing `reference`'s week.
pub fn end_of_week(reference: NaiveDateTime) -> NaiveDateTime {
    start_of_week(reference) + Duration::days(7) - Duration::milliseconds(1)
}

/// Inclusive `[start, end]` range of one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekWindow {
    pub fn containing(reference: NaiveDateTime) -> Self {
        Self {
            start: start_of_week(reference),
            end: end_of_week(reference),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::{end_of_week, start_of_week, WeekWindow};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn wednesday_maps_to_surrounding_monday_and_sunday() {
        // 2024-01-03 is a Wednesday.
        let reference = at(2024, 1, 3, 15, 45);
        assert_eq!(start_of_week(reference), at(2024, 1, 1, 0, 0));
        assert_eq!(
            end_of_week(reference),
            NaiveDate::from_ymd_opt(2024, 1, 7)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
        );
    }

    #[test]
    fn sunday_belongs_to_previous_monday() {
        let sunday = at(2024, 1, 7, 9, 0);
        assert_eq!(start_of_week(sunday), at(2024, 1, 1, 0, 0));
    }

    #[test]
    fn monday_midnight_starts_its_own_week() {
        let monday = at(2024, 1, 8, 0, 0);
        assert_eq!(start_of_week(monday), monday);
    }

    #[test]
    fn week_crossing_year_boundary() {
        // 2025-01-01 is a Wednesday; its week starts 2024-12-30.
        let reference = at(2025, 1, 1, 12, 0);
        assert_eq!(start_of_week(reference), at(2024, 12, 30, 0, 0));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = WeekWindow::containing(at(2024, 1, 3, 12, 0));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.end + Duration::microseconds(1)));
        assert!(!window.contains(window.start - Duration::microseconds(1)));
    }
}
