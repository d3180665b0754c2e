//! Deadline shortcuts offered next to the date/time inputs.

use super::week::end_of_week;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One-click deadline presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickPick {
    /// Today at 18:00.
    Today18,
    /// Tomorrow at 09:00.
    Tomorrow9,
    /// The next Monday strictly after today, at 09:00.
    NextMonday9,
    /// Sunday of the current week at 18:00.
    EndOfWeek18,
    /// One hour from now.
    InOneHour,
    /// Three days from today at 18:00.
    InThreeDays,
}

impl QuickPick {
    pub const ALL: [QuickPick; 6] = [
        Self::Today18,
        Self::Tomorrow9,
        Self::NextMonday9,
        Self::EndOfWeek18,
        Self::InOneHour,
        Self::InThreeDays,
    ];

    /// Stable key used by the UI (`today-18`, `in-1h`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Today18 => "today-18",
            Self::Tomorrow9 => "tomorrow-9",
            Self::NextMonday9 => "next-monday-9",
            Self::EndOfWeek18 => "end-week-18",
            Self::InOneHour => "in-1h",
            Self::InThreeDays => "in-3d",
        }
    }

    /// Resolves the preset against the current local instant.
    pub fn resolve(self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        match self {
            Self::Today18 => at_hour(today, 18),
            Self::Tomorrow9 => at_hour(today + Duration::days(1), 9),
            Self::NextMonday9 => {
                let ahead = 7 - i64::from(today.weekday().num_days_from_monday());
                at_hour(today + Duration::days(ahead), 9)
            }
            Self::EndOfWeek18 => at_hour(end_of_week(now).date(), 18),
            Self::InOneHour => now + Duration::hours(1),
            Self::InThreeDays => at_hour(today + Duration::days(3), 18),
        }
    }
}

impl Display for QuickPick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Quick pick key not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQuickPick(pub String);

impl Display for UnknownQuickPick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown quick pick `{}`", self.0)
    }
}

impl std::error::Error for UnknownQuickPick {}

impl FromStr for QuickPick {
    type Err = UnknownQuickPick;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim();
        Self::ALL
            .into_iter()
            .find(|pick| pick.key() == key)
            .ok_or_else(|| UnknownQuickPick(key.to_string()))
    }
}

fn at_hour(date: NaiveDate, hour: i64) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(hour)
}

#[cfg(test)]
mod tests {
    use super::QuickPick;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn fixed_hour_picks() {
        // 2024-01-03 is a Wednesday.
        let now = at(2024, 1, 3, 10, 17);
        assert_eq!(QuickPick::Today18.resolve(now), at(2024, 1, 3, 18, 0));
        assert_eq!(QuickPick::Tomorrow9.resolve(now), at(2024, 1, 4, 9, 0));
        assert_eq!(QuickPick::EndOfWeek18.resolve(now), at(2024, 1, 7, 18, 0));
        assert_eq!(QuickPick::InThreeDays.resolve(now), at(2024, 1, 6, 18, 0));
        assert_eq!(QuickPick::InOneHour.resolve(now), at(2024, 1, 3, 11, 17));
    }

    #[test]
    fn next_monday_always_moves_forward() {
        assert_eq!(
            QuickPick::NextMonday9.resolve(at(2024, 1, 1, 8, 0)),
            at(2024, 1, 8, 9, 0)
        );
        assert_eq!(
            QuickPick::NextMonday9.resolve(at(2024, 1, 7, 23, 0)),
            at(2024, 1, 8, 9, 0)
        );
        assert_eq!(
            QuickPick::NextMonday9.resolve(at(2024, 1, 6, 12, 0)),
            at(2024, 1, 8, 9, 0)
        );
    }

    #[test]
    fn keys_round_trip() {
        for pick in QuickPick::ALL {
            assert_eq!(pick.key().parse::<QuickPick>().unwrap(), pick);
        }
        assert!("someday".parse::<QuickPick>().is_err());
    }
}
