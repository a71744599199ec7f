//! Calendar week window used by the weekly reservation cap.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// The calendar week containing a given instant.
///
/// Weeks start on Sunday, matching the rollover arithmetic the product
/// has always used: start = date minus its weekday offset truncated to
/// midnight, end = start + 6 days at the last millisecond of the day.
/// Usage counts are always derived by filtering history against this
/// window, never kept as a stored weekly counter that could drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWeek {
    start: Timestamp,
    end: Timestamp,
}

impl CalendarWeek {
    /// Returns the week containing `instant`.
    pub fn containing(instant: Timestamp) -> Self {
        let days_from_sunday = instant.as_datetime().weekday().num_days_from_sunday() as i64;
        let start = instant.minus_days(days_from_sunday).start_of_day();
        let end = start.add_days(6).end_of_day();
        Self { start, end }
    }

    /// First instant of the week (Sunday 00:00:00.000 UTC).
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Last counted instant of the week (Saturday 23:59:59.999 UTC).
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether `instant` falls within this week, boundaries inclusive.
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant <= self.end
    }
}
