//! Reference calendar for date-dependent rules
//!
//! Weekend bonuses and "this month" totals depend on which calendar day a
//! timestamp falls on. Rather than using whatever zone the caller runs in,
//! the rate card pins a fixed UTC offset and every date rule goes through it.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Largest offset the calendar accepts, in minutes (±18h)
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCalendar {
    /// Offset from UTC in minutes (0 = UTC)
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl ReferenceCalendar {
    pub fn utc() -> Self {
        Self::default()
    }

    pub fn with_offset_minutes(utc_offset_minutes: i32) -> Self {
        Self { utc_offset_minutes }
    }

    pub fn is_valid(&self) -> bool {
        self.utc_offset_minutes.abs() <= MAX_OFFSET_MINUTES
    }

    /// Fixed offset for this calendar. Out-of-range offsets fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        if !self.is_valid() {
            return Utc.fix();
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    pub fn local(&self, ts: DateTime<Utc>) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.offset())
    }

    /// Saturday or Sunday in the reference calendar
    pub fn is_weekend(&self, ts: DateTime<Utc>) -> bool {
        matches!(self.local(ts).weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn same_month(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        let (a, b) = (self.local(a), self.local(b));
        a.year() == b.year() && a.month() == b.month()
    }
}
