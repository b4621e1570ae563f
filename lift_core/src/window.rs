//! Calendar date windows used by every aggregate.
//!
//! A window is a closed range of calendar dates counted backwards from an
//! anchor: `start = anchor - (offset + length)`, `end = anchor - offset`.

use crate::TrainingRecord;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset of the recent (short-term) window
pub const RECENT_OFFSET_DAYS: i64 = 0;
/// Length of the recent window and of each charted week
pub const WEEK_DAYS: i64 = 7;
/// Offset of the reference (long-term) window
pub const REFERENCE_OFFSET_DAYS: i64 = 8;
/// Length of the reference window; spans days 8..=35 before the anchor
pub const REFERENCE_LENGTH_DAYS: i64 = 27;
/// Number of weeks the reference window is averaged over
pub const REFERENCE_WEEKS: f64 = 4.0;

/// Inclusive range of calendar dates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window ending `offset` days before `anchor` and starting
    /// `offset + length` days before it
    pub fn back_from(anchor: NaiveDate, offset: i64, length: i64) -> Self {
        Self {
            start: anchor - Duration::days(offset + length),
            end: anchor - Duration::days(offset),
        }
    }

    /// Short-term window ending on the anchor
    pub fn recent(anchor: NaiveDate) -> Self {
        Self::back_from(anchor, RECENT_OFFSET_DAYS, WEEK_DAYS)
    }

    /// Long-term window covering days 8..=35 before the anchor
    pub fn reference(anchor: NaiveDate) -> Self {
        Self::back_from(anchor, REFERENCE_OFFSET_DAYS, REFERENCE_LENGTH_DAYS)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Records dated inside this window
    pub fn select<'a>(&self, records: &'a [TrainingRecord]) -> Vec<&'a TrainingRecord> {
        records.iter().filter(|r| self.contains(r.date)).collect()
    }

    /// Short chart label, e.g. `1/8-1/15`
    pub fn label(&self) -> String {
        format!(
            "{}/{}-{}/{}",
            self.start.month(),
            self.start.day(),
            self.end.month(),
            self.end.day()
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// `count` week windows stepping back from the anchor, oldest first.
///
/// Week `i` (counting back from the anchor) is `back_from(anchor, 7 * i, 7)`,
/// so adjacent weeks share their boundary date. The returned order puts the
/// oldest week at index 0, which is also the x value used for trend fitting.
pub fn weekly_windows(anchor: NaiveDate, count: usize) -> Vec<DateRange> {
    let mut windows: Vec<DateRange> = (0..count as i64)
        .map(|i| DateRange::back_from(anchor, i * WEEK_DAYS, WEEK_DAYS))
        .collect();
    windows.reverse();
    windows
}
