//! Record history queries.
//!
//! Filtering and ordering for the history listing, plus the one-line set
//! summary shown next to each record.

use crate::{MovementPattern, TrainingRecord, TrainingSet};
use chrono::NaiveDate;

/// Date ordering of a history listing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    /// Newest first
    #[default]
    Descending,
}

/// Optional filters for a history listing
#[derive(Clone, Debug, Default)]
pub struct HistoryQuery {
    pub pattern: Option<MovementPattern>,
    pub date: Option<NaiveDate>,
    pub order: SortOrder,
}

impl HistoryQuery {
    pub fn with_pattern(mut self, pattern: MovementPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn ordered(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matches(&self, record: &TrainingRecord) -> bool {
        self.pattern.map_or(true, |p| record.exercise.pattern == p)
            && self.date.map_or(true, |d| record.date == d)
    }

    /// Matching records sorted by date. Records on the same date keep their
    /// stored order.
    pub fn run<'a>(&self, records: &'a [TrainingRecord]) -> Vec<&'a TrainingRecord> {
        let mut matched: Vec<&TrainingRecord> =
            records.iter().filter(|r| self.matches(r)).collect();

        match self.order {
            SortOrder::Ascending => matched.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Descending => matched.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        matched
    }
}

/// Render a set list as `100kg×5  ·  105kg×3 (near failure)`
pub fn format_sets(sets: &[TrainingSet]) -> String {
    sets.iter()
        .map(TrainingSet::to_string)
        .collect::<Vec<_>>()
        .join("  ·  ")
}
