//! Aggregation over training records.
//!
//! Pure functions over a caller-selected subset of records. Nothing here
//! mutates or retains the records it is given.

use crate::window::REFERENCE_WEEKS;
use crate::{MovementPattern, TrainingRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a per-pattern total is reported
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Averaging {
    /// Plain sum over the subset
    Total,
    /// Sum over a four-week reference subset, divided by 4 and rounded to
    /// one decimal place
    WeeklyAverage,
}

/// Which per-pattern quantity to aggregate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Count of sets flagged near failure
    NearFailureSets,
    /// Sum of weight × reps over all sets
    Load,
}

impl Metric {
    pub fn aggregate<'a, I>(&self, records: I, averaging: Averaging) -> PatternTotals
    where
        I: IntoIterator<Item = &'a TrainingRecord>,
    {
        match self {
            Metric::NearFailureSets => near_failure_sets(records, averaging),
            Metric::Load => total_load(records, averaging),
        }
    }
}

/// Per-pattern values. Every pattern is always present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternTotals(BTreeMap<MovementPattern, f64>);

impl PatternTotals {
    /// All six patterns set to zero
    pub fn zeroed() -> Self {
        Self(MovementPattern::ALL.iter().map(|p| (*p, 0.0)).collect())
    }

    pub fn get(&self, pattern: MovementPattern) -> f64 {
        self.0.get(&pattern).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MovementPattern, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    /// Sum over all patterns
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    fn add(&mut self, pattern: MovementPattern, value: f64) {
        *self.0.entry(pattern).or_insert(0.0) += value;
    }

    fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for value in self.0.values_mut() {
            *value = f(*value);
        }
        self
    }

    fn finish(self, averaging: Averaging) -> Self {
        match averaging {
            Averaging::Total => self,
            Averaging::WeeklyAverage => self.map(weekly_average),
        }
    }
}

/// Heaviest set recorded for an exercise, with its pattern
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxWeight {
    pub weight: f64,
    pub pattern: MovementPattern,
}

/// Near-failure set count per pattern
pub fn near_failure_sets<'a, I>(records: I, averaging: Averaging) -> PatternTotals
where
    I: IntoIterator<Item = &'a TrainingRecord>,
{
    let mut totals = PatternTotals::zeroed();
    for record in records {
        totals.add(record.exercise.pattern, record.near_failure_sets() as f64);
    }
    totals.finish(averaging)
}

/// Load (weight × reps over every set) per pattern
pub fn total_load<'a, I>(records: I, averaging: Averaging) -> PatternTotals
where
    I: IntoIterator<Item = &'a TrainingRecord>,
{
    let mut totals = PatternTotals::zeroed();
    for record in records {
        totals.add(record.exercise.pattern, record.total_load());
    }
    totals.finish(averaging)
}

/// Maximum single-set weight per exercise name.
///
/// Records without sets do not contribute. When two records share a name,
/// the pattern of the record holding the maximum is kept.
pub fn max_weights<'a, I>(records: I) -> BTreeMap<String, MaxWeight>
where
    I: IntoIterator<Item = &'a TrainingRecord>,
{
    let mut result: BTreeMap<String, MaxWeight> = BTreeMap::new();
    for record in records {
        let Some(weight) = record.max_weight() else {
            continue;
        };

        let candidate = MaxWeight {
            weight,
            pattern: record.exercise.pattern,
        };
        result
            .entry(record.exercise.name.clone())
            .and_modify(|current| {
                if weight > current.weight {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }
    result
}

/// Four-week total expressed per week, rounded to one decimal place
pub fn weekly_average(total: f64) -> f64 {
    round1(total / REFERENCE_WEEKS)
}

/// Short-term value over long-term weekly average.
///
/// A zero long-term value is replaced by 1, so with no prior data the ratio
/// equals the short-term value itself. Callers that need to tell "no prior
/// data" apart must check the long-term value.
pub fn ratio(short_term: f64, long_term: f64) -> f64 {
    let denominator = if long_term == 0.0 { 1.0 } else { long_term };
    short_term / denominator
}

/// [`ratio`] for every pattern
pub fn pattern_ratios(short_term: &PatternTotals, long_term: &PatternTotals) -> PatternTotals {
    let mut result = PatternTotals::zeroed();
    for pattern in MovementPattern::ALL {
        result.add(pattern, ratio(short_term.get(pattern), long_term.get(pattern)));
    }
    result
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
