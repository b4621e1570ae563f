//! Chart series and window comparisons for the analysis view.
//!
//! Everything here is assembled from the aggregation and trend modules and
//! handed to whatever renders it; no rendering happens in this crate.

use crate::analytics::{self, Averaging, Metric};
use crate::trend::LinearTrend;
use crate::window::{self, DateRange};
use crate::{MovementPattern, TrainingRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ratio bands used to classify a short/long comparison
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioBands {
    pub high: f64,
    pub low: f64,
}

impl Default for RatioBands {
    fn default() -> Self {
        Self {
            high: 1.25,
            low: 0.75,
        }
    }
}

/// Classification of a recent/reference ratio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    High,
    Steady,
    Low,
}

impl RatioBands {
    pub fn classify(&self, ratio: f64) -> LoadStatus {
        if ratio > self.high {
            LoadStatus::High
        } else if ratio < self.low {
            LoadStatus::Low
        } else {
            LoadStatus::Steady
        }
    }
}

// ============================================================================
// Per-pattern weekly series
// ============================================================================

/// One charted week
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeekPoint {
    pub range: DateRange,
    pub label: String,
    pub value: f64,
    /// Week value over the weekly-averaged reference window ending 8 days
    /// before this week's end
    pub ratio: f64,
}

/// Weekly values of one metric for one pattern, oldest week first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternSeries {
    pub pattern: MovementPattern,
    pub metric: Metric,
    pub weeks: Vec<WeekPoint>,
    /// Weekly average over the reference window of the anchor
    pub long_term_average: f64,
}

pub fn pattern_series(
    records: &[TrainingRecord],
    anchor: NaiveDate,
    weeks: usize,
    metric: Metric,
    pattern: MovementPattern,
) -> PatternSeries {
    let points = window::weekly_windows(anchor, weeks)
        .into_iter()
        .map(|range| {
            let value = metric
                .aggregate(range.select(records), Averaging::Total)
                .get(pattern);
            let reference = metric
                .aggregate(
                    DateRange::reference(range.end).select(records),
                    Averaging::WeeklyAverage,
                )
                .get(pattern);

            WeekPoint {
                label: range.label(),
                range,
                value,
                ratio: analytics::ratio(value, reference),
            }
        })
        .collect();

    let long_term_average = metric
        .aggregate(
            DateRange::reference(anchor).select(records),
            Averaging::WeeklyAverage,
        )
        .get(pattern);

    PatternSeries {
        pattern,
        metric,
        weeks: points,
        long_term_average,
    }
}

/// [`pattern_series`] for all six patterns
pub fn all_pattern_series(
    records: &[TrainingRecord],
    anchor: NaiveDate,
    weeks: usize,
    metric: Metric,
) -> Vec<PatternSeries> {
    MovementPattern::ALL
        .iter()
        .map(|p| pattern_series(records, anchor, weeks, metric, *p))
        .collect()
}

// ============================================================================
// Recent vs reference comparison
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternComparison {
    pub pattern: MovementPattern,
    /// Total over the recent window
    pub recent: f64,
    /// Weekly average over the reference window
    pub reference: f64,
    /// `None` when the reference is zero (no prior data)
    pub ratio: Option<f64>,
    pub status: Option<LoadStatus>,
}

/// Compare the recent window against the reference window, per pattern
pub fn compare_windows(
    records: &[TrainingRecord],
    anchor: NaiveDate,
    metric: Metric,
    bands: &RatioBands,
) -> Vec<PatternComparison> {
    let recent = metric.aggregate(DateRange::recent(anchor).select(records), Averaging::Total);
    let reference = metric.aggregate(
        DateRange::reference(anchor).select(records),
        Averaging::WeeklyAverage,
    );

    MovementPattern::ALL
        .iter()
        .map(|&pattern| {
            let recent = recent.get(pattern);
            let reference = reference.get(pattern);
            let ratio = (reference != 0.0).then(|| recent / reference);

            PatternComparison {
                pattern,
                recent,
                reference,
                ratio,
                status: ratio.map(|r| bands.classify(r)),
            }
        })
        .collect()
}

// ============================================================================
// Per-exercise maximum weight
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxWeightComparison {
    pub exercise: String,
    pub pattern: MovementPattern,
    pub recent: f64,
    /// Max over the reference window, if the exercise was trained then
    pub long_term: Option<f64>,
    /// Percentage change of `recent` over `long_term`
    pub change_percent: Option<f64>,
}

/// Max weight in the recent window for every exercise trained in it
pub fn compare_max_weights(
    records: &[TrainingRecord],
    anchor: NaiveDate,
) -> Vec<MaxWeightComparison> {
    let recent = analytics::max_weights(DateRange::recent(anchor).select(records));
    let reference = analytics::max_weights(DateRange::reference(anchor).select(records));

    recent
        .into_iter()
        .map(|(exercise, max)| {
            let long_term = reference
                .get(&exercise)
                .map(|m| m.weight)
                .filter(|w| *w > 0.0);
            let change_percent = long_term.map(|lt| (max.weight / lt - 1.0) * 100.0);

            MaxWeightComparison {
                exercise,
                pattern: max.pattern,
                recent: max.weight,
                long_term,
                change_percent,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxWeightPoint {
    pub range: DateRange,
    pub label: String,
    /// Heaviest set that week, 0 when the exercise was not trained
    pub weight: f64,
}

/// Weekly max weight for one exercise, oldest week first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxWeightSeries {
    pub exercise: String,
    pub pattern: MovementPattern,
    pub weeks: Vec<MaxWeightPoint>,
    pub long_term_max: f64,
    pub trend: Option<LinearTrend>,
    /// Fitted values per week; only present for a significant trend
    pub trend_line: Option<Vec<f64>>,
}

/// Weekly max-weight series for an exercise name.
///
/// Returns `None` if no record in `records` uses that name.
pub fn max_weight_series(
    records: &[TrainingRecord],
    anchor: NaiveDate,
    weeks: usize,
    exercise: &str,
) -> Option<MaxWeightSeries> {
    let pattern = records
        .iter()
        .find(|r| r.exercise.name == exercise)?
        .exercise
        .pattern;

    let points: Vec<MaxWeightPoint> = window::weekly_windows(anchor, weeks)
        .into_iter()
        .map(|range| {
            let weight = analytics::max_weights(range.select(records))
                .get(exercise)
                .map(|m| m.weight)
                .unwrap_or(0.0);
            MaxWeightPoint {
                label: range.label(),
                range,
                weight,
            }
        })
        .collect();

    let long_term_max = analytics::max_weights(DateRange::reference(anchor).select(records))
        .get(exercise)
        .map(|m| m.weight)
        .unwrap_or(0.0);

    let values: Vec<f64> = points.iter().map(|p| p.weight).collect();
    let trend = LinearTrend::fit(&values);
    let trend_line = trend
        .filter(LinearTrend::is_significant)
        .map(|t| t.line(values.len()));

    Some(MaxWeightSeries {
        exercise: exercise.to_string(),
        pattern,
        weeks: points,
        long_term_max,
        trend,
        trend_line,
    })
}
