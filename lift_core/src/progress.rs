//! Weekly near-failure goal tracking.
//!
//! Counts near-failure sets per pattern over the seven calendar days ending
//! today (today plus the six days before it) and compares them to a goal.

use crate::analytics::{self, Averaging};
use crate::window::DateRange;
use crate::{MovementPattern, TrainingRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default goal: near-failure sets per pattern per week
pub const DEFAULT_WEEKLY_GOAL: u32 = 10;

/// How far along a pattern is towards its goal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// At or above the goal
    Complete,
    /// At least half way
    Halfway,
    Behind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternProgress {
    pub pattern: MovementPattern,
    pub near_failure_sets: u32,
    pub goal: u32,
    /// Sets still needed, never negative
    pub remaining: u32,
    /// Share of the goal reached, capped at 100
    pub percentage: f64,
    pub status: GoalStatus,
}

/// The seven-day window ending on `today`, both ends inclusive
pub fn goal_window(today: NaiveDate) -> DateRange {
    DateRange::back_from(today, 0, 6)
}

/// Progress for every pattern, in [`MovementPattern::ALL`] order
pub fn weekly_progress(
    records: &[TrainingRecord],
    today: NaiveDate,
    goal: u32,
) -> Vec<PatternProgress> {
    let window = goal_window(today);
    let counts = analytics::near_failure_sets(window.select(records), Averaging::Total);

    tracing::debug!("Goal progress over {} against {} sets/week", window, goal);

    MovementPattern::ALL
        .iter()
        .map(|&pattern| {
            let sets = counts.get(pattern) as u32;
            let percentage = if goal == 0 {
                100.0
            } else {
                (f64::from(sets) / f64::from(goal) * 100.0).min(100.0)
            };
            let status = if percentage >= 100.0 {
                GoalStatus::Complete
            } else if percentage >= 50.0 {
                GoalStatus::Halfway
            } else {
                GoalStatus::Behind
            };

            PatternProgress {
                pattern,
                near_failure_sets: sets,
                goal,
                remaining: goal.saturating_sub(sets),
                percentage,
                status,
            }
        })
        .collect()
}
