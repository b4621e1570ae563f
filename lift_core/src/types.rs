//! Core domain types for the training log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Movement patterns (the grouping key for every aggregate)
//! - Exercises and the sets performed for them
//! - Training records as persisted under the `trainingRecords` key

use crate::Error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Movement Patterns
// ============================================================================

/// Movement category used to group exercises.
///
/// The aliases accept the labels written by the browser version of the log so that
/// exported local-storage data loads unchanged.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    #[serde(alias = "下肢推")]
    LowerPush,
    #[serde(alias = "下肢拉")]
    LowerPull,
    #[serde(alias = "上肢垂直推")]
    UpperVerticalPush,
    #[serde(alias = "上肢垂直拉")]
    UpperVerticalPull,
    #[serde(alias = "上肢水平推")]
    UpperHorizontalPush,
    #[serde(alias = "上肢水平拉")]
    UpperHorizontalPull,
}

impl MovementPattern {
    /// Every pattern, in display order
    pub const ALL: [MovementPattern; 6] = [
        MovementPattern::LowerPush,
        MovementPattern::LowerPull,
        MovementPattern::UpperVerticalPush,
        MovementPattern::UpperVerticalPull,
        MovementPattern::UpperHorizontalPush,
        MovementPattern::UpperHorizontalPull,
    ];

    /// Machine-readable key, identical to the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            MovementPattern::LowerPush => "lower_push",
            MovementPattern::LowerPull => "lower_pull",
            MovementPattern::UpperVerticalPush => "upper_vertical_push",
            MovementPattern::UpperVerticalPull => "upper_vertical_pull",
            MovementPattern::UpperHorizontalPush => "upper_horizontal_push",
            MovementPattern::UpperHorizontalPull => "upper_horizontal_pull",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            MovementPattern::LowerPush => "Lower push",
            MovementPattern::LowerPull => "Lower pull",
            MovementPattern::UpperVerticalPush => "Upper vertical push",
            MovementPattern::UpperVerticalPull => "Upper vertical pull",
            MovementPattern::UpperHorizontalPush => "Upper horizontal push",
            MovementPattern::UpperHorizontalPull => "Upper horizontal pull",
        }
    }
}

impl fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MovementPattern {
    type Err = Error;

    /// Parse a pattern from its key, a kebab-case key, or a short code
    /// (`lp`, `ll`, `uvp`, `uvl`, `uhp`, `uhl`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "lower_push" | "lp" => Ok(MovementPattern::LowerPush),
            "lower_pull" | "ll" => Ok(MovementPattern::LowerPull),
            "upper_vertical_push" | "uvp" => Ok(MovementPattern::UpperVerticalPush),
            "upper_vertical_pull" | "uvl" => Ok(MovementPattern::UpperVerticalPull),
            "upper_horizontal_push" | "uhp" => Ok(MovementPattern::UpperHorizontalPush),
            "upper_horizontal_pull" | "uhl" => Ok(MovementPattern::UpperHorizontalPull),
            _ => Err(Error::Other(format!("Unknown movement pattern: {}", s))),
        }
    }
}

// ============================================================================
// Exercises and Sets
// ============================================================================

/// A user-defined exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub pattern: MovementPattern,
}

/// One performed set. Value type, always embedded in a record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSet {
    pub weight: f64,
    pub reps: u32,
    pub is_near_failure: bool,
}

impl TrainingSet {
    pub fn new(weight: f64, reps: u32, is_near_failure: bool) -> Self {
        Self {
            weight,
            reps,
            is_near_failure,
        }
    }

    /// Weight × reps
    pub fn load(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

impl fmt::Display for TrainingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg×{}", self.weight, self.reps)?;
        if self.is_near_failure {
            f.write_str(" (near failure)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Training Records
// ============================================================================

/// All sets of one exercise on one calendar date.
///
/// At most one record exists per `(date, exercise.id)`; the repository
/// enforces this. The embedded exercise is a snapshot taken when the record
/// was first written, so catalog edits never rewrite history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    pub id: String,
    pub date: NaiveDate,
    pub exercise: Exercise,
    pub sets: Vec<TrainingSet>,
    pub created_at: DateTime<Utc>,
}

impl TrainingRecord {
    /// Number of sets flagged as near failure
    pub fn near_failure_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.is_near_failure).count()
    }

    /// Sum of weight × reps over every set
    pub fn total_load(&self) -> f64 {
        self.sets.iter().map(TrainingSet::load).sum()
    }

    /// Heaviest single set, or None for a record without sets
    pub fn max_weight(&self) -> Option<f64> {
        self.sets.iter().map(|s| s.weight).reduce(f64::max)
    }
}
