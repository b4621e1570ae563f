#![forbid(unsafe_code)]

//! Core domain model and analytics for the liftlog strength-training log.
//!
//! This crate provides:
//! - Domain types (movement patterns, exercises, sets, records)
//! - Key-value persistence, the record repository and the exercise catalog
//! - Date windows and per-pattern aggregation
//! - Linear trend estimation
//! - Chart series, weekly goal progress and the set-entry workflow

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod storage;
pub mod repository;
pub mod catalog;
pub mod window;
pub mod analytics;
pub mod trend;
pub mod report;
pub mod progress;
pub mod history;
pub mod session;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use repository::RecordRepository;
pub use catalog::ExerciseCatalog;
pub use window::{weekly_windows, DateRange};
pub use analytics::{Averaging, Metric, PatternTotals};
pub use trend::LinearTrend;
pub use session::{WorkoutSession, WorkoutState};
