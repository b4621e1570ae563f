//! CSV export of training records.
//!
//! One row per set, so the file loads straight into a spreadsheet.

use crate::{Result, TrainingRecord};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    record_id: &'a str,
    date: String,
    exercise: &'a str,
    pattern: &'static str,
    set: usize,
    weight: f64,
    reps: u32,
    near_failure: bool,
    created_at: String,
}

/// Write every set of `records` to a CSV file, replacing any existing file.
///
/// Returns the number of rows written. The file is synced before returning.
pub fn export_csv(records: &[TrainingRecord], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for record in records {
        for (index, set) in record.sets.iter().enumerate() {
            writer.serialize(CsvRow {
                record_id: &record.id,
                date: record.date.to_string(),
                exercise: &record.exercise.name,
                pattern: record.exercise.pattern.key(),
                set: index + 1,
                weight: set.weight,
                reps: set.reps,
                near_failure: set.is_near_failure,
                created_at: record.created_at.to_rfc3339(),
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} sets from {} records to {:?}", rows, records.len(), path);
    Ok(rows)
}
