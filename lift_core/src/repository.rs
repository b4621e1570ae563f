//! Training record repository.
//!
//! The repository owns the in-memory record list for a session. Every
//! mutation rewrites the full list to the backing store before returning,
//! and only takes effect in memory once that write succeeded.

use crate::storage::{self, KeyValueStore, TRAINING_RECORDS_KEY};
use crate::{Exercise, Result, TrainingRecord, TrainingSet};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Record list loaded from, and persisted to, a key-value store
pub struct RecordRepository<S: KeyValueStore> {
    store: S,
    records: Vec<TrainingRecord>,
}

impl<S: KeyValueStore> RecordRepository<S> {
    /// Restore persisted records.
    ///
    /// Absent or corrupt data yields an empty repository.
    pub fn load(store: S) -> Self {
        let records = storage::load_collection(&store, TRAINING_RECORDS_KEY);
        Self { store, records }
    }

    /// Current snapshot of all records, in insertion order
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TrainingRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Record for the given date and exercise, if one exists
    pub fn find(&self, date: NaiveDate, exercise_id: &str) -> Option<&TrainingRecord> {
        self.records
            .iter()
            .find(|r| r.date == date && r.exercise.id == exercise_id)
    }

    /// Upsert the sets for `(date, exercise)`.
    ///
    /// An existing record for the pair keeps its id and creation time and has
    /// its set list replaced; otherwise a new record is created.
    pub fn add(
        &mut self,
        date: NaiveDate,
        exercise: &Exercise,
        sets: Vec<TrainingSet>,
    ) -> Result<&TrainingRecord> {
        self.add_at(date, exercise, sets, Utc::now())
    }

    /// Same as [`add`](Self::add) with an explicit creation timestamp
    pub fn add_at(
        &mut self,
        date: NaiveDate,
        exercise: &Exercise,
        sets: Vec<TrainingSet>,
        now: DateTime<Utc>,
    ) -> Result<&TrainingRecord> {
        let mut records = self.records.clone();
        let index = match records
            .iter()
            .position(|r| r.date == date && r.exercise.id == exercise.id)
        {
            Some(index) => {
                records[index].sets = sets;
                tracing::debug!(
                    "Replaced sets of record {} ({} on {})",
                    records[index].id,
                    exercise.name,
                    date
                );
                index
            }
            None => {
                let record = TrainingRecord {
                    id: Uuid::new_v4().to_string(),
                    date,
                    exercise: exercise.clone(),
                    sets,
                    created_at: now,
                };
                tracing::debug!("Created record {} ({} on {})", record.id, exercise.name, date);
                records.push(record);
                records.len() - 1
            }
        };

        self.commit(records)?;
        Ok(&self.records[index])
    }

    /// Remove the record with the given id. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut records = self.records.clone();
        records.retain(|r| r.id != id);
        let removed = records.len() != self.records.len();

        if !removed {
            tracing::debug!("Delete of unknown record {} ignored", id);
        }

        self.commit(records)?;
        Ok(removed)
    }

    /// Remove every record whose id is in `ids`. Returns the number removed.
    pub fn delete_many(&mut self, ids: &HashSet<String>) -> Result<usize> {
        let mut records = self.records.clone();
        records.retain(|r| !ids.contains(&r.id));
        let removed = self.records.len() - records.len();

        tracing::debug!("Deleted {} of {} requested records", removed, ids.len());
        self.commit(records)?;
        Ok(removed)
    }

    /// Give the store back, e.g. to reopen it
    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist `records` and adopt them. On a failed write the loaded list
    /// is left as it was.
    fn commit(&mut self, records: Vec<TrainingRecord>) -> Result<()> {
        storage::save_collection(&mut self.store, TRAINING_RECORDS_KEY, &records)?;
        self.records = records;
        Ok(())
    }
}
