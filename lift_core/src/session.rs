//! Set-entry workflow as an explicit state machine.
//!
//! `Idle` → (select exercise) → `Recording` → (confirm sets, each one
//! written through to the repository) → `Idle` for the next exercise, or
//! `Complete` when the workout is over.

use crate::repository::RecordRepository;
use crate::storage::KeyValueStore;
use crate::{Error, Exercise, Result, TrainingRecord, TrainingSet};
use chrono::NaiveDate;

/// Where the user is in the workflow
#[derive(Clone, Debug, PartialEq)]
pub enum WorkoutState {
    /// No exercise selected
    Idle,
    /// Entering sets for one exercise
    Recording {
        exercise: Exercise,
        sets: Vec<TrainingSet>,
    },
    /// Workout finished; only `restart` is accepted
    Complete,
}

/// One sitting of set entry for a given date
#[derive(Clone, Debug)]
pub struct WorkoutSession {
    date: NaiveDate,
    state: WorkoutState,
}

impl WorkoutSession {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            state: WorkoutState::Idle,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> &WorkoutState {
        &self.state
    }

    /// 1-based number of the next set to be entered, 0 when not recording
    pub fn set_number(&self) -> usize {
        match &self.state {
            WorkoutState::Recording { sets, .. } => sets.len() + 1,
            _ => 0,
        }
    }

    /// Change the training date. Only allowed before an exercise is picked.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<()> {
        match self.state {
            WorkoutState::Idle => {
                self.date = date;
                Ok(())
            }
            _ => Err(Error::Session(
                "Date can only be changed before selecting an exercise".into(),
            )),
        }
    }

    /// Start recording an exercise. Switching exercises mid-recording starts
    /// a fresh set list; sets already confirmed stay persisted.
    pub fn select_exercise(&mut self, exercise: Exercise) -> Result<()> {
        self.start_recording(exercise, Vec::new())
    }

    /// Start recording an exercise, continuing from any sets already stored
    /// for it on this session's date. New sets are appended to those.
    pub fn resume_exercise<S: KeyValueStore>(
        &mut self,
        repository: &RecordRepository<S>,
        exercise: Exercise,
    ) -> Result<()> {
        let sets = repository
            .find(self.date, &exercise.id)
            .map(|record| record.sets.clone())
            .unwrap_or_default();
        self.start_recording(exercise, sets)
    }

    fn start_recording(&mut self, exercise: Exercise, sets: Vec<TrainingSet>) -> Result<()> {
        if self.state == WorkoutState::Complete {
            return Err(Error::Session(
                "Workout is complete; restart before selecting an exercise".into(),
            ));
        }

        tracing::debug!(
            "Recording {} on {} ({} sets stored)",
            exercise.name,
            self.date,
            sets.len()
        );
        self.state = WorkoutState::Recording { exercise, sets };
        Ok(())
    }

    /// Append a set and immediately upsert the record for this exercise and
    /// date. The set list only grows once the record has been saved.
    pub fn confirm_set<S: KeyValueStore>(
        &mut self,
        repository: &mut RecordRepository<S>,
        set: TrainingSet,
    ) -> Result<TrainingRecord> {
        let WorkoutState::Recording { exercise, sets } = &mut self.state else {
            return Err(Error::Session("No exercise selected".into()));
        };

        validate_set(&set)?;

        let mut updated = sets.clone();
        updated.push(set);
        let record = repository.add(self.date, exercise, updated.clone())?.clone();
        *sets = updated;

        tracing::info!("Set {} of {} saved: {}", sets.len(), exercise.name, set);
        Ok(record)
    }

    /// Finish the current exercise and go back to `Idle`
    pub fn next_exercise(&mut self) -> Result<()> {
        match self.state {
            WorkoutState::Recording { .. } => {
                self.state = WorkoutState::Idle;
                Ok(())
            }
            _ => Err(Error::Session("No exercise is being recorded".into())),
        }
    }

    /// End the workout from any state
    pub fn complete(&mut self) {
        self.state = WorkoutState::Complete;
    }

    /// Begin a new workout after completion
    pub fn restart(&mut self, date: NaiveDate) -> Result<()> {
        match self.state {
            WorkoutState::Complete => {
                self.date = date;
                self.state = WorkoutState::Idle;
                Ok(())
            }
            _ => Err(Error::Session("Workout has not been completed".into())),
        }
    }
}

/// Check that a set can be stored: a finite, positive weight and at least
/// one rep. Non-finite weights would not survive a JSON round trip.
pub fn validate_set(set: &TrainingSet) -> Result<()> {
    if !set.weight.is_finite() || set.weight <= 0.0 || set.reps == 0 {
        return Err(Error::Session(format!(
            "Set needs a positive weight and at least one rep (got {})",
            set
        )));
    }
    Ok(())
}
