//! Saved exercise catalog.
//!
//! Users build their own list of exercises, each tagged with a movement
//! pattern. The list is persisted under the `savedExercises` key.

use crate::storage::{self, KeyValueStore, SAVED_EXERCISES_KEY};
use crate::{Error, Exercise, MovementPattern, Result};
use uuid::Uuid;

/// User-maintained list of exercises
pub struct ExerciseCatalog<S: KeyValueStore> {
    store: S,
    exercises: Vec<Exercise>,
}

impl<S: KeyValueStore> ExerciseCatalog<S> {
    /// Load saved exercises; absent or corrupt data yields an empty catalog
    pub fn load(store: S) -> Self {
        let exercises = storage::load_collection(&store, SAVED_EXERCISES_KEY);
        Self { store, exercises }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Add a new exercise with a fresh id.
    ///
    /// The name is trimmed and must not be empty.
    pub fn add(&mut self, name: &str, pattern: MovementPattern) -> Result<Exercise> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Catalog("Exercise name must not be empty".into()));
        }

        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            pattern,
        };
        let mut exercises = self.exercises.clone();
        exercises.push(exercise.clone());
        self.commit(exercises)?;

        tracing::info!("Saved exercise {:?} ({})", exercise.name, pattern.key());
        Ok(exercise)
    }

    /// Remove an exercise by id. Historical records keep their own copy.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let mut exercises = self.exercises.clone();
        exercises.retain(|e| e.id != id);
        let removed = exercises.len() != self.exercises.len();
        self.commit(exercises)?;
        Ok(removed)
    }

    /// Look up by exact id, falling back to a case-insensitive name match
    pub fn find(&self, id_or_name: &str) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|e| e.id == id_or_name)
            .or_else(|| {
                self.exercises
                    .iter()
                    .find(|e| e.name.eq_ignore_ascii_case(id_or_name.trim()))
            })
    }

    /// Exercises grouped under one pattern
    pub fn by_pattern(&self, pattern: MovementPattern) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter().filter(move |e| e.pattern == pattern)
    }

    fn commit(&mut self, exercises: Vec<Exercise>) -> Result<()> {
        storage::save_collection(&mut self.store, SAVED_EXERCISES_KEY, &exercises)?;
        self.exercises = exercises;
        Ok(())
    }
}
