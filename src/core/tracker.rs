//! State container: the single owner of the current snapshot
//!
//! Wraps the pure reducer with a key-value store and an id source. A
//! transition is committed in memory only after its changed fields were
//! written back.

use crate::core::catalog::Catalog;
use crate::core::grading::GradeBreakdown;
use crate::core::models::{Area, GradeInput, MathCredits};
use crate::core::progress::ProgressReport;
use crate::core::snapshot::Snapshot;
use crate::core::state::{reduce, Action, IdSource, StateKey, TrackerState, UuidIds};
use crate::core::storage::{persist, rehydrate, KeyValueStore};
use crate::core::TrackerError;
use crate::{debug, info, warn};

/// Course tracker bound to a catalog and a store
pub struct Tracker<S: KeyValueStore> {
    catalog: Catalog,
    store: S,
    state: TrackerState,
    ids: Box<dyn IdSource>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Open a tracker, rehydrating state from `store`
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if the store cannot be read
    pub fn open(catalog: Catalog, store: S) -> Result<Self, TrackerError> {
        let state = rehydrate(&store)?;
        debug!(
            "Rehydrated {} completed, {} electives, {} free electives, {} grades",
            state.completed_courses.len(),
            state.elective_courses.len(),
            state.free_elective_courses.len(),
            state.grades.len()
        );
        Ok(Self {
            catalog,
            store,
            state,
            ids: Box::new(UuidIds),
        })
    }

    /// Replace the id source (deterministic ids in tests)
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Current snapshot
    #[must_use]
    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Catalog in use
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Reduce `action`, persist the changed fields and commit.
    ///
    /// Returns the fields that changed (empty for ignored actions).
    ///
    /// # Errors
    /// Returns the reducer's validation error, or a storage error; in both
    /// cases the in-memory state is unchanged
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<StateKey>, TrackerError> {
        let transition = reduce(&self.state, action, self.ids.as_mut())?;
        if transition.is_noop() {
            return Ok(Vec::new());
        }
        persist(&mut self.store, &transition.state, &transition.persist)?;
        self.state = transition.state;
        Ok(transition.persist)
    }

    /// Flip completion of a mandatory course. Returns the new completion flag.
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if persisting fails
    pub fn toggle_course(&mut self, id: &str) -> Result<bool, TrackerError> {
        if self.catalog.get(id).is_none() {
            warn!("Toggling '{id}', which is not in the catalog");
        }
        self.dispatch(Action::ToggleCourse { id: id.to_string() })?;
        let done = self.state.is_completed(id);
        info!("Course '{id}' marked {}", if done { "complete" } else { "incomplete" });
        Ok(done)
    }

    /// Set (or clear with `""`/`"-"`) a grade. Returns whether anything changed.
    ///
    /// Invalid input and non-gradeable ids are dropped silently.
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if persisting fails
    pub fn set_grade(&mut self, id: &str, grade: &str) -> Result<bool, TrackerError> {
        let changed = self.dispatch(Action::SetGrade {
            id: id.to_string(),
            grade: GradeInput::parse(grade),
        })?;
        Ok(!changed.is_empty())
    }

    /// Add an elective record. Returns the new record id.
    ///
    /// # Errors
    /// Returns a validation error for empty fields, credits outside [1, 30]
    /// or an exceeded area ceiling; `TrackerError::Storage` if persisting fails
    pub fn add_elective_course(
        &mut self,
        name: &str,
        credits: &str,
        area: Area,
        grade: Option<&str>,
    ) -> Result<String, TrackerError> {
        let action = Action::AddElective {
            name: name.to_string(),
            credits: credits.to_string(),
            area,
            grade: grade.map(str::to_string),
        };
        self.dispatch(action).inspect_err(|e| {
            debug!("Elective '{name}' rejected: {e}");
        })?;
        let id = self
            .state
            .elective_courses
            .last()
            .map(|record| record.id.clone())
            .unwrap_or_default();
        info!("Added elective '{name}' ({credits} ECTS, {area}) as {id}");
        Ok(id)
    }

    /// Add a free-elective record. Returns the new record id.
    ///
    /// # Errors
    /// Returns a validation error for empty fields or credits outside
    /// [1, 30]; `TrackerError::Storage` if persisting fails
    pub fn add_free_elective_course(
        &mut self,
        name: &str,
        credits: &str,
    ) -> Result<String, TrackerError> {
        let action = Action::AddFreeElective {
            name: name.to_string(),
            credits: credits.to_string(),
        };
        self.dispatch(action).inspect_err(|e| {
            debug!("Free elective '{name}' rejected: {e}");
        })?;
        let id = self
            .state
            .free_elective_courses
            .last()
            .map(|record| record.id.clone())
            .unwrap_or_default();
        info!("Added free elective '{name}' ({credits} ECTS) as {id}");
        Ok(id)
    }

    /// Remove an elective record and its grade. Returns whether it existed.
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if persisting fails
    pub fn remove_elective_course(&mut self, id: &str) -> Result<bool, TrackerError> {
        let changed = self.dispatch(Action::RemoveElective { id: id.to_string() })?;
        Ok(changed.contains(&StateKey::ElectiveCourses))
    }

    /// Remove a free-elective record. Returns whether it existed.
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if persisting fails
    pub fn remove_free_elective_course(&mut self, id: &str) -> Result<bool, TrackerError> {
        let changed = self.dispatch(Action::RemoveFreeElective { id: id.to_string() })?;
        Ok(!changed.is_empty())
    }

    /// Switch the math course between 9 and 6 ECTS. Returns the new setting.
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if persisting fails
    pub fn toggle_math_credits(&mut self) -> Result<MathCredits, TrackerError> {
        self.dispatch(Action::ToggleMathCredits)?;
        info!("Math credits set to {}", self.state.math_credits);
        Ok(self.state.math_credits)
    }

    /// Export the current state as a snapshot document
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if serialization fails
    pub fn export_json(&self) -> Result<String, TrackerError> {
        Snapshot::from_state(&self.state).to_json()
    }

    /// Replace all state from a snapshot document
    ///
    /// # Errors
    /// Returns `TrackerError::Import` for a malformed payload (state is left
    /// untouched) or `TrackerError::Storage` if persisting fails
    pub fn import_json(&mut self, json: &str) -> Result<(), TrackerError> {
        let snapshot = Snapshot::from_json(json).inspect_err(|e| {
            debug!("{e}");
        })?;
        self.dispatch(Action::Import(snapshot.into_state()))?;
        info!("Imported snapshot");
        Ok(())
    }

    /// Progress numbers for the current state
    #[must_use]
    pub fn progress(&self) -> ProgressReport {
        ProgressReport::compute(&self.catalog, &self.state)
    }

    /// Weighted-grade decisions for the current state
    #[must_use]
    pub fn grading(&self) -> GradeBreakdown {
        GradeBreakdown::compute(&self.catalog, &self.state)
    }

    /// Weighted grade average, `None` when nothing is graded
    #[must_use]
    pub fn weighted_grade(&self) -> Option<f64> {
        self.grading().average()
    }
}
