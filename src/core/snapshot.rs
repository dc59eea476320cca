//! Versioned export/import payload
//!
//! ```json
//! { "version": 1, "completedCourses": [], "electiveCourses": [],
//!   "freeElectiveCourses": [], "mathCredits": 9, "grades": {} }
//! ```
//!
//! Every field is required. Parsing either yields a complete state or an
//! error; there is no partial import.

use crate::core::models::{ElectiveRecord, FreeElectiveRecord, GradeMap, MathCredits};
use crate::core::state::{check_electives, check_free_electives, TrackerState};
use crate::core::TrackerError;
use crate::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Payload version written by this build
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of the whole tracker state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Payload version
    pub version: u32,
    /// Completed mandatory course ids
    pub completed_courses: Vec<String>,
    /// Elective records
    pub elective_courses: Vec<ElectiveRecord>,
    /// Free-elective records
    pub free_elective_courses: Vec<FreeElectiveRecord>,
    /// Math credit setting (9 or 6)
    pub math_credits: MathCredits,
    /// Grades by course id
    pub grades: GradeMap,
}

impl Snapshot {
    /// Capture the current state
    #[must_use]
    pub fn from_state(state: &TrackerState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            completed_courses: state.completed_courses.clone(),
            elective_courses: state.elective_courses.clone(),
            free_elective_courses: state.free_elective_courses.clone(),
            math_credits: state.math_credits,
            grades: state.grades.clone(),
        }
    }

    /// Pretty-printed JSON document
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if serialization fails
    pub fn to_json(&self) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Storage(format!("cannot encode snapshot: {e}")))
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    /// Returns `TrackerError::Import` if the JSON is malformed, a field is
    /// missing or mistyped, the version is unsupported, record ids repeat,
    /// a record's credits fall outside [1, 30] or an area exceeds its ceiling
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| TrackerError::Import(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), TrackerError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(TrackerError::Import(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        let mut seen = HashSet::new();
        let ids = self
            .elective_courses
            .iter()
            .map(|c| c.id.as_str())
            .chain(self.free_elective_courses.iter().map(|c| c.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                return Err(TrackerError::Import(format!("duplicate record id '{id}'")));
            }
        }
        check_electives(&self.elective_courses).map_err(TrackerError::Import)?;
        check_free_electives(&self.free_elective_courses).map_err(TrackerError::Import)
    }

    /// Convert into a tracker state, dropping grades for ids that cannot
    /// be graded in it
    #[must_use]
    pub fn into_state(self) -> TrackerState {
        let mut state = TrackerState {
            completed_courses: self.completed_courses,
            elective_courses: self.elective_courses,
            free_elective_courses: self.free_elective_courses,
            grades: self.grades,
            math_credits: self.math_credits,
        };
        let dropped = state.prune_grades();
        if dropped > 0 {
            debug!("Dropped {dropped} imported grade(s) for non-gradeable courses");
        }
        state
    }
}
