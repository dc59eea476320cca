//! Tracker state snapshot and the pure reducer that evolves it
//!
//! Every user action goes through [`reduce`], which returns a fresh snapshot
//! together with the list of fields that changed. Persisting those fields is
//! left to the caller (see `core::tracker`).

use crate::core::models::course::{FOUNDATION_COURSE_ID, MATH_COURSE_ID};
use crate::core::models::elective::area_credits;
use crate::core::models::{
    Area, ElectiveRecord, FreeElectiveRecord, GradeInput, GradeMap, MathCredits,
};
use crate::core::TrackerError;
use crate::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest credit value accepted for a new record
pub const MIN_RECORD_CREDITS: i64 = 1;

/// Largest credit value accepted for a new record
pub const MAX_RECORD_CREDITS: i64 = 30;

/// The user's recorded facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Ids of completed mandatory courses, in completion order
    pub completed_courses: Vec<String>,
    /// Elective records
    pub elective_courses: Vec<ElectiveRecord>,
    /// Free-elective records
    pub free_elective_courses: Vec<FreeElectiveRecord>,
    /// Grades by course id
    pub grades: GradeMap,
    /// Math course weight
    pub math_credits: MathCredits,
}

impl TrackerState {
    /// Whether mandatory course `id` is marked complete
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_courses.iter().any(|done| done == id)
    }

    /// Elective record with the given id
    #[must_use]
    pub fn elective(&self, id: &str) -> Option<&ElectiveRecord> {
        self.elective_courses.iter().find(|record| record.id == id)
    }

    /// Whether a grade may be recorded for `id` right now
    ///
    /// Electives are always gradeable. Mandatory courses must be completed;
    /// the foundation course never is, and math only while it weighs 9 ECTS.
    #[must_use]
    pub fn is_gradeable(&self, id: &str) -> bool {
        if self.elective(id).is_some() {
            return true;
        }
        if id == FOUNDATION_COURSE_ID {
            return false;
        }
        if id == MATH_COURSE_ID && !self.math_credits.is_graded() {
            return false;
        }
        self.is_completed(id)
    }

    /// Elective credits stored in `area` (true sum, no special cases)
    #[must_use]
    pub fn area_credits(&self, area: Area) -> u32 {
        area_credits(&self.elective_courses, area)
    }

    /// Drop grade entries whose id cannot carry a grade. Returns how many were dropped.
    pub fn prune_grades(&mut self) -> usize {
        let stale: Vec<String> = self
            .grades
            .iter()
            .map(|(id, _)| id.clone())
            .filter(|id| !self.is_gradeable(id))
            .collect();
        for id in &stale {
            self.grades.remove(id);
        }
        stale.len()
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.elective_courses.iter().any(|record| record.id == id)
            || self
                .free_elective_courses
                .iter()
                .any(|record| record.id == id)
    }
}

/// One independently persisted state field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    /// Completed mandatory course ids
    CompletedCourses,
    /// Elective records
    ElectiveCourses,
    /// Free-elective records
    FreeElectiveCourses,
    /// Grade map
    Grades,
    /// Math credit flag
    MathCredits,
}

impl StateKey {
    /// All keys in persistence order
    pub const ALL: [Self; 5] = [
        Self::CompletedCourses,
        Self::ElectiveCourses,
        Self::FreeElectiveCourses,
        Self::Grades,
        Self::MathCredits,
    ];

    /// Key under which the field is stored
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::CompletedCourses => "completedCourses",
            Self::ElectiveCourses => "electiveCourses",
            Self::FreeElectiveCourses => "freeElectiveCourses",
            Self::Grades => "grades",
            Self::MathCredits => "mathCredits",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

/// A user action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Flip completion of a mandatory course
    ToggleCourse {
        /// Course id
        id: String,
    },
    /// Set or clear a grade
    SetGrade {
        /// Course id (mandatory or elective)
        id: String,
        /// Parsed grade input
        grade: GradeInput,
    },
    /// Add an elective record
    AddElective {
        /// Course name
        name: String,
        /// Raw credits text
        credits: String,
        /// Area the credits count toward
        area: Area,
        /// Optional raw grade text
        grade: Option<String>,
    },
    /// Add a free-elective record
    AddFreeElective {
        /// Course name
        name: String,
        /// Raw credits text
        credits: String,
    },
    /// Remove an elective record and its grade
    RemoveElective {
        /// Record id
        id: String,
    },
    /// Remove a free-elective record
    RemoveFreeElective {
        /// Record id
        id: String,
    },
    /// Switch the math course between 9 and 6 ECTS
    ToggleMathCredits,
    /// Replace the whole state (already validated)
    Import(TrackerState),
}

/// Result of a successful reduction
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// New snapshot
    pub state: TrackerState,
    /// Fields that changed and must be written back
    pub persist: Vec<StateKey>,
}

impl Transition {
    fn unchanged(state: &TrackerState) -> Self {
        Self {
            state: state.clone(),
            persist: Vec::new(),
        }
    }

    /// Whether the action left the state as it was
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.persist.is_empty()
    }
}

/// Source of fresh record ids
pub trait IdSource {
    /// Produce a new id
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` ids for tests and scripted sessions
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Start counting at 1 with the given prefix
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Validate a course name and credits text for a new record
///
/// # Errors
/// Returns a validation error for an empty name, empty or non-integer
/// credits, or credits outside [1, 30]
pub fn validate_record(name: &str, credits: &str) -> Result<u32, TrackerError> {
    if name.trim().is_empty() {
        return Err(TrackerError::MissingName);
    }
    let credits = credits.trim();
    if credits.is_empty() {
        return Err(TrackerError::MissingCredits);
    }
    let value: i64 = credits
        .parse()
        .map_err(|_| TrackerError::InvalidCredits(credits.to_string()))?;
    if !(MIN_RECORD_CREDITS..=MAX_RECORD_CREDITS).contains(&value) {
        return Err(TrackerError::CreditsOutOfRange { credits: value });
    }
    u32::try_from(value).map_err(|_| TrackerError::CreditsOutOfRange { credits: value })
}

/// Check stored elective records: credits in [1, 30] and every area
/// within its ceiling
///
/// # Errors
/// Returns a description of the first offending record or area
pub fn check_electives(records: &[ElectiveRecord]) -> Result<(), String> {
    for record in records {
        check_credits(&record.id, record.credits)?;
    }
    for area in Area::ALL {
        let sum = area_credits(records, area);
        if sum > area.ceiling() {
            return Err(format!(
                "{area} electives hold {sum} ECTS, above the {} ECTS ceiling",
                area.ceiling()
            ));
        }
    }
    Ok(())
}

/// Check stored free-elective records: credits in [1, 30]
///
/// # Errors
/// Returns a description of the first offending record
pub fn check_free_electives(records: &[FreeElectiveRecord]) -> Result<(), String> {
    records
        .iter()
        .try_for_each(|record| check_credits(&record.id, record.credits))
}

fn check_credits(id: &str, credits: u32) -> Result<(), String> {
    if (MIN_RECORD_CREDITS..=MAX_RECORD_CREDITS).contains(&i64::from(credits)) {
        Ok(())
    } else {
        Err(format!(
            "record '{id}' has {credits} ECTS, outside [{MIN_RECORD_CREDITS}, {MAX_RECORD_CREDITS}]"
        ))
    }
}

/// Apply `action` to `state`.
///
/// # Errors
/// Returns a validation error when an add action is rejected; the input
/// state is never modified.
pub fn reduce(
    state: &TrackerState,
    action: Action,
    ids: &mut dyn IdSource,
) -> Result<Transition, TrackerError> {
    let mut next = state.clone();
    let mut persist = Vec::new();

    match action {
        Action::ToggleCourse { id } => {
            if let Some(pos) = next.completed_courses.iter().position(|done| *done == id) {
                next.completed_courses.remove(pos);
                if next.elective(&id).is_none() && next.grades.remove(&id) {
                    persist.push(StateKey::Grades);
                }
            } else {
                next.completed_courses.push(id);
            }
            persist.insert(0, StateKey::CompletedCourses);
        }
        Action::SetGrade { id, grade } => match grade {
            GradeInput::Clear => {
                if next.grades.remove(&id) {
                    persist.push(StateKey::Grades);
                }
            }
            GradeInput::Set(value) if next.is_gradeable(&id) => {
                if next.grades.grade(&id) != Some(value) {
                    next.grades.set(&id, value);
                    persist.push(StateKey::Grades);
                }
            }
            GradeInput::Set(value) => {
                debug!("Ignoring grade {value} for non-gradeable course '{id}'");
            }
            GradeInput::Invalid => {
                debug!("Ignoring invalid grade input for '{id}'");
            }
        },
        Action::AddElective {
            name,
            credits,
            area,
            grade,
        } => {
            let credits = validate_record(&name, &credits)?;
            let current = next.area_credits(area);
            let limit = area.ceiling();
            if current.saturating_add(credits) > limit {
                return Err(TrackerError::AreaCeilingExceeded {
                    area,
                    limit,
                    current,
                });
            }
            let id = fresh_id(&next, ids);
            next.elective_courses.push(ElectiveRecord {
                id: id.clone(),
                name: name.trim().to_string(),
                credits,
                area,
            });
            persist.push(StateKey::ElectiveCourses);
            if let Some(GradeInput::Set(value)) = grade.as_deref().map(GradeInput::parse) {
                next.grades.set(&id, value);
                persist.push(StateKey::Grades);
            }
        }
        Action::AddFreeElective { name, credits } => {
            let credits = validate_record(&name, &credits)?;
            let id = fresh_id(&next, ids);
            next.free_elective_courses.push(FreeElectiveRecord {
                id,
                name: name.trim().to_string(),
                credits,
            });
            persist.push(StateKey::FreeElectiveCourses);
        }
        Action::RemoveElective { id } => {
            let before = next.elective_courses.len();
            next.elective_courses.retain(|record| record.id != id);
            if next.elective_courses.len() != before {
                persist.push(StateKey::ElectiveCourses);
                if next.grades.remove(&id) {
                    persist.push(StateKey::Grades);
                }
            }
        }
        Action::RemoveFreeElective { id } => {
            let before = next.free_elective_courses.len();
            next.free_elective_courses.retain(|record| record.id != id);
            if next.free_elective_courses.len() != before {
                persist.push(StateKey::FreeElectiveCourses);
            }
        }
        Action::ToggleMathCredits => {
            next.math_credits = next.math_credits.toggled();
            persist.push(StateKey::MathCredits);
            if next.math_credits == MathCredits::Six && next.grades.remove(MATH_COURSE_ID) {
                persist.push(StateKey::Grades);
            }
        }
        Action::Import(imported) => {
            next = imported;
            persist.extend(StateKey::ALL);
        }
    }

    if persist.is_empty() {
        return Ok(Transition::unchanged(state));
    }
    Ok(Transition {
        state: next,
        persist,
    })
}

fn fresh_id(state: &TrackerState, ids: &mut dyn IdSource) -> String {
    loop {
        let id = ids.next_id();
        if !state.id_in_use(&id) {
            return id;
        }
    }
}
