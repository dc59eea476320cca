//! Weighted grade engine
//!
//! Two passes: every graded elective counts, then mandatory courses are
//! admitted by their own gates. The area ranking that gates the last pass
//! depends on elective credits only.
//!
//! Ties in the ranking keep the fixed order ai, philosophy, psychology.

use crate::core::catalog::Catalog;
use crate::core::models::course::{
    CS_COURSE_ID, FOUNDATION_COURSE_ID, MATH_COURSE_ID, STATS_COURSE_ID,
};
use crate::core::models::Area;
use crate::core::progress::area_credits;
use crate::core::state::TrackerState;
use std::fmt;

/// Why a grade was admitted into the average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Graded elective record
    Elective(Area),
    /// Statistics course, always counted
    Statistics,
    /// Math course, gated on a math elective and the 9 ECTS setting
    Mathematics,
    /// Computer science course, gated on a cs elective
    ComputerScience,
    /// Mandatory course in one of the two top-ranked areas
    TopArea(Area),
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elective(area) => write!(f, "elective ({area})"),
            Self::Statistics => write!(f, "statistics"),
            Self::Mathematics => write!(f, "math (math elective present)"),
            Self::ComputerScience => write!(f, "cs (cs elective present)"),
            Self::TopArea(area) => write!(f, "top area ({area})"),
        }
    }
}

/// One grade counted toward the average
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    /// Course or elective record id
    pub course_id: String,
    /// Credits used as weight
    pub credits: u32,
    /// Grade
    pub grade: f64,
    /// Admission rule
    pub reason: Inclusion,
}

/// Everything the engine decided for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GradeBreakdown {
    /// The two areas whose mandatory courses are eligible
    pub top_areas: [Area; 2],
    /// Admitted grades in evaluation order
    pub contributions: Vec<Contribution>,
}

impl GradeBreakdown {
    /// Run the engine over the current state
    #[must_use]
    pub fn compute(catalog: &Catalog, state: &TrackerState) -> Self {
        let grades = &state.grades;
        let mut contributions = Vec::new();

        for record in &state.elective_courses {
            if let Some(grade) = grades.grade(&record.id) {
                contributions.push(Contribution {
                    course_id: record.id.clone(),
                    credits: record.credits,
                    grade,
                    reason: Inclusion::Elective(record.area),
                });
            }
        }

        let top_areas = top_areas(state);

        if let Some(stats) = catalog.get(STATS_COURSE_ID) {
            if let Some(grade) = grades.grade(&stats.id) {
                contributions.push(Contribution {
                    course_id: stats.id.clone(),
                    credits: stats.credits,
                    grade,
                    reason: Inclusion::Statistics,
                });
            }
        }

        let has_elective_in = |area: Area| state.elective_courses.iter().any(|c| c.area == area);

        if has_elective_in(Area::Math) && state.math_credits.is_graded() {
            if let Some(math) = catalog.get(MATH_COURSE_ID) {
                if let Some(grade) = grades.grade(&math.id) {
                    contributions.push(Contribution {
                        course_id: math.id.clone(),
                        credits: state.math_credits.credits(),
                        grade,
                        reason: Inclusion::Mathematics,
                    });
                }
            }
        }

        if has_elective_in(Area::Cs) {
            if let Some(cs) = catalog.get(CS_COURSE_ID) {
                if let Some(grade) = grades.grade(&cs.id) {
                    contributions.push(Contribution {
                        course_id: cs.id.clone(),
                        credits: cs.credits,
                        grade,
                        reason: Inclusion::ComputerScience,
                    });
                }
            }
        }

        for course in catalog.courses() {
            if !top_areas.contains(&course.category) || course.id == FOUNDATION_COURSE_ID {
                continue;
            }
            if let Some(grade) = grades.grade(&course.id) {
                contributions.push(Contribution {
                    course_id: course.id.clone(),
                    credits: course.credits,
                    grade,
                    reason: Inclusion::TopArea(course.category),
                });
            }
        }

        Self {
            top_areas,
            contributions,
        }
    }

    /// Sum of credits of all admitted grades
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.contributions
            .iter()
            .map(|c| c.credits)
            .fold(0, u32::saturating_add)
    }

    /// Credit-weighted sum of admitted grades
    #[must_use]
    pub fn weighted_sum(&self) -> f64 {
        self.contributions
            .iter()
            .map(|c| f64::from(c.credits) * c.grade)
            .sum()
    }

    /// Weighted average rounded to two decimals, `None` when nothing is graded
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        let total = self.total_credits();
        if total == 0 {
            return None;
        }
        Some(round2(self.weighted_sum() / f64::from(total)))
    }

    /// Whether the grade of `id` is part of the average
    #[must_use]
    pub fn is_used_in_grading(&self, id: &str) -> bool {
        self.contributions.iter().any(|c| c.course_id == id)
    }
}

/// The two of ai, philosophy, psychology with the most elective credits
#[must_use]
pub fn top_areas(state: &TrackerState) -> [Area; 2] {
    let mut ranked = Area::RANKED.map(|area| (area, area_credits(state, area)));
    // stable: equal sums keep ai, philosophy, psychology order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    [ranked[0].0, ranked[1].0]
}

/// Weighted grade average for the current state
#[must_use]
pub fn weighted_grade(catalog: &Catalog, state: &TrackerState) -> Option<f64> {
    GradeBreakdown::compute(catalog, state).average()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
