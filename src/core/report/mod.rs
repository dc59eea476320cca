//! Progress report generation
//!
//! Renders the current tracker state as Markdown, HTML or PDF. All formats
//! draw from a single [`ReportContext`].

pub mod formats;

use crate::core::catalog::Catalog;
use crate::core::grading::GradeBreakdown;
use crate::core::models::{Area, NO_GRADE};
use crate::core::progress::ProgressReport;
use crate::core::state::TrackerState;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, PdfReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Mandatory course catalog
    pub catalog: &'a Catalog,
    /// Snapshot being reported
    pub state: &'a TrackerState,
    /// Progress numbers for `state`
    pub progress: ProgressReport,
    /// Grade engine decisions for `state`
    pub grading: GradeBreakdown,
}

/// One row of the mandatory course table
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    /// Course id
    pub id: String,
    /// Display name, including any group annotation
    pub name: String,
    /// Credits under the current math setting
    pub credits: u32,
    /// Area the course belongs to
    pub area: Area,
    /// Marked complete
    pub completed: bool,
    /// Stored grade, if any
    pub grade: Option<f64>,
    /// Counted in the weighted grade
    pub counted: bool,
}

impl<'a> ReportContext<'a> {
    /// Build a context, computing progress and grading for `state`
    #[must_use]
    pub fn new(catalog: &'a Catalog, state: &'a TrackerState) -> Self {
        Self {
            catalog,
            state,
            progress: ProgressReport::compute(catalog, state),
            grading: GradeBreakdown::compute(catalog, state),
        }
    }

    /// Weighted grade formatted to two decimals, or `-`
    #[must_use]
    pub fn weighted_grade_label(&self) -> String {
        self.grading
            .average()
            .map_or_else(|| NO_GRADE.to_string(), |grade| format!("{grade:.2}"))
    }

    /// Display names of the two top-ranked areas
    #[must_use]
    pub fn top_areas_label(&self) -> String {
        let [first, second] = self.grading.top_areas;
        format!("{}, {}", first.display_name(), second.display_name())
    }

    /// Rows for every catalog course in catalog order
    #[must_use]
    pub fn course_rows(&self) -> Vec<CourseRow> {
        let math = self.state.math_credits;
        self.catalog
            .courses()
            .iter()
            .map(|course| CourseRow {
                id: course.id.clone(),
                name: course.group_label().map_or_else(
                    || course.name.clone(),
                    |label| format!("{} {label}", course.name),
                ),
                credits: course.effective_credits(math),
                area: course.category,
                completed: self.state.is_completed(&course.id),
                grade: self.state.grades.grade(&course.id),
                counted: self.grading.is_used_in_grading(&course.id),
            })
            .collect()
    }

    /// Placeholder values shared by every template
    #[must_use]
    pub fn summary_fields(&self) -> Vec<(&'static str, String)> {
        let p = &self.progress;
        vec![
            ("{{overall_completed}}", p.overall_completed.to_string()),
            ("{{overall_required}}", p.overall_required.to_string()),
            ("{{overall_percent}}", percent_label(p.overall_percent)),
            ("{{weighted_grade}}", self.weighted_grade_label()),
            ("{{math_credits}}", self.state.math_credits.to_string()),
            ("{{mandatory_completed}}", p.mandatory_completed.to_string()),
            ("{{mandatory_total}}", p.mandatory_total.to_string()),
            ("{{mandatory_percent}}", percent_label(p.mandatory_percent)),
            ("{{elective_counted}}", p.elective_counted.to_string()),
            ("{{elective_percent}}", percent_label(p.elective_percent)),
            ("{{free_elective_counted}}", p.free_elective_counted.to_string()),
            ("{{free_elective_ceiling}}", p.free_elective_ceiling.to_string()),
            ("{{free_elective_percent}}", percent_label(p.free_elective_percent)),
            ("{{top_areas}}", self.top_areas_label()),
        ]
    }

    /// Notes for categories whose stored credits exceed what is counted
    #[must_use]
    pub fn cap_notes(&self) -> Vec<String> {
        let p = &self.progress;
        let mut notes = Vec::new();
        if p.elective_exceeds_cap() {
            notes.push(format!(
                "{} elective ECTS recorded, only {} count toward the degree.",
                p.elective_total, p.elective_counted
            ));
        }
        if p.free_elective_exceeds_cap() {
            notes.push(format!(
                "{} free elective ECTS recorded, only {} count toward the degree.",
                p.free_elective_total, p.free_elective_counted
            ));
        }
        notes
    }

    /// Grade of `id` formatted for a table cell
    #[must_use]
    pub fn grade_label(&self, id: &str) -> String {
        self.state
            .grades
            .grade(id)
            .map_or_else(|| NO_GRADE.to_string(), |grade| format!("{grade:.1}"))
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Format a percentage with one decimal
pub(crate) fn percent_label(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{reduce, Action, SequentialIds};
    use crate::core::models::GradeInput;

    fn graded_state() -> TrackerState {
        let mut ids = SequentialIds::new("e");
        let mut state = TrackerState::default();
        for action in [
            Action::ToggleCourse { id: "stats".into() },
            Action::SetGrade { id: "stats".into(), grade: GradeInput::Set(2.0) },
            Action::ToggleCourse { id: "cog".into() },
        ] {
            state = reduce(&state, action, &mut ids).unwrap().state;
        }
        state
    }

    #[test]
    fn test_course_rows_follow_catalog() {
        let catalog = Catalog::standard();
        let state = graded_state();
        let ctx = ReportContext::new(&catalog, &state);
        let rows = ctx.course_rows();
        assert_eq!(rows.len(), catalog.courses().len());

        let stats = rows.iter().find(|row| row.id == "stats").unwrap();
        assert!(stats.completed && stats.counted);
        assert_eq!(stats.grade, Some(2.0));

        let cog = rows.iter().find(|row| row.id == "cog").unwrap();
        assert!(cog.completed && !cog.counted);
    }

    #[test]
    fn test_labels() {
        let catalog = Catalog::standard();
        let state = graded_state();
        let ctx = ReportContext::new(&catalog, &state);
        assert_eq!(ctx.weighted_grade_label(), "2.00");
        assert_eq!(ctx.grade_label("stats"), "2.0");
        assert_eq!(ctx.grade_label("cog"), "-");

        let empty = TrackerState::default();
        assert_eq!(ReportContext::new(&catalog, &empty).weighted_grade_label(), "-");
    }
}
