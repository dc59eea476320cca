//! Markdown report generator
//!
//! Plain tables that render in GitHub, GitLab and most editors.

use crate::core::report::{percent_label, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        for (placeholder, value) in ctx.summary_fields() {
            output = output.replace(placeholder, &value);
        }

        let notes: String = ctx
            .cap_notes()
            .iter()
            .map(|note| format!("> ⚠️ {note}\n"))
            .collect();
        output = output.replace("{{cap_notes}}", notes.trim_end());

        output = output.replace("{{area_rows}}", Self::area_rows(ctx).trim_end());
        output = output.replace("{{course_rows}}", Self::course_rows(ctx).trim_end());
        output = output.replace("{{elective_rows}}", Self::elective_rows(ctx).trim_end());
        output = output.replace(
            "{{free_elective_rows}}",
            Self::free_elective_rows(ctx).trim_end(),
        );
        output = output.replace("{{grading_rows}}", Self::grading_rows(ctx).trim_end());

        output
    }

    fn area_rows(ctx: &ReportContext) -> String {
        let mut table = String::new();
        for entry in &ctx.progress.areas {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                entry.area.display_name(),
                entry.credits,
                entry.ceiling,
                percent_label(entry.percent)
            );
        }
        table
    }

    fn course_rows(ctx: &ReportContext) -> String {
        let mut table = String::new();
        for row in ctx.course_rows() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} |",
                if row.completed { "✓" } else { " " },
                row.name,
                row.area.display_name(),
                row.credits,
                ctx.grade_label(&row.id),
                if row.counted { "yes" } else { "" }
            );
        }
        table
    }

    fn elective_rows(ctx: &ReportContext) -> String {
        if ctx.state.elective_courses.is_empty() {
            return "_No electives recorded._\n".to_string();
        }
        let mut table = String::from("| Course | Area | ECTS | Grade |\n|---|---|---|---|\n");
        for record in &ctx.state.elective_courses {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                record.name,
                record.area.display_name(),
                record.credits,
                ctx.grade_label(&record.id)
            );
        }
        table
    }

    fn free_elective_rows(ctx: &ReportContext) -> String {
        if ctx.state.free_elective_courses.is_empty() {
            return "_No free electives recorded._\n".to_string();
        }
        let mut table = String::from("| Course | ECTS |\n|---|---|\n");
        for record in &ctx.state.free_elective_courses {
            let _ = writeln!(table, "| {} | {} |", record.name, record.credits);
        }
        table
    }

    fn grading_rows(ctx: &ReportContext) -> String {
        if ctx.grading.contributions.is_empty() {
            return "_No grades count toward the average yet._\n".to_string();
        }
        let mut table = String::from("| Course | ECTS | Grade | Rule |\n|---|---|---|---|\n");
        for item in &ctx.grading.contributions {
            let _ = writeln!(
                table,
                "| {} | {} | {:.1} | {} |",
                item.course_id, item.credits, item.grade, item.reason
            );
        }
        let _ = writeln!(
            table,
            "| **Total** | {} | **{}** | |",
            ctx.grading.total_credits(),
            ctx.weighted_grade_label()
        );
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
