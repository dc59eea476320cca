//! HTML report generator
//!
//! The generated page is self-contained with embedded CSS, and also serves
//! as the input for PDF printing.

use crate::core::report::{percent_label, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

/// Escape text for HTML element content
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A progress bar cell
fn bar(percent: f64) -> String {
    let width = percent.clamp(0.0, 100.0);
    format!(
        "<div class=\"bar\"><span style=\"width: {width:.0}%\"></span></div>{}",
        percent_label(percent)
    )
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

        for (placeholder, value) in ctx.summary_fields() {
            output = output.replace(placeholder, &escape(&value));
        }

        let notes: String = ctx
            .cap_notes()
            .iter()
            .map(|note| format!("<p class=\"note\">{}</p>\n", escape(note)))
            .collect();
        output = output.replace("{{cap_notes}}", &notes);

        output = output.replace("{{area_rows}}", &Self::area_rows(ctx));
        output = output.replace("{{course_rows}}", &Self::course_rows(ctx));
        output = output.replace("{{elective_rows}}", &Self::elective_rows(ctx));
        output = output.replace("{{free_elective_rows}}", &Self::free_elective_rows(ctx));
        output = output.replace("{{grading_rows}}", &Self::grading_rows(ctx));

        output
    }

    fn area_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();
        for entry in &ctx.progress.areas {
            let _ = writeln!(
                rows,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                entry.area.display_name(),
                entry.credits,
                entry.ceiling,
                bar(entry.percent)
            );
        }
        rows
    }

    fn course_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();
        for row in ctx.course_rows() {
            let _ = writeln!(
                rows,
                "<tr{}><td class=\"done\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                if row.counted { " class=\"counted\"" } else { "" },
                if row.completed { "✓" } else { "" },
                escape(&row.name),
                row.area.display_name(),
                row.credits,
                ctx.grade_label(&row.id)
            );
        }
        rows
    }

    fn elective_rows(ctx: &ReportContext) -> String {
        if ctx.state.elective_courses.is_empty() {
            return "<p><em>No electives recorded.</em></p>\n".to_string();
        }
        let mut table = String::from(
            "<table>\n<tr><th>Course</th><th>Area</th><th>ECTS</th><th>Grade</th></tr>\n",
        );
        for record in &ctx.state.elective_courses {
            let _ = writeln!(
                table,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&record.name),
                record.area.display_name(),
                record.credits,
                ctx.grade_label(&record.id)
            );
        }
        table.push_str("</table>\n");
        table
    }

    fn free_elective_rows(ctx: &ReportContext) -> String {
        if ctx.state.free_elective_courses.is_empty() {
            return "<p><em>No free electives recorded.</em></p>\n".to_string();
        }
        let mut table = String::from("<table>\n<tr><th>Course</th><th>ECTS</th></tr>\n");
        for record in &ctx.state.free_elective_courses {
            let _ = writeln!(
                table,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&record.name),
                record.credits
            );
        }
        table.push_str("</table>\n");
        table
    }

    fn grading_rows(ctx: &ReportContext) -> String {
        if ctx.grading.contributions.is_empty() {
            return "<p><em>No grades count toward the average yet.</em></p>\n".to_string();
        }
        let mut table = String::from(
            "<table>\n<tr><th>Course</th><th>ECTS</th><th>Grade</th><th>Rule</th></tr>\n",
        );
        for item in &ctx.grading.contributions {
            let _ = writeln!(
                table,
                "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td></tr>",
                escape(&item.course_id),
                item.credits,
                item.grade,
                item.reason
            );
        }
        let _ = writeln!(
            table,
            "<tr><th>Total</th><th>{}</th><th>{}</th><th></th></tr>\n</table>",
            ctx.grading.total_credits(),
            ctx.weighted_grade_label()
        );
        table
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html_content = self.render(ctx)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
