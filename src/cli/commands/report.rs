//! Report command handler
//!
//! Generates progress reports in Markdown, HTML or PDF.

use super::{open_tracker, CommandResult};
use ects_tracker::config::Config;
use ects_tracker::core::report::{
    HtmlReporter, MarkdownReporter, PdfReporter, ReportContext, ReportFormat, ReportGenerator,
};
use ects_tracker::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Default report file stem inside the reports directory
const REPORT_FILE_STEM: &str = "ects-progress";

/// Run the report command
pub fn run(config: &Config, format_str: &str, output: Option<&Path>) -> CommandResult {
    let format: ReportFormat = format_str.parse()?;
    let tracker = open_tracker(config)?;

    let path = output.map_or_else(
        || {
            PathBuf::from(&config.paths.reports_dir)
                .join(format!("{REPORT_FILE_STEM}.{}", format.extension()))
        },
        Path::to_path_buf,
    );
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }

    let ctx = ReportContext::new(tracker.catalog(), tracker.state());
    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Pdf => Box::new(PdfReporter::new()),
    };
    reporter.generate(&ctx, &path).map_err(|e| {
        error!("Report generation failed for {}: {e}", path.display());
        e.to_string()
    })?;

    info!("{format} report written to {}", path.display());
    println!("✓ Report generated: {}", path.display());
    Ok(())
}
