//! PDF report generator
//!
//! Renders the HTML report to a temporary file and prints it with headless
//! Chrome/Chromium.

use super::html::HtmlReporter;
use crate::core::report::{ReportContext, ReportGenerator};
use crate::debug;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Browser executables tried in order when no converter is given
const CHROME_CANDIDATES: [&str; 8] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
];

/// PDF report generator using HTML-to-PDF conversion
pub struct PdfReporter {
    converter: Option<String>,
}

impl PdfReporter {
    /// Create a PDF reporter that auto-detects the browser
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF reporter with an explicit browser executable
    #[must_use]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    fn detect_chrome() -> Option<&'static str> {
        CHROME_CANDIDATES.into_iter().find(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok_and(|status| status.success())
        })
    }

    fn print_to_pdf(chrome: &str, html_path: &Path, pdf_path: &Path) -> Result<(), Box<dyn Error>> {
        debug!("Printing {} with {chrome}", html_path.display());
        let status = Command::new(chrome)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.canonicalize()?.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(format!("{chrome} exited with {status} while printing PDF").into());
        }
        Ok(())
    }

    fn converter(&self) -> Result<&str, Box<dyn Error>> {
        if let Some(converter) = &self.converter {
            return Ok(converter.as_str());
        }
        Self::detect_chrome().ok_or_else(|| {
            "PDF conversion failed: Chrome/Chromium not found.\n\
             Install Chrome or Chromium, or generate an HTML report instead."
                .into()
        })
    }

    fn temp_html_path() -> PathBuf {
        std::env::temp_dir().join(format!("ectstracker_report_{}.html", std::process::id()))
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let chrome = self.converter()?;
        let html_path = Self::temp_html_path();
        HtmlReporter::new().generate(ctx, &html_path)?;

        let result = Self::print_to_pdf(chrome, &html_path, output_path);
        let _ = std::fs::remove_file(&html_path);
        result
    }

    /// PDF output is binary; returns the HTML it would print
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        HtmlReporter::new().render(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::state::TrackerState;

    #[test]
    fn test_missing_converter_fails_cleanly() {
        let catalog = Catalog::standard();
        let state = TrackerState::default();
        let ctx = ReportContext::new(&catalog, &state);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.pdf");

        let reporter = PdfReporter::with_converter("/nonexistent/chrome-binary");
        assert!(reporter.generate(&ctx, &out).is_err());
        assert!(!out.exists());
    }
}
