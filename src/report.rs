//! Salary report artifact
//!
//! A report carries the employee name, the predicted salary, and the input
//! parameters that produced it. Text rendering is always available; PDF
//! rendering needs a directory with a regular/bold/italic TTF family.

use crate::error::{Result, SalaryError};
use crate::pipeline::PredictionResult;
use genpdf::Element as _;
use genpdf::{elements, style};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A salary estimate packaged for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryReport {
    pub employee_name: String,
    pub result: PredictionResult,
}

impl SalaryReport {
    pub fn new(employee_name: impl Into<String>, result: PredictionResult) -> Self {
        Self {
            employee_name: employee_name.into(),
            result,
        }
    }

    /// The report's lines as (label, value) pairs
    fn fields(&self) -> Vec<(&'static str, String)> {
        let r = &self.result.request;
        vec![
            ("Employee", self.employee_name.clone()),
            ("Predicted Salary", self.result.formatted.clone()),
            ("Age", r.age.to_string()),
            ("Gender", r.gender.clone()),
            ("Education Level", r.education.clone()),
            ("Job Title", r.job_title.clone()),
            ("Years of Experience", r.years_experience.to_string()),
        ]
    }

    /// Plain-text rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Salary Prediction Report\n");
        out.push_str("========================\n\n");
        for (label, value) in self.fields() {
            out.push_str(&format!("{label:<20} {value}\n"));
        }
        out
    }

    /// Write the plain-text rendering to a file
    pub fn write_text(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_text())?;
        info!(path = %path.display(), "wrote text report");
        Ok(())
    }

    /// Write a PDF rendering.
    ///
    /// `font_dir` must contain `{font_name}-Regular.ttf` and friends
    /// (e.g. the LiberationSans family).
    pub fn write_pdf(&self, path: &Path, font_dir: &Path, font_name: &str) -> Result<()> {
        let family = genpdf::fonts::from_files(font_dir, font_name, None)
            .map_err(|e| SalaryError::ReportError(format!("loading fonts: {e}")))?;

        let mut doc = genpdf::Document::new(family);
        doc.set_title("Salary Prediction Report");
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new("Salary Prediction Report")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.0));

        for (label, value) in self.fields() {
            doc.push(elements::Paragraph::new(format!("{label}: {value}")));
        }

        doc.render_to_file(path)
            .map_err(|e| SalaryError::ReportError(format!("rendering pdf: {e}")))?;
        info!(path = %path.display(), "wrote pdf report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PredictionRequest;
    use crate::pipeline::format_currency;

    fn sample_report() -> SalaryReport {
        let request = PredictionRequest {
            age: 30,
            gender: "Male".to_string(),
            education: "Master's".to_string(),
            job_title: "Data Analyst".to_string(),
            years_experience: 5,
        };
        SalaryReport::new(
            "Jordan Example",
            PredictionResult {
                salary: 87000.0,
                formatted: format_currency(87000.0),
                request,
            },
        )
    }

    #[test]
    fn test_text_rendering_contains_all_inputs() {
        let text = sample_report().render_text();
        for needle in [
            "Jordan Example",
            "$87,000",
            "Data Analyst",
            "Master's",
            "30",
        ] {
            assert!(text.contains(needle), "missing '{needle}' in:\n{text}");
        }
    }

    #[test]
    fn test_write_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        sample_report().write_text(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Predicted Salary"));
    }

    #[test]
    fn test_missing_font_dir_is_report_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sample_report()
            .write_pdf(
                &dir.path().join("report.pdf"),
                Path::new("/nonexistent/fonts"),
                "LiberationSans",
            )
            .unwrap_err();
        assert!(matches!(err, SalaryError::ReportError(_)));
    }
}
