//! HTML report generator
//!
//! Generates a self-contained HTML page with embedded CSS. Rendering goes
//! through an askama template, so every record-supplied string is escaped.

use crate::core::report::{CourseRow, DeadlineRow, ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Values bound into `templates/grade_report.html`
#[derive(Template)]
#[template(path = "grade_report.html")]
struct GradeReportPage {
    date: String,
    gpa: String,
    gpa_letter: &'static str,
    gpa_standing: &'static str,
    course_count: usize,
    graded_count: usize,
    total_credits: u64,
    courses: Vec<CourseRow>,
    deadlines: Vec<DeadlineRow>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn page(ctx: &ReportContext) -> GradeReportPage {
        GradeReportPage {
            date: ctx.date_display(),
            gpa: ctx.gpa_display(),
            gpa_letter: ctx.gpa_letter(),
            gpa_standing: ctx.gpa_standing(),
            course_count: ctx.course_count(),
            graded_count: ctx.graded_count(),
            total_credits: ctx.total_credits(),
            courses: ctx.course_rows(),
            deadlines: ctx.deadline_rows(),
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::page(ctx).render()?)
    }
}
