//! Markdown report generator
//!
//! Renders grade reports as Markdown tables that display well in GitHub,
//! GitLab, and VS Code.

use crate::core::report::{CourseRow, ReportContext, ReportGenerator};
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
        let rows = ctx.course_rows();

        fill_placeholders(MARKDOWN_TEMPLATE, |name| match name {
            "date" => Some(ctx.date_display()),
            "gpa" => Some(ctx.gpa_display()),
            "gpa_letter" => Some(ctx.gpa_letter().to_string()),
            "course_count" => Some(ctx.course_count().to_string()),
            "graded_count" => Some(ctx.graded_count().to_string()),
            "total_credits" => Some(ctx.total_credits().to_string()),
            "course_table" => Some(Self::generate_course_table(&rows)),
            "category_breakdown" => Some(Self::generate_category_breakdown(&rows)),
            "deadlines" => Some(Self::generate_deadline_table(ctx)),
            _ => None,
        })
    }

    fn generate_course_table(rows: &[CourseRow]) -> String {
        if rows.is_empty() {
            return "_No courses yet._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Course | Professor | Credits | Grade | Letter |\n");
        table.push_str("|---|---|---|---|---|\n");

        for row in rows {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} |",
                escape_cell(&row.label),
                escape_cell(&row.professor),
                row.credits,
                row.percentage,
                row.letter
            );
        }

        table
    }

    fn generate_category_breakdown(rows: &[CourseRow]) -> String {
        let mut out = String::new();

        for row in rows.iter().filter(|r| !r.categories.is_empty()) {
            let _ = writeln!(out, "### {}\n", row.label);
            out.push_str("| Category | Weight | Grades | Average |\n");
            out.push_str("|---|---|---|---|\n");
            for category in &row.categories {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    escape_cell(&category.name),
                    category.weight,
                    category.grade_count,
                    category.average
                );
            }
            out.push('\n');
        }

        if out.is_empty() {
            out.push_str("_No grade categories recorded._\n");
        }
        out
    }

    fn generate_deadline_table(ctx: &ReportContext) -> String {
        let deadlines = ctx.deadline_rows();
        if deadlines.is_empty() {
            return "_Nothing due in the next 7 days._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Due | Assignment | Course | Priority |\n");
        table.push_str("|---|---|---|---|\n");
        for row in deadlines {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                row.due,
                escape_cell(&row.title),
                escape_cell(&row.course),
                row.priority
            );
        }
        table
    }
}

/// Replace each `{{name}}` in `template` in a single pass
///
/// Substituted text is never scanned again, so record text that looks like a
/// placeholder stays literal. Unknown names are left as written.
fn fill_placeholders(template: &str, mut value: impl FnMut(&str) -> Option<String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        match value(&after[..end]) {
            Some(text) => output.push_str(&text),
            None => output.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    output.push_str(rest);
    output
}

/// Pipes would split a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
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
