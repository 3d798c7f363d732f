//! Report generation module for grade reports
//!
//! Reports are rendered from a [`ReportContext`] in Markdown or HTML. Every
//! number a template shows is formatted here, so both formats agree.

pub mod formats;

use crate::core::grades::{self, CourseGrade, GpaStanding};
use crate::core::models::{Assignment, Course};
use crate::core::planner::{self, dashboard::UPCOMING_LIMIT, dashboard::UPCOMING_WINDOW_DAYS};
use chrono::NaiveDate;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// One grade category row in a course breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    /// Category name
    pub name: String,
    /// Weight, e.g. "40%"
    pub weight: String,
    /// Number of recorded grades
    pub grade_count: usize,
    /// Average of the recorded grades, or "N/A"
    pub average: String,
}

/// One course row in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    /// Course code and name
    pub label: String,
    /// Instructor
    pub professor: String,
    /// Credit hours
    pub credits: u32,
    /// Weighted percentage, or "N/A"
    pub percentage: String,
    /// Letter grade, or "N/A"
    pub letter: String,
    /// Standing label (CSS class), empty when ungraded
    pub standing: String,
    /// Per-category breakdown
    pub categories: Vec<CategoryRow>,
}

/// One upcoming assignment row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineRow {
    /// Due date (YYYY-MM-DD)
    pub due: String,
    /// Assignment title
    pub title: String,
    /// Course label, or the raw id when the course is unknown
    pub course: String,
    /// Priority
    pub priority: String,
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Courses to report on
    pub courses: &'a [Course],
    /// Assignments used for the upcoming-deadline section
    pub assignments: &'a [Assignment],
    /// Date the report is generated for
    pub today: NaiveDate,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(courses: &'a [Course], assignments: &'a [Assignment], today: NaiveDate) -> Self {
        Self {
            courses,
            assignments,
            today,
        }
    }

    /// Credit-weighted GPA
    #[must_use]
    pub fn gpa(&self) -> f64 {
        grades::gpa(self.courses)
    }

    /// GPA formatted with two decimals
    #[must_use]
    pub fn gpa_display(&self) -> String {
        grades::format_gpa(self.gpa())
    }

    /// Letter equivalent of the GPA
    #[must_use]
    pub fn gpa_letter(&self) -> &'static str {
        grades::gpa_letter(self.gpa())
    }

    /// GPA standing label
    #[must_use]
    pub fn gpa_standing(&self) -> &'static str {
        GpaStanding::from_gpa(self.gpa()).as_str()
    }

    /// Total credit hours
    #[must_use]
    pub fn total_credits(&self) -> u64 {
        grades::total_credits(self.courses)
    }

    /// Number of courses with at least one recorded grade
    #[must_use]
    pub fn graded_count(&self) -> usize {
        self.courses
            .iter()
            .filter(|c| grades::course_grade(&c.grade_categories).is_some())
            .count()
    }

    /// Get course count
    #[must_use]
    pub const fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Formatted rows for every course, in record order
    #[must_use]
    pub fn course_rows(&self) -> Vec<CourseRow> {
        self.courses.iter().map(course_row).collect()
    }

    /// Formatted rows for incomplete assignments due in the next week
    #[must_use]
    pub fn deadline_rows(&self) -> Vec<DeadlineRow> {
        planner::upcoming(
            self.assignments,
            self.today,
            UPCOMING_WINDOW_DAYS,
            UPCOMING_LIMIT,
        )
        .into_iter()
        .map(|a| DeadlineRow {
            due: a.due_date.format("%Y-%m-%d").to_string(),
            title: a.title.clone(),
            course: self
                .courses
                .iter()
                .find(|c| c.id == a.course_id)
                .map_or_else(|| format!("#{}", a.course_id), Course::label),
            priority: a.priority.to_string(),
        })
        .collect()
    }

    /// Report date (YYYY-MM-DD)
    #[must_use]
    pub fn date_display(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }
}

fn course_row(course: &Course) -> CourseRow {
    let grade = CourseGrade::of(course);
    CourseRow {
        label: course.label(),
        professor: course.professor.clone(),
        credits: course.credits,
        percentage: grades::format_percentage(grade.percentage),
        letter: grades::format_letter(grade.percentage).to_string(),
        standing: grade
            .standing()
            .map_or_else(String::new, |s| s.as_str().to_string()),
        categories: course
            .grade_categories
            .iter()
            .map(|category| CategoryRow {
                name: category.name.clone(),
                weight: format!("{}%", category.weight),
                grade_count: category.grades.len(),
                average: if category.has_grades() {
                    format!("{:.1}%", grades::category_average(category))
                } else {
                    grades::NO_GRADE.to_string()
                },
            })
            .collect(),
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

/// Generator for `format`
#[must_use]
pub fn generator_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GradeCategory;

    fn sample_courses() -> Vec<Course> {
        let mut graded = Course::new(1, "Data Structures".to_string(), "CS 2510".to_string(), 4)
            .with_category(GradeCategory::with_scores("Exams".to_string(), 60.0, &[90.0, 80.0]))
            .with_category(GradeCategory::new("Labs".to_string(), 40.0));
        graded.professor = "Dr. Lin".to_string();
        let ungraded = Course::new(2, "Ceramics".to_string(), String::new(), 2);
        vec![graded, ungraded]
    }

    #[test]
    fn test_course_rows() {
        let courses = sample_courses();
        let today = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let ctx = ReportContext::new(&courses, &[], today);
        let rows = ctx.course_rows();

        assert_eq!(rows[0].label, "CS 2510 - Data Structures");
        assert_eq!(rows[0].percentage, "85.0%");
        assert_eq!(rows[0].letter, "B");
        assert_eq!(rows[0].standing, "good");
        assert_eq!(rows[0].categories[0].average, "85.0%");
        assert_eq!(rows[0].categories[1].average, "N/A");
        assert_eq!(rows[0].categories[1].weight, "40%");

        assert_eq!(rows[1].percentage, "N/A");
        assert_eq!(rows[1].letter, "N/A");
        assert!(rows[1].standing.is_empty());
    }

    #[test]
    fn test_summary_values() {
        let courses = sample_courses();
        let today = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let ctx = ReportContext::new(&courses, &[], today);

        assert_eq!(ctx.gpa_display(), "3.00");
        assert_eq!(ctx.total_credits(), 6);
        assert_eq!(ctx.graded_count(), 1);
        assert_eq!(ctx.course_count(), 2);
        assert_eq!(ctx.date_display(), "2024-10-01");
    }

    #[test]
    fn test_deadline_rows_use_course_label() {
        let courses = sample_courses();
        let today = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let assignments = vec![
            Assignment::new(1, 1, "Heap lab".to_string(), today + chrono::Days::new(2)),
            Assignment::new(2, 9, "Orphan".to_string(), today + chrono::Days::new(3)),
            Assignment::new(3, 1, "Later".to_string(), today + chrono::Days::new(30)),
        ];
        let ctx = ReportContext::new(&courses, &assignments, today);
        let rows = ctx.deadline_rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course, "CS 2510 - Data Structures");
        assert_eq!(rows[0].due, "2024-10-03");
        assert_eq!(rows[1].course, "#9");
    }
}
