//! Planner views: assignment deadlines, dashboard statistics, and course search

pub mod dashboard;
pub mod deadlines;

pub use dashboard::{study_minutes_by_course, DashboardStats};
pub use deadlines::{
    days_until_due, due_counts_in_month, effective_status, filter_assignments, is_overdue,
    on_date, upcoming, AssignmentFilter,
};

use crate::core::models::Course;

/// Courses whose name, code, or professor contains `term` (case-insensitive).
///
/// An empty or whitespace-only term matches every course.
#[must_use]
pub fn search_courses<'a>(courses: &'a [Course], term: &str) -> Vec<&'a Course> {
    let term = term.trim();
    courses.iter().filter(|c| c.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_courses() {
        let mut calc = Course::new(1, "Calculus I".to_string(), "MATH 1341".to_string(), 4);
        calc.professor = "Dr. Noether".to_string();
        let writing = Course::new(2, "First-Year Writing".to_string(), "ENGW 1111".to_string(), 4);
        let courses = vec![calc, writing];

        assert_eq!(search_courses(&courses, "math").len(), 1);
        assert_eq!(search_courses(&courses, "noether")[0].id, 1);
        assert_eq!(search_courses(&courses, "  ").len(), 2);
        assert!(search_courses(&courses, "chemistry").is_empty());
    }
}
