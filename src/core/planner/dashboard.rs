//! Dashboard statistics

use super::deadlines::{days_until_due, is_overdue, upcoming};
use crate::core::grades;
use crate::core::models::{Assignment, AssignmentStatus, Course, StudySession};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// How far ahead the upcoming list looks, in days
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Maximum entries in the upcoming list
pub const UPCOMING_LIMIT: usize = 5;

/// Summary numbers shown on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats<'a> {
    /// Credit-weighted GPA (0.0 when nothing is graded)
    pub gpa: f64,
    /// Number of courses
    pub course_count: usize,
    /// Number of assignments
    pub total_assignments: usize,
    /// Assignments recorded as completed
    pub completed: usize,
    /// Assignments recorded as pending, regardless of due date
    pub pending: usize,
    /// Incomplete assignments whose due date has passed
    pub overdue: usize,
    /// Incomplete assignments due today or earlier
    pub due_today: Vec<&'a Assignment>,
    /// Incomplete assignments due in the next week, soonest first
    pub upcoming: Vec<&'a Assignment>,
    /// Total minutes across all study sessions
    pub study_minutes: u64,
}

impl<'a> DashboardStats<'a> {
    /// Compute dashboard statistics as of `today`
    #[must_use]
    pub fn compute(
        courses: &[Course],
        assignments: &'a [Assignment],
        sessions: &[StudySession],
        today: NaiveDate,
    ) -> Self {
        let count_status = |status: AssignmentStatus| {
            assignments.iter().filter(|a| a.status == status).count()
        };

        Self {
            gpa: grades::gpa(courses),
            course_count: courses.len(),
            total_assignments: assignments.len(),
            completed: count_status(AssignmentStatus::Completed),
            pending: count_status(AssignmentStatus::Pending),
            overdue: assignments
                .iter()
                .filter(|a| !a.is_completed() && is_overdue(a.due_date, today))
                .count(),
            due_today: assignments
                .iter()
                .filter(|a| !a.is_completed() && days_until_due(a.due_date, today) <= 0)
                .collect(),
            upcoming: upcoming(assignments, today, UPCOMING_WINDOW_DAYS, UPCOMING_LIMIT),
            study_minutes: sessions.iter().map(|s| u64::from(s.duration_minutes)).sum(),
        }
    }

    /// Whether there is nothing to show yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.course_count == 0 && self.total_assignments == 0
    }

    /// Share of assignments completed, in percent (0 when there are none)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        if self.total_assignments == 0 {
            0.0
        } else {
            self.completed as f64 * 100.0 / self.total_assignments as f64
        }
    }
}

/// Total study minutes per course id
#[must_use]
pub fn study_minutes_by_course(sessions: &[StudySession]) -> BTreeMap<u32, u64> {
    let mut totals = BTreeMap::new();
    for session in sessions {
        *totals.entry(session.course_id).or_insert(0) += u64::from(session.duration_minutes);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GradeCategory;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn assignment(id: u32, due: NaiveDate, status: AssignmentStatus) -> Assignment {
        let mut a = Assignment::new(id, 1, format!("Task {id}"), due);
        a.status = status;
        a
    }

    #[test]
    fn test_compute_counts() {
        let course = Course::new(1, "Stats".to_string(), "MATH 2280".to_string(), 4)
            .with_category(GradeCategory::with_scores("All".to_string(), 100.0, &[88.0]));
        let assignments = vec![
            assignment(1, day(5), AssignmentStatus::Pending),
            assignment(2, day(10), AssignmentStatus::Pending),
            assignment(3, day(12), AssignmentStatus::Pending),
            assignment(4, day(1), AssignmentStatus::Completed),
            assignment(5, day(30), AssignmentStatus::Overdue),
        ];
        let sessions = vec![
            StudySession::new(1, 1, day(2), 50),
            StudySession::new(2, 1, day(3), 25),
        ];

        let stats = DashboardStats::compute(&[course], &assignments, &sessions, day(10));

        assert!((stats.gpa - 3.3).abs() < 1e-9);
        assert_eq!(stats.course_count, 1);
        assert_eq!(stats.total_assignments, 5);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.overdue, 1);
        assert_eq!(
            stats.due_today.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(stats.upcoming.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(stats.study_minutes, 75);
        assert!((stats.completion_rate() - 20.0).abs() < 1e-9);
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = DashboardStats::compute(&[], &[], &[], day(1));

        assert!(stats.is_empty());
        assert!(stats.gpa.abs() < f64::EPSILON);
        assert!(stats.completion_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_study_minutes_by_course() {
        let sessions = vec![
            StudySession::new(1, 2, day(1), 30),
            StudySession::new(2, 1, day(1), 45),
            StudySession::new(3, 2, day(2), 60),
        ];
        let totals = study_minutes_by_course(&sessions);

        assert_eq!(totals.get(&1), Some(&45));
        assert_eq!(totals.get(&2), Some(&90));
    }

    #[test]
    fn test_study_minutes_past_u32_limit() {
        let sessions = vec![
            StudySession::new(1, 1, day(1), u32::MAX),
            StudySession::new(2, 1, day(2), 1),
        ];
        let expected = u64::from(u32::MAX) + 1;

        let stats = DashboardStats::compute(&[], &[], &sessions, day(3));
        assert_eq!(stats.study_minutes, expected);
        assert_eq!(study_minutes_by_course(&sessions).get(&1), Some(&expected));
    }
}
