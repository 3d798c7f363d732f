//! Assignment deadline logic
//!
//! All functions take `today` explicitly instead of reading the clock.

use crate::core::models::{Assignment, AssignmentStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Signed number of days from `today` to `due` (negative when past due)
#[must_use]
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Whether `due` is strictly before `today`. A date due today is not overdue.
#[must_use]
pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    due < today
}

/// Status to display for an assignment.
///
/// Completed stays completed. A pending assignment past its due date shows as
/// overdue, as does one explicitly recorded as overdue.
#[must_use]
pub fn effective_status(assignment: &Assignment, today: NaiveDate) -> AssignmentStatus {
    match assignment.status {
        AssignmentStatus::Completed => AssignmentStatus::Completed,
        AssignmentStatus::Overdue => AssignmentStatus::Overdue,
        AssignmentStatus::Pending if is_overdue(assignment.due_date, today) => {
            AssignmentStatus::Overdue
        }
        AssignmentStatus::Pending => AssignmentStatus::Pending,
    }
}

/// Incomplete assignments due within `window_days` after today (today excluded),
/// soonest first, at most `limit` of them
#[must_use]
pub fn upcoming(
    assignments: &[Assignment],
    today: NaiveDate,
    window_days: i64,
    limit: usize,
) -> Vec<&Assignment> {
    let mut due: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| !a.is_completed())
        .filter(|a| {
            let days = days_until_due(a.due_date, today);
            days > 0 && days <= window_days
        })
        .collect();
    due.sort_by_key(|a| a.due_date);
    due.truncate(limit);
    due
}

/// Assignments due on `date`, in record order
#[must_use]
pub fn on_date(assignments: &[Assignment], date: NaiveDate) -> Vec<&Assignment> {
    assignments.iter().filter(|a| a.due_date == date).collect()
}

/// Number of assignments due on each day of the month containing `date`
///
/// Only days with at least one assignment appear.
#[must_use]
pub fn due_counts_in_month(
    assignments: &[Assignment],
    date: NaiveDate,
) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for assignment in assignments
        .iter()
        .filter(|a| a.due_date.year() == date.year() && a.due_date.month() == date.month())
    {
        *counts.entry(assignment.due_date).or_insert(0) += 1;
    }
    counts
}

/// Criteria for [`filter_assignments`]; `None` fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentFilter<'a> {
    /// Only assignments for this course
    pub course_id: Option<u32>,
    /// Only assignments whose effective status is this
    pub status: Option<AssignmentStatus>,
    /// Only assignments whose title or description contains this (case-insensitive)
    pub search: Option<&'a str>,
}

/// Assignments matching `filter`, sorted by due date
#[must_use]
pub fn filter_assignments<'a>(
    assignments: &'a [Assignment],
    filter: AssignmentFilter<'_>,
    today: NaiveDate,
) -> Vec<&'a Assignment> {
    let mut matched: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| filter.course_id.is_none_or(|id| a.course_id == id))
        .filter(|a| filter.search.is_none_or(|term| a.matches(term.trim())))
        .filter(|a| {
            filter
                .status
                .is_none_or(|status| effective_status(a, today) == status)
        })
        .collect();
    matched.sort_by_key(|a| a.due_date);
    matched
}
