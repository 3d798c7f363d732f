//! Record snapshots: loading loosely-typed JSON and normalizing it into strict models
//!
//! The record source may omit fields, send numbers as strings, or use `Id`
//! instead of `id`. Everything is coerced here, and recoverable problems are
//! collected as warnings instead of failing the load.

use crate::core::models::{
    Assignment, AssignmentStatus, Course, GradeCategory, GradedItem, Priority, StudySession,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading, normalizing, or saving a snapshot
#[derive(Debug, Error)]
pub enum RecordError {
    /// The snapshot file could not be read
    #[error("Failed to read records file {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The snapshot file could not be written
    #[error("Failed to write records file {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong top-level shape
    #[error("Invalid records JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record lacks an identifier
    #[error("{kind} record #{index} has no id")]
    MissingId {
        /// Record kind
        kind: &'static str,
        /// Zero-based position in its list
        index: usize,
    },

    /// A record has an identifier that is not a non-negative integer
    #[error("{kind} record #{index} has an invalid id: {value}")]
    InvalidId {
        /// Record kind
        kind: &'static str,
        /// Zero-based position in its list
        index: usize,
        /// Offending value
        value: String,
    },

    /// Two records of the same kind share an identifier
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// Record kind
        kind: &'static str,
        /// Repeated id
        id: u32,
    },

    /// A required field is absent
    #[error("{kind} {id} is missing required field '{field}'")]
    MissingField {
        /// Record kind
        kind: &'static str,
        /// Record id
        id: u32,
        /// Field name as it appears in the record
        field: &'static str,
    },

    /// A date field could not be parsed
    #[error("{kind} {id} has an invalid date: '{value}'")]
    InvalidDate {
        /// Record kind
        kind: &'static str,
        /// Record id
        id: u32,
        /// Offending value
        value: String,
    },
}

/// Strict, normalized records ready for the grade engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Courses
    pub courses: Vec<Course>,
    /// Assignments
    pub assignments: Vec<Assignment>,
    /// Study sessions
    pub study_sessions: Vec<StudySession>,
}

impl Snapshot {
    /// Find a course by id
    #[must_use]
    pub fn course(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }
}

/// Result of normalization: the snapshot plus any recoverable problems found
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Normalized records
    pub snapshot: Snapshot,
    /// Human-readable descriptions of coerced or dropped values
    pub warnings: Vec<String>,
}

/// Loose snapshot document as read from disk
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSnapshot {
    /// Course records
    pub courses: Vec<RawCourse>,
    /// Assignment records
    pub assignments: Vec<RawAssignment>,
    /// Study session records
    pub study_sessions: Vec<RawStudySession>,
}

/// Loose course record
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCourse {
    /// Identifier, from `Id`
    #[serde(rename = "Id")]
    pub id: Option<Value>,
    /// Identifier, from lowercase `id` (used when `Id` is absent)
    #[serde(rename = "id")]
    pub lower_id: Option<Value>,
    /// Name
    pub name: Option<String>,
    /// Code
    pub code: Option<String>,
    /// Professor
    pub professor: Option<String>,
    /// Schedule
    pub schedule: Option<String>,
    /// Semester
    pub semester: Option<String>,
    /// Color
    pub color: Option<String>,
    /// Credits (number or numeric string)
    pub credits: Option<Value>,
    /// Grade categories
    pub grade_categories: Option<Vec<RawGradeCategory>>,
}

/// Loose grade category
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawGradeCategory {
    /// Name
    pub name: Option<String>,
    /// Weight in percent (number or numeric string)
    pub weight: Option<Value>,
    /// Graded items
    pub grades: Option<Vec<RawGradedItem>>,
}

/// Loose graded item
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawGradedItem {
    /// Score in percent (number or numeric string)
    pub score: Option<Value>,
}

/// Loose assignment record
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAssignment {
    /// Identifier, from `Id`
    #[serde(rename = "Id")]
    pub id: Option<Value>,
    /// Identifier, from lowercase `id` (used when `Id` is absent)
    #[serde(rename = "id")]
    pub lower_id: Option<Value>,
    /// Owning course id
    pub course_id: Option<Value>,
    /// Title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Due date (`YYYY-MM-DD` or RFC 3339)
    pub due_date: Option<String>,
    /// Priority label
    pub priority: Option<String>,
    /// Status label
    pub status: Option<String>,
}

/// Loose study session record
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStudySession {
    /// Identifier, from `Id`
    #[serde(rename = "Id")]
    pub id: Option<Value>,
    /// Identifier, from lowercase `id` (used when `Id` is absent)
    #[serde(rename = "id")]
    pub lower_id: Option<Value>,
    /// Course id
    pub course_id: Option<Value>,
    /// Date (`YYYY-MM-DD` or RFC 3339)
    pub date: Option<String>,
    /// Length in minutes
    #[serde(alias = "duration")]
    pub duration_minutes: Option<Value>,
    /// Topic
    pub topic: Option<String>,
}

const COURSE: &str = "Course";
const ASSIGNMENT: &str = "Assignment";
const STUDY_SESSION: &str = "Study session";

/// Read a number from a JSON number or numeric string
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Read a non-negative integer that fits in `u32`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_u32(value: &Value) -> Option<u32> {
    as_number(value)
        .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

fn record_id(value: Option<&Value>, kind: &'static str, index: usize) -> Result<u32, RecordError> {
    let value = value.ok_or(RecordError::MissingId { kind, index })?;
    as_u32(value).ok_or_else(|| RecordError::InvalidId {
        kind,
        index,
        value: value.to_string(),
    })
}

/// Parse a date given as `YYYY-MM-DD` or as an RFC 3339 timestamp (date part kept)
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn required_date(
    value: Option<&str>,
    kind: &'static str,
    id: u32,
    field: &'static str,
) -> Result<NaiveDate, RecordError> {
    let value = value.ok_or(RecordError::MissingField { kind, id, field })?;
    parse_date(value).ok_or_else(|| RecordError::InvalidDate {
        kind,
        id,
        value: value.to_string(),
    })
}

impl RawGradeCategory {
    fn normalize(self, course_id: u32, warnings: &mut Vec<String>) -> GradeCategory {
        let name = self.name.unwrap_or_default();
        let weight = match self.weight.as_ref().map(as_number) {
            None => 0.0,
            Some(Some(w)) if w.is_finite() => w,
            Some(_) => {
                warnings.push(format!(
                    "Course {course_id}: category '{name}' has a non-numeric weight; using 0"
                ));
                0.0
            }
        };

        let mut grades = Vec::new();
        for (idx, item) in self.grades.unwrap_or_default().into_iter().enumerate() {
            match item.score.as_ref().and_then(as_number) {
                Some(score) if score.is_finite() => grades.push(GradedItem::new(score)),
                _ => warnings.push(format!(
                    "Course {course_id}: category '{name}' item #{idx} has no numeric score; dropped"
                )),
            }
        }

        GradeCategory {
            name,
            weight,
            grades,
        }
    }
}

impl RawCourse {
    /// Normalize into a [`Course`]
    ///
    /// # Errors
    /// Returns an error if the id is missing or invalid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalize(self, index: usize, warnings: &mut Vec<String>) -> Result<Course, RecordError> {
        let id = record_id(self.id.as_ref().or(self.lower_id.as_ref()), COURSE, index)?;

        let credits = match self.credits.as_ref().map(as_number) {
            None => 0,
            Some(Some(c)) if c.is_finite() && c >= 0.0 => {
                if c.fract() != 0.0 {
                    warnings.push(format!("Course {id}: fractional credits {c} rounded"));
                }
                c.round().min(f64::from(u32::MAX)) as u32
            }
            Some(Some(c)) if c.is_finite() => {
                warnings.push(format!("Course {id}: negative credits {c}; using 0"));
                0
            }
            Some(_) => {
                warnings.push(format!("Course {id}: non-numeric credits; using 0"));
                0
            }
        };

        let grade_categories = self
            .grade_categories
            .unwrap_or_default()
            .into_iter()
            .map(|category| category.normalize(id, warnings))
            .collect();

        Ok(Course {
            id,
            name: self.name.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            professor: self.professor.unwrap_or_default(),
            schedule: self.schedule.unwrap_or_default(),
            semester: self.semester.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            credits,
            grade_categories,
        })
    }
}

impl RawAssignment {
    /// Normalize into an [`Assignment`]
    ///
    /// # Errors
    /// Returns an error if the id, course id, or due date is missing or invalid.
    pub fn normalize(
        self,
        index: usize,
        warnings: &mut Vec<String>,
    ) -> Result<Assignment, RecordError> {
        let id = record_id(self.id.as_ref().or(self.lower_id.as_ref()), ASSIGNMENT, index)?;
        let course_id = self
            .course_id
            .as_ref()
            .and_then(as_u32)
            .ok_or(RecordError::MissingField {
                kind: ASSIGNMENT,
                id,
                field: "courseId",
            })?;
        let due_date = required_date(self.due_date.as_deref(), ASSIGNMENT, id, "dueDate")?;

        let priority = self.priority.map_or(Priority::default(), |label| {
            label.parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Assignment {id}: unknown priority '{label}'; using medium"
                ));
                Priority::default()
            })
        });
        let status = self.status.map_or(AssignmentStatus::default(), |label| {
            label.parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Assignment {id}: unknown status '{label}'; using pending"
                ));
                AssignmentStatus::default()
            })
        });

        Ok(Assignment {
            id,
            course_id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            due_date,
            priority,
            status,
        })
    }
}

impl RawStudySession {
    /// Normalize into a [`StudySession`]
    ///
    /// # Errors
    /// Returns an error if the id, course id, or date is missing or invalid.
    pub fn normalize(
        self,
        index: usize,
        warnings: &mut Vec<String>,
    ) -> Result<StudySession, RecordError> {
        let id = record_id(self.id.as_ref().or(self.lower_id.as_ref()), STUDY_SESSION, index)?;
        let course_id = self
            .course_id
            .as_ref()
            .and_then(as_u32)
            .ok_or(RecordError::MissingField {
                kind: STUDY_SESSION,
                id,
                field: "courseId",
            })?;
        let date = required_date(self.date.as_deref(), STUDY_SESSION, id, "date")?;
        let duration_minutes = match self.duration_minutes.as_ref() {
            None => 0,
            Some(value) => as_u32(value).unwrap_or_else(|| {
                warnings.push(format!(
                    "Study session {id}: invalid duration {value}; using 0"
                ));
                0
            }),
        };

        Ok(StudySession {
            id,
            course_id,
            date,
            duration_minutes,
            topic: self.topic.unwrap_or_default(),
        })
    }
}

fn check_unique(ids: impl Iterator<Item = u32>, kind: &'static str) -> Result<(), RecordError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RecordError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

impl RawSnapshot {
    /// Normalize every record into strict models
    ///
    /// # Errors
    /// Returns the first hard error: a missing/invalid id, a duplicate id,
    /// or a missing/invalid required field.
    pub fn normalize(self) -> Result<Normalized, RecordError> {
        let mut warnings = Vec::new();

        let courses = self
            .courses
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.normalize(idx, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;
        let assignments = self
            .assignments
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.normalize(idx, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;
        let study_sessions = self
            .study_sessions
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.normalize(idx, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;

        check_unique(courses.iter().map(|c| c.id), COURSE)?;
        check_unique(assignments.iter().map(|a| a.id), ASSIGNMENT)?;
        check_unique(study_sessions.iter().map(|s| s.id), STUDY_SESSION)?;

        let course_ids: HashSet<u32> = courses.iter().map(|c| c.id).collect();
        for assignment in &assignments {
            if !course_ids.contains(&assignment.course_id) {
                warnings.push(format!(
                    "Assignment {}: unknown course {}",
                    assignment.id, assignment.course_id
                ));
            }
        }
        for session in &study_sessions {
            if !course_ids.contains(&session.course_id) {
                warnings.push(format!(
                    "Study session {}: unknown course {}",
                    session.id, session.course_id
                ));
            }
        }

        Ok(Normalized {
            snapshot: Snapshot {
                courses,
                assignments,
                study_sessions,
            },
            warnings,
        })
    }
}

/// Parse and normalize a snapshot from a JSON string
///
/// # Errors
/// Returns an error if the JSON is malformed or a record fails normalization.
pub fn parse_snapshot(json: &str) -> Result<Normalized, RecordError> {
    let raw: RawSnapshot = serde_json::from_str(json)?;
    raw.normalize()
}

/// Load and normalize a snapshot file
///
/// # Errors
/// Returns an error if the file cannot be read or its contents are invalid.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Normalized, RecordError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&content)
}

/// Write a snapshot as pretty-printed JSON, creating parent directories
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<(), RecordError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    let write_err = |source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, json).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let normalized = parse_snapshot(r#"{ "courses": [ { "Id": 4 } ] }"#).unwrap();
        let course = &normalized.snapshot.courses[0];

        assert_eq!(course.id, 4);
        assert_eq!(course.name, "");
        assert_eq!(course.credits, 0);
        assert!(course.grade_categories.is_empty());
        assert!(normalized.warnings.is_empty());
    }

    #[test]
    fn test_category_without_weight_or_grades() {
        let json = r#"{ "courses": [ { "id": 1, "gradeCategories": [
            { "name": "Quizzes", "grades": [ { "score": 50 } ] },
            { "name": "Labs", "weight": 30 }
        ] } ] }"#;
        let normalized = parse_snapshot(json).unwrap();
        let categories = &normalized.snapshot.courses[0].grade_categories;

        assert!(categories[0].weight.abs() < f64::EPSILON);
        assert_eq!(categories[0].grades.len(), 1);
        assert!(categories[1].grades.is_empty());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let json = r#"{ "courses": [ { "Id": "2", "credits": "3",
            "gradeCategories": [ { "name": "Exams", "weight": "50", "grades": [ { "score": "88.5" } ] } ] } ] }"#;
        let course = &parse_snapshot(json).unwrap().snapshot.courses[0];

        assert_eq!(course.id, 2);
        assert_eq!(course.credits, 3);
        assert!((course.grade_categories[0].grades[0].score - 88.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_scores_are_dropped_with_warning() {
        let json = r#"{ "courses": [ { "Id": 1, "gradeCategories": [
            { "name": "HW", "weight": 100, "grades": [ { "score": 90 }, { "score": "abc" }, {} ] }
        ] } ] }"#;
        let normalized = parse_snapshot(json).unwrap();

        assert_eq!(normalized.snapshot.courses[0].grade_categories[0].grades.len(), 1);
        assert_eq!(normalized.warnings.len(), 2);
    }

    #[test]
    fn test_negative_credits_clamped() {
        let normalized = parse_snapshot(r#"{ "courses": [ { "Id": 1, "credits": -3 } ] }"#).unwrap();

        assert_eq!(normalized.snapshot.courses[0].credits, 0);
        assert_eq!(normalized.warnings.len(), 1);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let err = parse_snapshot(r#"{ "courses": [ { "Id": 1 }, { "name": "x" } ] }"#).unwrap_err();
        assert!(matches!(err, RecordError::MissingId { index: 1, .. }));

        let err = parse_snapshot(r#"{ "courses": [ { "Id": -1 } ] }"#).unwrap_err();
        assert!(matches!(err, RecordError::InvalidId { .. }));
    }

    #[test]
    fn test_upper_id_wins_when_both_keys_present() {
        let json = r#"{ "courses": [ { "Id": 7, "id": 3 } ],
            "studySessions": [ { "id": 5, "courseId": 7, "date": "2024-10-01", "duration": 30 } ] }"#;
        let snapshot = parse_snapshot(json).unwrap().snapshot;

        assert_eq!(snapshot.courses[0].id, 7);
        assert_eq!(snapshot.study_sessions[0].id, 5);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = parse_snapshot(r#"{ "courses": [ { "Id": 1 }, { "Id": 1 } ] }"#).unwrap_err();
        assert!(matches!(err, RecordError::DuplicateId { id: 1, .. }));
    }

    #[test]
    fn test_assignment_dates_and_labels() {
        let json = r#"{ "courses": [ { "Id": 1 } ], "assignments": [
            { "Id": 1, "courseId": 1, "title": "Essay", "dueDate": "2024-10-15T23:59:00.000Z", "priority": "high", "status": "completed" },
            { "Id": 2, "courseId": "1", "dueDate": "2024-10-20", "priority": "urgent" }
        ] }"#;
        let normalized = parse_snapshot(json).unwrap();
        let assignments = &normalized.snapshot.assignments;

        assert_eq!(assignments[0].due_date, NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
        assert_eq!(assignments[0].priority, Priority::High);
        assert_eq!(assignments[0].status, AssignmentStatus::Completed);
        assert_eq!(assignments[1].priority, Priority::Medium);
        assert_eq!(assignments[1].status, AssignmentStatus::Pending);
        assert_eq!(normalized.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_due_date_is_an_error() {
        let json = r#"{ "assignments": [ { "Id": 1, "courseId": 1, "dueDate": "next week" } ] }"#;
        assert!(matches!(
            parse_snapshot(json).unwrap_err(),
            RecordError::InvalidDate { .. }
        ));

        let json = r#"{ "assignments": [ { "Id": 1, "courseId": 1 } ] }"#;
        assert!(matches!(
            parse_snapshot(json).unwrap_err(),
            RecordError::MissingField { field: "dueDate", .. }
        ));
    }

    #[test]
    fn test_unknown_course_reference_warns() {
        let json = r#"{ "assignments": [ { "Id": 1, "courseId": 9, "dueDate": "2024-10-01" } ],
            "studySessions": [ { "Id": 1, "courseId": 9, "date": "2024-10-01", "duration": 45 } ] }"#;
        let normalized = parse_snapshot(json).unwrap();

        assert_eq!(normalized.snapshot.study_sessions[0].duration_minutes, 45);
        assert_eq!(normalized.warnings.len(), 2);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_date("2024-03-09"), expected);
        assert_eq!(parse_date("2024-03-09T08:00:00+02:00"), expected);
        assert_eq!(parse_date("03/09/2024"), None);
    }

    #[test]
    fn test_strict_snapshot_reloads() {
        let json = r#"{ "courses": [ { "Id": 1, "name": "Chem", "credits": 4, "gradeCategories": [
            { "name": "Labs", "weight": 25, "grades": [ { "score": 91 } ] } ] } ],
            "assignments": [ { "Id": 5, "courseId": 1, "dueDate": "2024-11-02", "status": "overdue" } ] }"#;
        let first = parse_snapshot(json).unwrap().snapshot;
        let saved = serde_json::to_string(&first).unwrap();
        let second = parse_snapshot(&saved).unwrap().snapshot;

        assert_eq!(first, second);
    }
}
