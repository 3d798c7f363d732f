//! Study session model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A block of time spent studying for a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// Unique identifier
    #[serde(rename = "Id")]
    pub id: u32,

    /// Course studied
    pub course_id: u32,

    /// Day of the session
    pub date: NaiveDate,

    /// Length in minutes
    pub duration_minutes: u32,

    /// What was covered (may be empty)
    pub topic: String,
}

impl StudySession {
    /// Create a session with no topic
    #[must_use]
    pub const fn new(id: u32, course_id: u32, date: NaiveDate, duration_minutes: u32) -> Self {
        Self {
            id,
            course_id,
            date,
            duration_minutes,
            topic: String::new(),
        }
    }
}
