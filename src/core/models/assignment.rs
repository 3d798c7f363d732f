//! Assignment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Assignment priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// High priority
    High,
    /// Medium priority
    #[default]
    Medium,
    /// Low priority
    Low,
}

/// Recorded assignment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Not yet done
    #[default]
    Pending,
    /// Done
    Completed,
    /// Explicitly marked overdue
    Overdue,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {s}")),
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            _ => Err(format!("Unknown assignment status: {s}")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

/// A piece of coursework with a due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier
    #[serde(rename = "Id")]
    pub id: u32,

    /// Owning course id
    pub course_id: u32,

    /// Short title
    pub title: String,

    /// Free-form description (may be empty)
    pub description: String,

    /// Day the assignment is due
    pub due_date: NaiveDate,

    /// Priority
    pub priority: Priority,

    /// Recorded status
    pub status: AssignmentStatus,
}

impl Assignment {
    /// Create a pending, medium-priority assignment
    #[must_use]
    pub const fn new(id: u32, course_id: u32, title: String, due_date: NaiveDate) -> Self {
        Self {
            id,
            course_id,
            title,
            description: String::new(),
            due_date,
            priority: Priority::Medium,
            status: AssignmentStatus::Pending,
        }
    }

    /// Whether the assignment has been completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == AssignmentStatus::Completed
    }

    /// Case-insensitive match of `term` against title and description
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
