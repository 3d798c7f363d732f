//! Data models for `StudyFlow`

pub mod assignment;
pub mod course;
pub mod study_session;

pub use assignment::{Assignment, AssignmentStatus, Priority};
pub use course::{Course, GradeCategory, GradedItem};
pub use study_session::StudySession;
