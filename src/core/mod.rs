//! Core module: domain models, grade engine, records, and reporting

pub mod config;
pub mod grades;
pub mod models;
pub mod planner;
pub mod records;
pub mod report;
pub mod store;

/// Returns the current version of the `StudyFlow` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
